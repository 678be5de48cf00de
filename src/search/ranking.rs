use std::collections::HashSet;

use tracing::debug;

use super::models::{AcronymHit, HitOrigin, RetrievalContext, ScoredHit, TermHit};
use super::options::RetrievalOptions;
use crate::knowledge::store::KnowledgeStore;


/// Score given to terms reached through related-term expansion. Direct hits
/// always score at least 1, so expanded terms sort below them.
pub const RELATED_SENTINEL_SCORE: u32 = 0;


/// Filters, orders and caps scored candidates, then expands related terms
/// one level deep.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    related_allowance: usize,
}

impl Ranker {
    pub fn new(related_allowance: usize) -> Self {
        Self { related_allowance }
    }

    pub fn related_allowance(&self) -> usize {
        self.related_allowance
    }

    pub fn rank<'a>(
        &self,
        store: &'a KnowledgeStore,
        terms: Vec<TermHit<'a>>,
        acronyms: Vec<AcronymHit<'a>>,
        options: &RetrievalOptions,
    ) -> RetrievalContext<'a> {
        let max_results = options.effective_max_results();

        let mut terms = select(terms, options.min_relevance, max_results);
        let acronyms = select(acronyms, options.min_relevance, max_results);

        if options.include_related {
            self.expand_related(store, &mut terms);
        }

        debug!(
            "Ranked {} terms and {} acronyms (max_results={}, min_relevance={})",
            terms.len(),
            acronyms.len(),
            max_results,
            options.min_relevance
        );
        RetrievalContext::new(terms, acronyms)
    }

    /// Append related terms of the surviving direct hits, in hit order then
    /// list order, skipping unknown keys and anything already present.
    fn expand_related<'a>(&self, store: &'a KnowledgeStore, terms: &mut Vec<TermHit<'a>>) {
        let mut present: HashSet<&'a str> = terms.iter().map(|h| h.entry.key.as_str()).collect();
        let mut expanded = Vec::new();

        'direct: for hit in terms.iter() {
            for related_key in &hit.entry.related {
                if expanded.len() >= self.related_allowance {
                    break 'direct;
                }
                let Some(position) = store.term_position(related_key) else {
                    continue;
                };
                let Some(related) = store.term(related_key) else {
                    continue;
                };
                if !present.insert(related.key.as_str()) {
                    continue;
                }
                expanded.push(TermHit {
                    entry: related,
                    score: RELATED_SENTINEL_SCORE,
                    matches: Vec::new(),
                    origin: HitOrigin::Related {
                        via: hit.entry.key.clone(),
                    },
                    position,
                });
            }
        }

        terms.extend(expanded);
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(crate::DEFAULT_RELATED_ALLOWANCE)
    }
}


/// Drop below-threshold hits, sort by score descending with load order
/// breaking ties, and keep the first `max_results`.
fn select<'a, T>(
    mut hits: Vec<ScoredHit<'a, T>>,
    min_relevance: u32,
    max_results: usize,
) -> Vec<ScoredHit<'a, T>> {
    hits.retain(|h| h.score > 0 && h.score >= min_relevance);
    hits.sort_by(|a, b| b.score.cmp(&a.score).then(a.position.cmp(&b.position)));
    hits.truncate(max_results);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::models::{LocalizedText, Term};
    use crate::search::models::ExtractedQuery;
    use crate::search::scoring::{ScoringWeights, score_acronyms, score_terms};

    fn term(key: &str, name: &str, definition: &str, related: &[&str]) -> Term {
        Term::new(
            key.into(),
            LocalizedText::new(name, name),
            LocalizedText::new(definition, definition),
            None,
            None,
            related.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn store() -> KnowledgeStore {
        let mut builder = KnowledgeStore::builder();
        builder
            .insert_term(term("alpha", "Alpha", "first error metric", &["beta", "ghost"]))
            .insert_term(term("beta", "Beta", "second error metric", &["gamma"]))
            .insert_term(term("gamma", "Gamma", "third error metric", &["delta"]))
            .insert_term(term("delta", "Delta", "fourth metric", &[]))
            .insert_term(term("epsilon", "Epsilon", "mentions alpha in passing", &[]));
        builder.build("test".into())
    }

    fn run<'a>(store: &'a KnowledgeStore, words: &[&str], options: RetrievalOptions, ranker: Ranker) -> RetrievalContext<'a> {
        let query = ExtractedQuery::from_keywords(words.iter().map(|w| w.to_string()).collect());
        let weights = ScoringWeights::default();
        ranker.rank(
            store,
            score_terms(store, &query, &weights),
            score_acronyms(store, &query, &weights),
            &options,
        )
    }

    #[test]
    fn test_key_match_outranks_definition_match() {
        let store = store();
        let ctx = run(&store, &["alpha"], RetrievalOptions::new(5, 1, false), Ranker::default());
        assert_eq!(ctx.term_keys(), vec!["alpha", "epsilon"]);
        assert!(ctx.terms()[0].score >= 10);
    }

    #[test]
    fn test_ties_broken_by_load_order() {
        let store = store();
        let ctx = run(&store, &["error"], RetrievalOptions::new(5, 1, false), Ranker::default());
        assert_eq!(ctx.term_keys(), vec!["alpha", "beta", "gamma"]);
        assert!(ctx.terms().iter().all(|h| h.score == 2));
    }

    #[test]
    fn test_min_relevance_filters_matching_terms() {
        let store = store();
        let ctx = run(&store, &["metric"], RetrievalOptions::new(5, 3, true), Ranker::default());
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_max_results_caps_direct_hits() {
        let store = store();
        let ctx = run(&store, &["metric"], RetrievalOptions::new(2, 1, false), Ranker::default());
        assert_eq!(ctx.term_keys(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_related_expansion_one_level() {
        let store = store();
        let ctx = run(&store, &["alpha"], RetrievalOptions::new(1, 1, true), Ranker::default());

        // beta via alpha; gamma is only reachable through beta and is not followed
        assert_eq!(ctx.term_keys(), vec!["alpha", "beta"]);
        assert_eq!(ctx.direct_count(), 1);
        assert_eq!(ctx.related_count(), 1);
        let beta = &ctx.terms()[1];
        assert_eq!(beta.score, RELATED_SENTINEL_SCORE);
        assert_eq!(beta.origin, HitOrigin::Related { via: "alpha".into() });
    }

    #[test]
    fn test_related_already_present_not_duplicated() {
        let store = store();
        let ctx = run(&store, &["alpha", "beta"], RetrievalOptions::new(5, 1, true), Ranker::default());
        assert_eq!(ctx.term_keys(), vec!["alpha", "beta", "epsilon", "gamma"]);
        assert_eq!(ctx.related_count(), 1);
    }

    #[test]
    fn test_related_expansion_capped_by_allowance() {
        let store = store();
        let ctx = run(&store, &["metric"], RetrievalOptions::new(3, 1, true), Ranker::new(0));
        assert_eq!(ctx.related_count(), 0);

        let ctx = run(&store, &["metric"], RetrievalOptions::new(3, 1, true), Ranker::new(1));
        assert_eq!(ctx.terms().len(), 3 + 1);
        assert_eq!(ctx.term_keys()[3], "delta");
    }

    #[test]
    fn test_total_never_exceeds_cap_plus_allowance() {
        let store = store();
        let ranker = Ranker::new(2);
        for max in 1..=5 {
            let ctx = run(&store, &["metric", "alpha", "error"], RetrievalOptions::new(max, 1, true), ranker);
            assert!(ctx.direct_count() <= max);
            assert!(ctx.terms().len() <= max + ranker.related_allowance());
        }
    }

    #[test]
    fn test_acronyms_filtered_and_capped() {
        let mut builder = KnowledgeStore::builder();
        builder
            .insert_acronym(crate::knowledge::models::Acronym::new("MAE", "Mean Absolute Error"))
            .insert_acronym(crate::knowledge::models::Acronym::new("MSE", "Mean Squared Error"));
        let store = builder.build(String::new());

        let ctx = run(&store, &["mse", "error"], RetrievalOptions::new(1, 1, false), Ranker::default());
        assert_eq!(ctx.acronyms().len(), 1);
        assert_eq!(ctx.acronyms()[0].entry.key, "MSE");
    }
}
