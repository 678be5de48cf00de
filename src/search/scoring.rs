use serde::{Deserialize, Serialize};

use super::models::{AcronymHit, ExtractedQuery, FieldMatch, HitOrigin, MatchedField, TermHit};
use crate::knowledge::models::{Acronym, Term};
use crate::knowledge::store::KnowledgeStore;


/// Points a keyword earns for each field it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub key: u32,
    pub primary_name: u32,
    pub secondary_name: u32,
    pub data_field: u32,
    pub definition: u32,
    pub acronym_key: u32,
    pub acronym_expansion: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            key: 10,
            primary_name: 5,
            secondary_name: 5,
            data_field: 3,
            definition: 2,
            acronym_key: 10,
            acronym_expansion: 2,
        }
    }
}

impl ScoringWeights {
    pub fn points(&self, field: MatchedField) -> u32 {
        match field {
            MatchedField::Key => self.key,
            MatchedField::PrimaryName => self.primary_name,
            MatchedField::SecondaryName => self.secondary_name,
            MatchedField::DataField => self.data_field,
            MatchedField::Definition => self.definition,
            MatchedField::AcronymKey => self.acronym_key,
            MatchedField::AcronymExpansion => self.acronym_expansion,
        }
    }
}


/// Key matches either way round, so `mapes` still hits `mape` and `mape`
/// hits `wmape`.
fn key_matches(key: &str, keyword: &str) -> bool {
    key.contains(keyword) || keyword.contains(key)
}

fn field_match(field: MatchedField, keyword: &str, points: u32) -> FieldMatch {
    FieldMatch {
        field,
        keyword: keyword.to_string(),
        points,
    }
}


/// Every (field, keyword) pair that matched, with its points.
///
/// Keys are also checked against the raw query, so a key made of stop
/// words still earns the key weight when the query names it.
pub fn match_term(term: &Term, query: &ExtractedQuery, weights: &ScoringWeights) -> Vec<FieldMatch> {
    let folded = term.folded();
    let mut matches = Vec::new();

    for keyword in &query.keywords {
        let kw = keyword.as_str();
        let mut hit = |field: MatchedField| {
            matches.push(FieldMatch {
                field,
                keyword: keyword.clone(),
                points: weights.points(field),
            });
        };

        if key_matches(&folded.key, kw) {
            hit(MatchedField::Key);
        }
        if folded.primary_name.contains(kw) {
            hit(MatchedField::PrimaryName);
        }
        if folded.secondary_name.contains(kw) {
            hit(MatchedField::SecondaryName);
        }
        if folded.data_field.as_deref().is_some_and(|f| f.contains(kw)) {
            hit(MatchedField::DataField);
        }
        if folded.definitions.iter().any(|d| d.contains(kw)) {
            hit(MatchedField::Definition);
        }
    }

    let key_found = matches.iter().any(|m| m.field == MatchedField::Key);
    if !key_found && !folded.key.is_empty() && query.folded.contains(folded.key.as_str()) {
        matches.push(field_match(MatchedField::Key, &folded.key, weights.key));
    }
    matches
}


/// The key must equal a query token; stop words count here. Keys with
/// punctuation (`S&OP`) span several tokens and are looked up in the
/// folded query instead.
pub fn match_acronym(
    acronym: &Acronym,
    query: &ExtractedQuery,
    weights: &ScoringWeights,
) -> Vec<FieldMatch> {
    let key = acronym.folded_key();
    let mut matches = Vec::new();

    let single_token = key.chars().all(char::is_alphanumeric);
    let named = if single_token {
        query.tokens.iter().chain(&query.keywords).any(|t| t == key)
    } else {
        !key.is_empty() && query.folded.contains(key)
    };
    if named {
        matches.push(field_match(MatchedField::AcronymKey, key, weights.acronym_key));
    }

    for keyword in &query.keywords {
        if acronym.folded_expansion().contains(keyword.as_str()) {
            matches.push(FieldMatch {
                field: MatchedField::AcronymExpansion,
                keyword: keyword.clone(),
                points: weights.acronym_expansion,
            });
        }
    }
    matches
}


pub fn score_term(term: &Term, query: &ExtractedQuery, weights: &ScoringWeights) -> u32 {
    total(&match_term(term, query, weights))
}


pub fn score_acronym(acronym: &Acronym, query: &ExtractedQuery, weights: &ScoringWeights) -> u32 {
    total(&match_acronym(acronym, query, weights))
}

fn total(matches: &[FieldMatch]) -> u32 {
    matches.iter().map(|m| m.points).sum()
}


/// Score every term in load order; entries with no match are left out.
pub fn score_terms<'a>(
    store: &'a KnowledgeStore,
    query: &ExtractedQuery,
    weights: &ScoringWeights,
) -> Vec<TermHit<'a>> {
    if query.is_empty() {
        return Vec::new();
    }
    store
        .terms()
        .enumerate()
        .filter_map(|(position, term)| {
            let matches = match_term(term, query, weights);
            let score = total(&matches);
            (score > 0).then(|| TermHit {
                entry: term,
                score,
                matches,
                origin: HitOrigin::Direct,
                position,
            })
        })
        .collect()
}


pub fn score_acronyms<'a>(
    store: &'a KnowledgeStore,
    query: &ExtractedQuery,
    weights: &ScoringWeights,
) -> Vec<AcronymHit<'a>> {
    if query.is_empty() {
        return Vec::new();
    }
    store
        .acronyms()
        .enumerate()
        .filter_map(|(position, acronym)| {
            let matches = match_acronym(acronym, query, weights);
            let score = total(&matches);
            (score > 0).then(|| AcronymHit {
                entry: acronym,
                score,
                matches,
                origin: HitOrigin::Direct,
                position,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::models::LocalizedText;

    fn kws(words: &[&str]) -> ExtractedQuery {
        ExtractedQuery::from_keywords(words.iter().map(|w| w.to_string()).collect())
    }

    fn mape() -> Term {
        Term::new(
            "mape".into(),
            LocalizedText::new("Mean Absolute Percentage Error", "평균 절대 백분율 오차"),
            LocalizedText::new(
                "Average absolute error as a percentage of actual demand.",
                "실제 수요 대비 절대 오차의 평균 비율.",
            ),
            None,
            Some("mape_pct".into()),
            vec![],
        )
    }

    #[test]
    fn test_exact_key_scores_key_and_data_field() {
        let weights = ScoringWeights::default();
        // key (10) + data field `mape_pct` (3)
        assert_eq!(score_term(&mape(), &kws(&["mape"]), &weights), 13);
    }

    #[test]
    fn test_key_substring_both_directions() {
        let weights = ScoringWeights::default();
        let fields: Vec<MatchedField> = match_term(&mape(), &kws(&["mapes"]), &weights)
            .into_iter()
            .map(|m| m.field)
            .collect();
        assert_eq!(fields, vec![MatchedField::Key]);
    }

    #[test]
    fn test_one_keyword_many_fields() {
        let weights = ScoringWeights::default();
        // primary name (5) + definition (2)
        assert_eq!(score_term(&mape(), &kws(&["absolute"]), &weights), 7);
        // secondary name (5) + definition (2)
        assert_eq!(score_term(&mape(), &kws(&["오차"]), &weights), 7);
    }

    #[test]
    fn test_scores_sum_across_keywords() {
        let weights = ScoringWeights::default();
        assert_eq!(
            score_term(&mape(), &kws(&["percentage", "demand"]), &weights),
            7 + 2
        );
    }

    #[test]
    fn test_no_match_scores_zero() {
        let weights = ScoringWeights::default();
        assert_eq!(score_term(&mape(), &kws(&["inventory"]), &weights), 0);
        assert_eq!(score_term(&mape(), &kws(&[]), &weights), 0);
    }

    #[test]
    fn test_acronym_key_exact_only() {
        let weights = ScoringWeights::default();
        let acronym = Acronym::new("MAPE", "Mean Absolute Percentage Error");
        assert_eq!(score_acronym(&acronym, &kws(&["mape"]), &weights), 10);
        assert_eq!(score_acronym(&acronym, &kws(&["map"]), &weights), 0);
        assert_eq!(score_acronym(&acronym, &kws(&["percentage"]), &weights), 2);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoringWeights {
            definition: 0,
            ..Default::default()
        };
        assert_eq!(score_term(&mape(), &kws(&["demand"]), &weights), 0);
    }

    #[test]
    fn test_stop_word_key_found_in_raw_query() {
        let weights = ScoringWeights::default();
        let what_if = Term::new(
            "what_if".into(),
            LocalizedText::new("Scenario Analysis", "시나리오 분석"),
            LocalizedText::new("Comparing plans under changed assumptions.", "가정을 바꿔 계획을 비교."),
            None,
            None,
            vec![],
        );
        let query = ExtractedQuery {
            keywords: Vec::new(),
            tokens: vec!["tell".into(), "me".into(), "about".into(), "what".into(), "if".into()],
            folded: "tell me about what_if".into(),
        };

        let matches = match_term(&what_if, &query, &weights);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].field, MatchedField::Key);
        assert_eq!(score_term(&what_if, &query, &weights), 10);
    }

    #[test]
    fn test_stop_word_acronym_matches_token() {
        let weights = ScoringWeights::default();
        let it = Acronym::new("IT", "Information Technology");
        let query = ExtractedQuery {
            keywords: vec!["mean".into()],
            tokens: vec!["what".into(), "does".into(), "it".into(), "mean".into()],
            folded: "what does it mean?".into(),
        };
        assert_eq!(score_acronym(&it, &query, &weights), 10);

        let query = ExtractedQuery {
            keywords: vec!["item".into()],
            tokens: vec!["item".into()],
            folded: "item".into(),
        };
        assert_eq!(score_acronym(&it, &query, &weights), 0);
    }

    #[test]
    fn test_punctuated_acronym_matches_folded_query() {
        let weights = ScoringWeights::default();
        let sop = Acronym::new("S&OP", "Sales and Operations Planning");
        let query = ExtractedQuery {
            keywords: vec!["cycle".into()],
            tokens: vec!["s".into(), "op".into(), "cycle".into()],
            folded: "s&op cycle".into(),
        };
        assert_eq!(score_acronym(&sop, &query, &weights), 10);
    }
}
