use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::context::ContextFormatter;
use crate::core::cache::{CacheStats, KnowledgeCache};
use crate::core::config::KnowledgeConfig;
use crate::core::error::Result;
use crate::core::language::Language;
use crate::knowledge::source::{FileSource, KnowledgeSource};
use crate::knowledge::store::{KnowledgeStore, StoreStats};
use crate::search::models::{QueryContext, RetrievalContext};
use crate::search::options::RetrievalOptions;
use crate::search::query_processor::KeywordExtractor;
use crate::search::ranking::Ranker;
use crate::search::scoring::{ScoringWeights, score_acronyms, score_terms};


/// Composes cache, extraction, scoring, ranking and formatting into the
/// single call the chat layer makes before generating a reply.
///
/// The cache is injected, so several retrievers (or an editing workflow that
/// calls `invalidate`) can share one.
pub struct KnowledgeRetriever {
    cache: Arc<KnowledgeCache>,
    extractor: KeywordExtractor,
    weights: ScoringWeights,
    ranker: Ranker,
    formatter: ContextFormatter,
    default_language: Language,
    default_options: RetrievalOptions,
    budget: Duration,
}

impl KnowledgeRetriever {
    pub fn new(cache: Arc<KnowledgeCache>, config: &KnowledgeConfig) -> Self {
        Self {
            cache,
            extractor: KeywordExtractor::new(config.min_token_chars),
            weights: ScoringWeights::default(),
            ranker: Ranker::new(config.related_allowance),
            formatter: ContextFormatter::new(config.max_definition_chars),
            default_language: config.default_language,
            default_options: RetrievalOptions::from_config(config),
            budget: Duration::from_millis(config.budget_ms),
        }
    }

    /// Validate the config and build a retriever over its file sources.
    pub fn from_config(config: &KnowledgeConfig) -> Result<Self> {
        config.validate()?;
        let source: Arc<dyn KnowledgeSource> = Arc::new(FileSource::new(config.sources.clone()));
        info!("Knowledge retriever using {}", source.describe());
        Ok(Self::new(Arc::new(KnowledgeCache::new(source)), config))
    }

    pub fn cache(&self) -> &Arc<KnowledgeCache> {
        &self.cache
    }

    pub fn default_options(&self) -> RetrievalOptions {
        self.default_options
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Build the prompt block for `query`. Returns an empty string when
    /// nothing matches or no knowledge store can be loaded.
    pub fn retrieve(&self, query: &str, language: Language, options: &RetrievalOptions) -> String {
        let loaded = match self.cache.load() {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!("Proceeding without domain knowledge: {}", err);
                return String::new();
            }
        };
        if let Some(err) = loaded.source_unavailable() {
            warn!("{}", err);
        }

        let query = QueryContext::new(query, language, *options);
        let context = self.search(&loaded.store, &query);
        self.formatter.format(&context, query.language)
    }

    /// Same as `retrieve`, taking the raw language tag from the request.
    /// Unknown tags use the configured default language.
    pub fn retrieve_for_tag(&self, query: &str, tag: &str, options: &RetrievalOptions) -> String {
        self.retrieve(query, Language::parse_or(tag, self.default_language), options)
    }

    /// Extract, score and rank against an already loaded store.
    pub fn search<'a>(&self, store: &'a KnowledgeStore, query: &QueryContext<'_>) -> RetrievalContext<'a> {
        let extracted = self.extractor.analyze(query.text);
        if extracted.is_empty() {
            return RetrievalContext::empty();
        }

        let terms = score_terms(store, &extracted, &self.weights);
        let acronyms = score_acronyms(store, &extracted, &self.weights);
        debug!(
            "{} term and {} acronym candidates for {} keywords",
            terms.len(),
            acronyms.len(),
            extracted.keywords.len()
        );
        self.ranker.rank(store, terms, acronyms, &query.options)
    }

    /// Run `retrieve` on the blocking pool and give up after `budget`,
    /// returning the empty block so the caller can proceed unaugmented.
    pub async fn retrieve_with_budget(
        self: Arc<Self>,
        query: String,
        language: Language,
        options: RetrievalOptions,
        budget: Duration,
    ) -> String {
        let task = tokio::task::spawn_blocking(move || self.retrieve(&query, language, &options));

        match tokio::time::timeout(budget, task).await {
            Ok(Ok(block)) => block,
            Ok(Err(err)) => {
                warn!("Knowledge retrieval task failed: {}", err);
                String::new()
            }
            Err(_) => {
                warn!("Knowledge retrieval exceeded {:?}, continuing without it", budget);
                String::new()
            }
        }
    }

    /// Called by the knowledge-editing workflow after documents change.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn store_stats(&self) -> Result<StoreStats> {
        Ok(self.cache.load()?.store.stats())
    }
}
