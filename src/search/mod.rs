pub mod models;
pub mod options;
pub mod query_processor;
pub mod ranking;
pub mod scoring;

pub use models::{
    AcronymHit, ExtractedQuery, FieldMatch, HitOrigin, MatchedField, QueryContext,
    RetrievalContext, ScoredHit, TermHit,
};
pub use options::RetrievalOptions;
pub use query_processor::KeywordExtractor;
pub use ranking::{RELATED_SENTINEL_SCORE, Ranker};
pub use scoring::ScoringWeights;
