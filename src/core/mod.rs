

pub mod cache;
pub mod config;
pub mod error;
pub mod language;

pub use cache::{CacheStats, Freshness, KnowledgeCache, LoadedStore};
pub use config::KnowledgeConfig;
pub use error::{EntryKind, KnowledgeError, Result};
pub use language::Language;
