

pub mod context;
pub mod core;
pub mod engine;
pub mod knowledge;
pub mod search;
pub mod utils;


pub use crate::core::cache::{CacheStats, KnowledgeCache, LoadedStore};
pub use crate::core::config::KnowledgeConfig;
pub use crate::core::error::{KnowledgeError, Result};
pub use crate::core::language::Language;
pub use crate::engine::KnowledgeRetriever;
pub use crate::knowledge::{FileSource, KnowledgeSource, KnowledgeStore, SourceDocument, StaticSource};
pub use crate::search::{RetrievalContext, RetrievalOptions};


pub const DEFAULT_KNOWLEDGE_DIR: &str = "data/knowledge";


pub const DEFAULT_MAX_RESULTS: usize = 5;


pub const DEFAULT_MIN_RELEVANCE: u32 = 2;


pub const DEFAULT_RELATED_ALLOWANCE: usize = 3;


pub const DEFAULT_MIN_TOKEN_CHARS: usize = 2;


pub const DEFAULT_MAX_DEFINITION_CHARS: usize = 400;


pub const DEFAULT_BUDGET_MS: u64 = 200;
