pub mod loader;
pub mod models;
pub mod source;
pub mod store;

pub use loader::build_store;
pub use models::{Acronym, LocalizedText, TargetValue, Term};
pub use source::{FileSource, KnowledgeSource, SourceDocument, StaticSource};
pub use store::{KnowledgeStore, KnowledgeStoreBuilder, StoreStats};
