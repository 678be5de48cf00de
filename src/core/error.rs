use std::path::PathBuf;

use thiserror::Error;


#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// Cold cache and the source could not be read or parsed.
    #[error("Knowledge load failed: {0}")]
    LoadFailed(String),

    /// Warm cache exists but the refresh failed; stale data is being served.
    #[error("Knowledge source unavailable, serving cached store: {0}")]
    SourceUnavailable(String),

    #[error("Malformed {kind} entry '{key}': {reason}")]
    MalformedEntry {
        kind: EntryKind,
        key: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KnowledgeError {
    pub fn malformed(kind: EntryKind, key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            kind,
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for KnowledgeError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    Term,
    Acronym,
}


pub type Result<T> = std::result::Result<T, KnowledgeError>;
