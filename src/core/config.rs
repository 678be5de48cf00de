use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::error::{KnowledgeError, Result};
use super::language::Language;


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {

    pub sources: Vec<PathBuf>,
    pub default_language: Language,


    pub max_results: usize,
    pub min_relevance: u32,
    pub include_related: bool,
    pub related_allowance: usize,


    pub min_token_chars: usize,
    pub max_definition_chars: usize,


    pub budget_ms: u64,
}

impl KnowledgeConfig {

    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self {
            sources,
            default_language: Language::En,

            max_results: crate::DEFAULT_MAX_RESULTS,
            min_relevance: crate::DEFAULT_MIN_RELEVANCE,
            include_related: true,
            related_allowance: crate::DEFAULT_RELATED_ALLOWANCE,

            min_token_chars: crate::DEFAULT_MIN_TOKEN_CHARS,
            max_definition_chars: crate::DEFAULT_MAX_DEFINITION_CHARS,

            budget_ms: crate::DEFAULT_BUDGET_MS,
        }
    }

    /// Defaults, then the optional file, then `KNOWLEDGE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("KNOWLEDGE")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("sources"),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }


    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(KnowledgeError::Config(
                "at least one knowledge source is required".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(KnowledgeError::Config("max_results must be positive".into()));
        }
        if self.min_token_chars == 0 {
            return Err(KnowledgeError::Config(
                "min_token_chars must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(crate::DEFAULT_KNOWLEDGE_DIR)])
    }
}
