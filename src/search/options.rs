use serde::{Deserialize, Serialize};

use crate::core::config::KnowledgeConfig;


/// Per-call knobs recognized by the retrieval contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetrievalOptions {
    pub max_results: usize,
    pub min_relevance: u32,
    pub include_related: bool,
}

impl RetrievalOptions {
    pub fn new(max_results: usize, min_relevance: u32, include_related: bool) -> Self {
        Self {
            max_results: max_results.max(1),
            min_relevance,
            include_related,
        }
    }

    pub fn from_config(config: &KnowledgeConfig) -> Self {
        Self::new(
            config.max_results,
            config.min_relevance,
            config.include_related,
        )
    }

    /// `max_results` is a positive integer; zero is read as one.
    pub fn effective_max_results(&self) -> usize {
        self.max_results.max(1)
    }
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self::new(
            crate::DEFAULT_MAX_RESULTS,
            crate::DEFAULT_MIN_RELEVANCE,
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_names() {
        let options: RetrievalOptions =
            serde_json::from_str(r#"{"maxResults": 3, "minRelevance": 5, "includeRelated": false}"#)
                .unwrap();
        assert_eq!(options, RetrievalOptions::new(3, 5, false));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let options: RetrievalOptions = serde_json::from_str(r#"{"maxResults": 2}"#).unwrap();
        assert_eq!(options.max_results, 2);
        assert_eq!(options.min_relevance, 2);
        assert!(options.include_related);
    }

    #[test]
    fn test_zero_max_results_clamped() {
        assert_eq!(RetrievalOptions::new(0, 0, false).max_results, 1);
        let raw: RetrievalOptions = serde_json::from_str(r#"{"maxResults": 0}"#).unwrap();
        assert_eq!(raw.effective_max_results(), 1);
    }
}
