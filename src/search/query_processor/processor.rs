use std::collections::HashSet;

use tracing::debug;

use super::patterns::{TOKEN_PATTERN, is_stop_word, strip_particle};
use crate::search::models::ExtractedQuery;
use crate::utils::{fold, is_hangul};


/// Turns free text into the normalized keyword set used for scoring.
///
/// Never fails: anything unrecognizable simply produces fewer keywords.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_chars: usize,
}

impl KeywordExtractor {
    pub fn new(min_chars: usize) -> Self {
        Self {
            min_chars: min_chars.max(1),
        }
    }

    /// Unique keywords in first-occurrence order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.analyze(text).keywords
    }

    /// Keywords together with the unfiltered tokens and folded text.
    pub fn analyze(&self, text: &str) -> ExtractedQuery {
        let mut seen_keywords = HashSet::new();
        let mut seen_tokens = HashSet::new();
        let mut query = ExtractedQuery {
            folded: fold(text),
            ..Default::default()
        };

        for found in TOKEN_PATTERN.find_iter(text) {
            let lowered = found.as_str().to_lowercase();
            if seen_tokens.insert(lowered.clone()) {
                query.tokens.push(lowered.clone());
            }

            let Some(keyword) = self.normalize(lowered) else {
                continue;
            };
            if seen_keywords.insert(keyword.clone()) {
                query.keywords.push(keyword);
            }
        }

        debug!(
            "Extracted {} keywords from {} tokens: {:?}",
            query.keywords.len(),
            query.tokens.len(),
            query.keywords
        );
        query
    }

    fn normalize(&self, lowered: String) -> Option<String> {
        if is_stop_word(&lowered) {
            return None;
        }

        let token = if lowered.starts_with(is_hangul) {
            let stem = strip_particle(&lowered, self.min_chars);
            if is_stop_word(stem) {
                return None;
            }
            stem.to_string()
        } else {
            lowered
        };

        (token.chars().count() >= self.min_chars).then_some(token)
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MIN_TOKEN_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_english_question() {
        let extractor = KeywordExtractor::default();
        assert_eq!(extractor.extract("What is MAPE?"), vec!["mape"]);
    }

    #[test]
    fn test_extract_mixed_scripts() {
        let extractor = KeywordExtractor::default();
        assert_eq!(
            extractor.extract("MAPE와 RMSE의 차이를 설명해줘"),
            vec!["mape", "rmse", "차이"]
        );
    }

    #[test]
    fn test_particles_stripped_from_hangul() {
        let extractor = KeywordExtractor::default();
        assert_eq!(extractor.extract("예측 정확도는 어떻게 계산하나요"), vec!["예측", "정확도", "계산하나요"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let extractor = KeywordExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   ?!... ---").is_empty());
        assert!(extractor.analyze("   ?!... ---").is_empty());
    }

    #[test]
    fn test_short_tokens_and_duplicates_dropped() {
        let extractor = KeywordExtractor::default();
        assert_eq!(extractor.extract("x y MAE mae Mae"), vec!["mae"]);
    }

    #[test]
    fn test_min_chars_configurable() {
        let extractor = KeywordExtractor::new(4);
        assert_eq!(extractor.extract("MAE and WMAPE"), vec!["wmape"]);
    }

    #[test]
    fn test_analyze_keeps_stop_word_tokens() {
        let extractor = KeywordExtractor::default();
        let query = extractor.analyze("What does  IT mean?");

        assert_eq!(query.tokens, vec!["what", "does", "it", "mean"]);
        assert!(!query.keywords.contains(&"it".to_string()));
        assert_eq!(query.folded, "what does it mean?");
    }

    #[test]
    fn test_deterministic() {
        let extractor = KeywordExtractor::default();
        let text = "forecast bias vs 예측 편향, bias again";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_no_empty_tokens() {
        let extractor = KeywordExtractor::default();
        for keyword in extractor.extract("  \t\n 안녕하세요 hello   there  ") {
            assert!(!keyword.trim().is_empty());
        }
    }
}
