use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A Hangul run, or a run of any other letters/digits. Splitting this way
    /// separates `MAPE는` into `MAPE` and `는`.
    pub static ref TOKEN_PATTERN: Regex =
        Regex::new(r"\p{Hangul}+|[[\p{L}\p{N}]--\p{Hangul}]+").expect("token pattern is valid");
}

lazy_static! {
    pub static ref ENGLISH_STOP_WORDS: HashSet<&'static str> = [
        "a", "about", "all", "also", "an", "and", "any", "are", "as", "at",
        "be", "been", "but", "by", "can", "could", "define", "definition",
        "describe", "did", "do", "does", "explain", "for", "from", "give",
        "has", "have", "hello", "hey", "hi", "how", "i", "if", "in", "into",
        "is", "it", "its", "know", "let", "like", "me", "my", "of", "on",
        "or", "our", "please", "really", "should", "show", "so", "some",
        "tell", "than", "thanks", "that", "the", "their", "them", "then",
        "there", "these", "they", "this", "those", "to", "us", "want",
        "was", "we", "were", "what", "whats", "when", "where", "which",
        "who", "why", "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect();
}

lazy_static! {
    pub static ref KOREAN_STOP_WORDS: HashSet<&'static str> = [
        "그", "그것", "그리고", "그럼", "대한", "대해", "대해서", "뭐", "뭐야",
        "뭐예요", "뭔가요", "뭔지", "무엇", "무엇인가요", "무엇인지", "설명",
        "설명해", "설명해줘", "설명해주세요", "알려", "알려줘", "알려주세요",
        "안녕", "안녕하세요", "어떻게", "어떤", "이것", "이거", "인가요",
        "입니다", "있나요", "저것", "좀", "주세요", "해줘", "해주세요", "또는",
        "의미", "뜻",
    ]
    .into_iter()
    .collect();
}

lazy_static! {
    /// Postpositions stripped from the end of Hangul tokens, longest first.
    pub static ref KOREAN_PARTICLES: Vec<&'static str> = {
        let mut particles = vec![
            "에서는", "으로는", "이란", "에서", "에게", "으로", "까지", "부터",
            "보다", "이나", "란", "은", "는", "이", "가", "을", "를", "의",
            "에", "와", "과", "도", "로", "만", "나",
        ];
        particles.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
        particles
    };
}

pub fn is_stop_word(token: &str) -> bool {
    ENGLISH_STOP_WORDS.contains(token) || KOREAN_STOP_WORDS.contains(token)
}

/// Drop one trailing particle if at least `min_chars` characters remain.
pub fn strip_particle(token: &str, min_chars: usize) -> &str {
    for particle in KOREAN_PARTICLES.iter() {
        if let Some(stem) = token.strip_suffix(particle) {
            if stem.chars().count() >= min_chars {
                return stem;
            }
        }
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
    }

    #[test]
    fn test_token_pattern_splits_scripts() {
        assert_eq!(tokens("MAPE는 뭐야?"), vec!["MAPE", "는", "뭐야"]);
        assert_eq!(tokens("rmse_v2, R²"), vec!["rmse", "v2", "R²"]);
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("what"));
        assert!(is_stop_word("알려줘"));
        assert!(!is_stop_word("mape"));
    }

    #[test]
    fn test_strip_particle() {
        assert_eq!(strip_particle("정확도는", 2), "정확도");
        assert_eq!(strip_particle("오차에서는", 2), "오차");
        assert_eq!(strip_particle("평가", 2), "평가");
        assert_eq!(strip_particle("편향", 2), "편향");
    }
}
