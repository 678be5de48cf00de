

/// Lowercase and collapse internal whitespace runs to a single space.
pub fn fold(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}


/// Cut `s` to at most `max_chars` characters, preferring the last word break,
/// and mark the cut with `...`.
pub fn truncate_at_word(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let head: String = s.chars().take(max_chars).collect();
    let cut = match head.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => head[..idx].trim_end(),
        _ => head.as_str(),
    };
    format!("{}...", cut)
}


#[inline]
pub fn is_hangul(c: char) -> bool {
    matches!(c,
        '\u{AC00}'..='\u{D7A3}'
        | '\u{1100}'..='\u{11FF}'
        | '\u{3130}'..='\u{318F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_collapses_whitespace() {
        assert_eq!(fold("  Mean   Absolute\tError "), "mean absolute error");
    }

    #[test]
    fn test_fold_hangul_unchanged() {
        assert_eq!(fold("평균 절대 오차"), "평균 절대 오차");
    }

    #[test]
    fn test_truncate_short_input() {
        assert_eq!(truncate_at_word("hi", 10), "hi");
    }

    #[test]
    fn test_truncate_at_word_boundary() {
        assert_eq!(truncate_at_word("mean absolute error", 10), "mean...");
    }

    #[test]
    fn test_truncate_hangul_without_spaces() {
        assert_eq!(truncate_at_word("평균절대오차", 4), "평균절대...");
    }

    #[test]
    fn test_is_hangul() {
        assert!(is_hangul('오'));
        assert!(is_hangul('ㄱ'));
        assert!(!is_hangul('a'));
        assert!(!is_hangul('7'));
    }
}
