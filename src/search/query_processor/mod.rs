pub mod patterns;
pub mod processor;

pub use patterns::{ENGLISH_STOP_WORDS, KOREAN_STOP_WORDS, is_stop_word};
pub use processor::KeywordExtractor;
