use serde::Serialize;
use strum::{Display, IntoStaticStr};

use super::options::RetrievalOptions;
use crate::core::language::Language;
use crate::knowledge::models::{Acronym, Term};


/// Everything one retrieval call needs; discarded when the call returns.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'q> {
    pub text: &'q str,
    pub language: Language,
    pub options: RetrievalOptions,
}

impl<'q> QueryContext<'q> {
    pub fn new(text: &'q str, language: Language, options: RetrievalOptions) -> Self {
        Self {
            text,
            language,
            options,
        }
    }
}


/// Keywords for the weighted fields plus the raw material that key matching
/// needs, since entry keys may be built from stop words (`what_if`, `IT`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedQuery {
    /// Filtered, normalized keywords in first-occurrence order.
    pub keywords: Vec<String>,
    /// Every lowercased token, stop words included.
    pub tokens: Vec<String>,
    /// The whole query, lowercased with whitespace collapsed.
    pub folded: String,
}

impl ExtractedQuery {
    /// Treat `keywords` as the whole query. Handy when the caller has
    /// already tokenized.
    pub fn from_keywords(keywords: Vec<String>) -> Self {
        Self {
            folded: keywords.join(" "),
            tokens: keywords.clone(),
            keywords,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.tokens.is_empty()
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchedField {
    Key,
    PrimaryName,
    SecondaryName,
    DataField,
    Definition,
    AcronymKey,
    AcronymExpansion,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    pub field: MatchedField,
    pub keyword: String,
    pub points: u32,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HitOrigin {
    Direct,
    /// Pulled in through the named term's related list.
    Related { via: String },
}


#[derive(Debug, Clone)]
pub struct ScoredHit<'a, T> {
    pub entry: &'a T,
    pub score: u32,
    pub matches: Vec<FieldMatch>,
    pub origin: HitOrigin,
    /// Load-order position, used as the tiebreaker.
    pub position: usize,
}

impl<'a, T> ScoredHit<'a, T> {
    pub fn is_related(&self) -> bool {
        matches!(self.origin, HitOrigin::Related { .. })
    }
}

pub type TermHit<'a> = ScoredHit<'a, Term>;
pub type AcronymHit<'a> = ScoredHit<'a, Acronym>;


/// Ranked output of one retrieval call, handed to the formatter.
#[derive(Debug, Clone, Default)]
pub struct RetrievalContext<'a> {
    terms: Vec<TermHit<'a>>,
    acronyms: Vec<AcronymHit<'a>>,
}

impl<'a> RetrievalContext<'a> {
    pub fn new(terms: Vec<TermHit<'a>>, acronyms: Vec<AcronymHit<'a>>) -> Self {
        Self { terms, acronyms }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn terms(&self) -> &[TermHit<'a>] {
        &self.terms
    }

    pub fn acronyms(&self) -> &[AcronymHit<'a>] {
        &self.acronyms
    }

    pub fn direct_count(&self) -> usize {
        self.terms.iter().filter(|h| !h.is_related()).count()
    }

    pub fn related_count(&self) -> usize {
        self.terms.iter().filter(|h| h.is_related()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.acronyms.is_empty()
    }

    pub fn term_keys(&self) -> Vec<&'a str> {
        self.terms.iter().map(|h| h.entry.key.as_str()).collect()
    }
}
