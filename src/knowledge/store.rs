use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::models::{Acronym, Term};
use crate::core::error::KnowledgeError;


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub terms: usize,
    pub acronyms: usize,
    pub dangling_related: usize,
    pub malformed: usize,
}


/// Immutable snapshot of every term and acronym from one source read.
///
/// Insertion order is preserved and doubles as the ranking tiebreaker.
#[derive(Debug)]
pub struct KnowledgeStore {
    version: String,
    loaded_at: DateTime<Utc>,
    terms: Vec<Term>,
    term_index: HashMap<String, usize>,
    acronyms: Vec<Acronym>,
    acronym_index: HashMap<String, usize>,
    diagnostics: Vec<KnowledgeError>,
}

impl KnowledgeStore {
    pub fn builder() -> KnowledgeStoreBuilder {
        KnowledgeStoreBuilder::default()
    }

    pub fn empty() -> Self {
        Self::builder().build(String::new())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn term(&self, key: &str) -> Option<&Term> {
        self.term_index.get(key).map(|&idx| &self.terms[idx])
    }

    /// Position of a term in load order.
    pub fn term_position(&self, key: &str) -> Option<usize> {
        self.term_index.get(key).copied()
    }

    /// Case-insensitive lookup by short form.
    pub fn acronym(&self, key: &str) -> Option<&Acronym> {
        self.acronym_index
            .get(&key.trim().to_uppercase())
            .map(|&idx| &self.acronyms[idx])
    }

    pub fn terms(&self) -> impl ExactSizeIterator<Item = &Term> {
        self.terms.iter()
    }

    pub fn acronyms(&self) -> impl ExactSizeIterator<Item = &Acronym> {
        self.acronyms.iter()
    }

    pub fn term_keys(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.acronyms.is_empty()
    }

    /// Entries skipped at load time.
    pub fn diagnostics(&self) -> &[KnowledgeError] {
        &self.diagnostics
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            terms: self.terms.len(),
            acronyms: self.acronyms.len(),
            dangling_related: self.dangling_related().count(),
            malformed: self.diagnostics.len(),
        }
    }

    fn dangling_related(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().flat_map(move |term| {
            term.related
                .iter()
                .filter(move |key| !self.term_index.contains_key(key.as_str()))
                .map(move |key| (term.key.as_str(), key.as_str()))
        })
    }
}


#[derive(Debug, Default)]
pub struct KnowledgeStoreBuilder {
    terms: Vec<Term>,
    term_index: HashMap<String, usize>,
    acronyms: Vec<Acronym>,
    acronym_index: HashMap<String, usize>,
    diagnostics: Vec<KnowledgeError>,
}

impl KnowledgeStoreBuilder {
    /// Last insert wins; the replaced term keeps its original position.
    pub fn insert_term(&mut self, term: Term) -> &mut Self {
        match self.term_index.get(&term.key) {
            Some(&idx) => {
                warn!("Duplicate term key '{}', later definition wins", term.key);
                self.terms[idx] = term;
            }
            None => {
                self.term_index.insert(term.key.clone(), self.terms.len());
                self.terms.push(term);
            }
        }
        self
    }

    pub fn insert_acronym(&mut self, acronym: Acronym) -> &mut Self {
        match self.acronym_index.get(&acronym.key) {
            Some(&idx) => {
                warn!(
                    "Duplicate acronym '{}': '{}' replaces '{}'",
                    acronym.key, acronym.expansion, self.acronyms[idx].expansion
                );
                self.acronyms[idx] = acronym;
            }
            None => {
                self.acronym_index
                    .insert(acronym.key.clone(), self.acronyms.len());
                self.acronyms.push(acronym);
            }
        }
        self
    }

    pub fn record_malformed(&mut self, error: KnowledgeError) -> &mut Self {
        warn!("Skipping entry: {}", error);
        self.diagnostics.push(error);
        self
    }

    pub fn build(self, version: String) -> KnowledgeStore {
        let store = KnowledgeStore {
            version,
            loaded_at: Utc::now(),
            terms: self.terms,
            term_index: self.term_index,
            acronyms: self.acronyms,
            acronym_index: self.acronym_index,
            diagnostics: self.diagnostics,
        };

        for (from, to) in store.dangling_related() {
            debug!("Term '{}' references unknown related term '{}'", from, to);
        }
        store
    }
}
