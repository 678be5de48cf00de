use serde::Deserialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::models::{Acronym, LocalizedText, TargetValue, Term};
use super::source::SourceDocument;
use super::store::KnowledgeStore;
use crate::core::error::{EntryKind, KnowledgeError, Result};


#[derive(Debug, Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    terms: Map<String, Value>,
    #[serde(default)]
    acronyms: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct TermRecord {
    name: LocalizedText,
    definition: LocalizedText,
    #[serde(default)]
    target: Option<TargetValue>,
    #[serde(default, alias = "dataField")]
    data_field: Option<String>,
    #[serde(default)]
    related: Vec<String>,
}


/// Parse and merge documents in order into one store.
///
/// A document that is not valid JSON of the expected shape fails the whole
/// load; an individual bad entry is skipped and recorded as a diagnostic.
pub fn build_store(documents: &[SourceDocument]) -> Result<KnowledgeStore> {
    let mut builder = KnowledgeStore::builder();
    let mut hasher = Sha256::new();

    for doc in documents {
        let record: DocumentRecord = serde_json::from_str(&doc.content).map_err(|e| {
            KnowledgeError::LoadFailed(format!("{} is not a valid knowledge document: {}", doc.name, e))
        })?;
        hasher.update(doc.content.as_bytes());
        hasher.update([0u8]);

        debug!(
            "Merging {}: {} terms, {} acronyms",
            doc.name,
            record.terms.len(),
            record.acronyms.len()
        );

        for (key, value) in record.terms {
            match parse_term(&key, value) {
                Ok(term) => builder.insert_term(term),
                Err(err) => builder.record_malformed(err),
            };
        }

        for (key, value) in record.acronyms {
            match parse_acronym(&key, value) {
                Ok(acronym) => builder.insert_acronym(acronym),
                Err(err) => builder.record_malformed(err),
            };
        }
    }

    let version = format!("{:x}", hasher.finalize());
    let store = builder.build(version);
    let stats = store.stats();
    info!(
        "Knowledge store built: {} terms, {} acronyms, {} skipped (version {})",
        stats.terms,
        stats.acronyms,
        stats.malformed,
        &store.version()[..12]
    );
    Ok(store)
}


fn parse_term(key: &str, value: Value) -> Result<Term> {
    let key = key.trim();
    if key.is_empty() {
        return Err(KnowledgeError::malformed(EntryKind::Term, key, "empty key"));
    }

    let record: TermRecord = serde_json::from_value(value)
        .map_err(|e| KnowledgeError::malformed(EntryKind::Term, key, e.to_string()))?;

    for (field, text) in [
        ("name.en", &record.name.en),
        ("name.ko", &record.name.ko),
        ("definition.en", &record.definition.en),
        ("definition.ko", &record.definition.ko),
    ] {
        if text.trim().is_empty() {
            return Err(KnowledgeError::malformed(
                EntryKind::Term,
                key,
                format!("`{}` is blank", field),
            ));
        }
    }

    let mut related: Vec<String> = Vec::with_capacity(record.related.len());
    for r in record.related {
        let r = r.trim();
        if !r.is_empty() && r != key && !related.iter().any(|seen| seen == r) {
            related.push(r.to_string());
        }
    }

    let data_field = record
        .data_field
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    Ok(Term::new(
        key.to_string(),
        record.name,
        record.definition,
        record.target,
        data_field,
        related,
    ))
}


fn parse_acronym(key: &str, value: Value) -> Result<Acronym> {
    if key.trim().is_empty() {
        return Err(KnowledgeError::malformed(EntryKind::Acronym, key, "empty key"));
    }
    match value {
        Value::String(expansion) if !expansion.trim().is_empty() => {
            Ok(Acronym::new(key, expansion.trim()))
        }
        Value::String(_) => Err(KnowledgeError::malformed(
            EntryKind::Acronym,
            key,
            "blank expansion",
        )),
        other => Err(KnowledgeError::malformed(
            EntryKind::Acronym,
            key,
            format!("expansion must be a string, got {}", other),
        )),
    }
}
