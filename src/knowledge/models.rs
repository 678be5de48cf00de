use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::language::Language;
use crate::utils::fold;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ko: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ko: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ko: ko.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::En => &self.en,
            Language::Ko => &self.ko,
        }
    }
}


/// A target such as an accuracy threshold; documents write it as a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for TargetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetValue::Number(n) => write!(f, "{}", n),
            TargetValue::Text(s) => f.write_str(s),
        }
    }
}


/// Lowercased copies of the searchable fields, computed once at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedTerm {
    pub key: String,
    pub primary_name: String,
    pub secondary_name: String,
    pub data_field: Option<String>,
    pub definitions: [String; 2],
}


#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub key: String,
    pub name: LocalizedText,
    pub definition: LocalizedText,
    pub target: Option<TargetValue>,
    pub data_field: Option<String>,
    pub related: Vec<String>,
    folded: FoldedTerm,
}

impl Term {
    pub fn new(
        key: String,
        name: LocalizedText,
        definition: LocalizedText,
        target: Option<TargetValue>,
        data_field: Option<String>,
        related: Vec<String>,
    ) -> Self {
        let folded = FoldedTerm {
            key: fold(&key),
            primary_name: fold(&name.en),
            secondary_name: fold(&name.ko),
            data_field: data_field.as_deref().map(fold),
            definitions: [fold(&definition.en), fold(&definition.ko)],
        };
        Self {
            key,
            name,
            definition,
            target,
            data_field,
            related,
            folded,
        }
    }

    pub fn folded(&self) -> &FoldedTerm {
        &self.folded
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acronym {
    /// Uppercase short form, e.g. `MAPE`.
    pub key: String,
    pub expansion: String,
    folded_key: String,
    folded_expansion: String,
}

impl Acronym {
    pub fn new(key: &str, expansion: impl Into<String>) -> Self {
        let key = key.trim().to_uppercase();
        let expansion = expansion.into();
        Self {
            folded_key: fold(&key),
            folded_expansion: fold(&expansion),
            key,
            expansion,
        }
    }

    pub fn folded_key(&self) -> &str {
        &self.folded_key
    }

    pub fn folded_expansion(&self) -> &str {
        &self.folded_expansion
    }
}
