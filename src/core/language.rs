use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};


/// Output languages the glossary carries names and definitions for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    /// Parse a request tag such as `en`, `ko` or `ko-KR`; unknown tags fall back.
    pub fn parse_or(tag: &str, fallback: Language) -> Language {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        Language::from_str(primary).unwrap_or(fallback)
    }

    pub fn code(self) -> &'static str {
        self.into()
    }
}
