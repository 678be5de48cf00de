use std::fmt::{self, Write};

use crate::core::language::Language;
use crate::search::models::{HitOrigin, RetrievalContext};
use crate::utils::truncate_at_word;


struct Labels {
    heading: &'static str,
    preamble: &'static str,
    definition: &'static str,
    target: &'static str,
    data_field: &'static str,
    related_via: &'static str,
    acronyms: &'static str,
}

static EN_LABELS: Labels = Labels {
    heading: "## Domain Knowledge",
    preamble: "Use these glossary definitions when they are relevant to the question.",
    definition: "Definition",
    target: "Target",
    data_field: "Data field",
    related_via: "Related to",
    acronyms: "### Acronyms",
};

static KO_LABELS: Labels = Labels {
    heading: "## 도메인 지식",
    preamble: "질문과 관련이 있을 때 아래 용어 정의를 사용하세요.",
    definition: "정의",
    target: "목표",
    data_field: "데이터 필드",
    related_via: "관련 용어",
    acronyms: "### 약어",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN_LABELS,
        Language::Ko => &KO_LABELS,
    }
}


/// Renders a retrieval context as a prompt-ready text block.
///
/// An empty context renders as an empty string. Definitions are cut at
/// `max_definition_chars`, so the block size is bounded by the hit count.
#[derive(Debug, Clone, Copy)]
pub struct ContextFormatter {
    max_definition_chars: usize,
}

impl ContextFormatter {
    pub fn new(max_definition_chars: usize) -> Self {
        Self {
            max_definition_chars: max_definition_chars.max(1),
        }
    }

    pub fn format(&self, context: &RetrievalContext<'_>, language: Language) -> String {
        if context.is_empty() {
            return String::new();
        }
        self.render(context, labels(language), language)
            .unwrap_or_default()
    }

    fn render(
        &self,
        context: &RetrievalContext<'_>,
        labels: &Labels,
        language: Language,
    ) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", labels.heading)?;
        writeln!(out, "{}", labels.preamble)?;

        for hit in context.terms() {
            let term = hit.entry;
            out.push('\n');
            writeln!(out, "### {} ({})", term.name.get(language), term.key)?;
            writeln!(
                out,
                "- {}: {}",
                labels.definition,
                truncate_at_word(term.definition.get(language), self.max_definition_chars)
            )?;
            if let Some(target) = &term.target {
                writeln!(out, "- {}: {}", labels.target, target)?;
            }
            if let Some(field) = &term.data_field {
                writeln!(out, "- {}: `{}`", labels.data_field, field)?;
            }
            if let HitOrigin::Related { via } = &hit.origin {
                writeln!(out, "- {}: {}", labels.related_via, via)?;
            }
        }

        if !context.acronyms().is_empty() {
            out.push('\n');
            writeln!(out, "{}", labels.acronyms)?;
            for hit in context.acronyms() {
                writeln!(
                    out,
                    "- {} = {}",
                    hit.entry.key,
                    truncate_at_word(&hit.entry.expansion, self.max_definition_chars)
                )?;
            }
        }

        Ok(out)
    }
}

impl Default for ContextFormatter {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MAX_DEFINITION_CHARS)
    }
}
