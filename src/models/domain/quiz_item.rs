use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The only answer letters a question may use.
pub const CHOICE_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Parsing/generation mode controlling whether a fenced code block is
/// expected between the question line and the options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatVariant {
    /// Conceptual questions only, no code blocks.
    Plain,
    /// A code block may follow the question line.
    CodeOptional,
    /// The prompt instructs the model to include a code block; parsing is
    /// identical to `CodeOptional`.
    CodeRequired,
}

impl FormatVariant {
    pub fn supports_code(self) -> bool {
        !matches!(self, FormatVariant::Plain)
    }
}

/// One structured multiple-choice question, immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizItem {
    pub question: String,
    /// Fenced code block, fence lines included; `None` when the question
    /// has no snippet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Exactly the keys A, B, C and D.
    pub options: BTreeMap<char, String>,
    /// Always uppercase, always one of the option keys.
    pub correct: char,
    pub explanation: String,
}

impl QuizItem {
    pub fn option_text(&self, letter: char) -> Option<&str> {
        self.options.get(&letter).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn quiz_item_round_trip_serialization() {
        let item = fixtures::quiz_item('B');
        let json = serde_json::to_string(&item).expect("item should serialize");
        let parsed: QuizItem = serde_json::from_str(&json).expect("item should deserialize");
        assert_eq!(item, parsed);
    }

    #[test]
    fn quiz_item_without_code_omits_the_field() {
        let item = fixtures::quiz_item('A');
        let json = serde_json::to_string(&item).expect("item should serialize");
        assert!(!json.contains("\"code\""));
    }

    #[test]
    fn format_variant_code_support() {
        assert!(!FormatVariant::Plain.supports_code());
        assert!(FormatVariant::CodeOptional.supports_code());
        assert!(FormatVariant::CodeRequired.supports_code());
    }

    #[test]
    fn option_text_looks_up_by_letter() {
        let item = fixtures::quiz_item('C');
        assert_eq!(item.option_text('C'), Some("option C"));
        assert_eq!(item.option_text('E'), None);
    }
}
