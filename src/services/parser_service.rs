use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{FormatVariant, QuizItem, CHOICE_LETTERS};

/// Line beginning a new question, e.g. "Q3."; the marker itself is
/// discarded during segmentation.
static QUESTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*Q\d+\.\s*").expect("question marker pattern is valid"));

/// Option line prefix, e.g. "B) borrow checker".
static OPTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Da-d])\)\s+(.*)$").expect("option prefix pattern is valid"));

const CODE_FENCE: &str = "```";
const CORRECT_MARKER: &str = "Correct:";
const EXPLANATION_MARKER: &str = "Explanation:";

/// Structural role of one candidate line.
#[derive(Debug, PartialEq, Eq)]
enum LineClass<'a> {
    Fence,
    Option(char, &'a str),
    Correct(&'a str),
    Explanation(&'a str),
    Text(&'a str),
}

fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let head = line.get(..marker.len())?;
    if head.eq_ignore_ascii_case(marker) {
        line.get(marker.len()..)
    } else {
        None
    }
}

fn classify(line: &str) -> LineClass<'_> {
    if line.starts_with(CODE_FENCE) {
        return LineClass::Fence;
    }
    if let Some(caps) = OPTION_PREFIX.captures(line) {
        let letter = caps[1]
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or_default();
        if let Some(text) = caps.get(2) {
            return LineClass::Option(letter, text.as_str().trim());
        }
    }
    if let Some(rest) = strip_marker(line, CORRECT_MARKER) {
        return LineClass::Correct(rest.trim());
    }
    if let Some(rest) = strip_marker(line, EXPLANATION_MARKER) {
        return LineClass::Explanation(rest.trim());
    }
    LineClass::Text(line)
}

/// Pure parser from raw generated text to structured quiz items. Malformed
/// candidates are dropped and counted, never fatal to the batch.
pub struct ParserService;

impl ParserService {
    /// Returns the parsed items in source order plus the number of
    /// rejected candidates.
    pub fn parse(raw_text: &str, variant: FormatVariant) -> (Vec<QuizItem>, usize) {
        let mut items = Vec::new();
        let mut rejected = 0usize;

        let mut segments = QUESTION_MARKER.split(raw_text);
        // Whatever precedes the first marker is preamble, not a candidate.
        segments.next();

        for segment in segments {
            match Self::parse_candidate(segment, variant) {
                Some(item) => items.push(item),
                None => {
                    rejected += 1;
                    log::warn!(
                        "Skipping malformed question segment: {:?}",
                        segment.trim().lines().next().unwrap_or("")
                    );
                }
            }
        }

        (items, rejected)
    }

    /// One candidate becomes a complete item or nothing at all.
    fn parse_candidate(segment: &str, variant: FormatVariant) -> Option<QuizItem> {
        let lines: Vec<&str> = segment
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let question = match classify(lines.first()?) {
            LineClass::Text(text) => text.to_string(),
            _ => return None,
        };
        let mut cursor = 1;

        let mut code = None;
        if variant.supports_code() && matches!(lines.get(cursor).map(|l| classify(l)), Some(LineClass::Fence)) {
            let closing = lines[cursor + 1..]
                .iter()
                .position(|line| line.starts_with(CODE_FENCE))?
                + cursor
                + 1;
            code = Some(lines[cursor..=closing].join("\n"));
            cursor = closing + 1;
        }

        let mut options = BTreeMap::new();
        for expected in CHOICE_LETTERS {
            match classify(lines.get(cursor)?) {
                LineClass::Option(letter, text) if letter == expected && !text.is_empty() => {
                    options.insert(expected, text.to_string());
                }
                _ => return None,
            }
            cursor += 1;
        }

        let correct = match classify(lines.get(cursor)?) {
            LineClass::Correct(value) => {
                let mut chars = value.chars();
                let letter = chars.next()?.to_ascii_uppercase();
                if chars.next().is_some() || !CHOICE_LETTERS.contains(&letter) {
                    return None;
                }
                letter
            }
            _ => return None,
        };
        cursor += 1;

        let explanation = match classify(lines.get(cursor)?) {
            LineClass::Explanation(text) if !text.is_empty() => text.to_string(),
            _ => return None,
        };

        Some(QuizItem {
            question,
            code,
            options,
            correct,
            explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn well_formed_batch_parses_completely() {
        let raw = fixtures::raw_quiz_text(3);
        let (items, rejected) = ParserService::parse(&raw, FormatVariant::Plain);

        assert_eq!(items.len(), 3);
        assert_eq!(rejected, 0);
        assert_eq!(items[0].question, "What does question 1 ask?");
    }

    #[test]
    fn every_item_has_exactly_four_options() {
        let raw = fixtures::raw_quiz_text(4);
        let (items, _) = ParserService::parse(&raw, FormatVariant::Plain);

        for item in items {
            let keys: Vec<char> = item.options.keys().copied().collect();
            assert_eq!(keys, vec!['A', 'B', 'C', 'D']);
            assert!(CHOICE_LETTERS.contains(&item.correct));
        }
    }

    #[test]
    fn one_bad_candidate_does_not_affect_the_others() {
        let mut raw = fixtures::raw_quiz_text(2);
        // A third candidate with no explanation line.
        raw.push_str("Q3. Broken question?\nA) a\nB) b\nC) c\nD) d\nCorrect: A\n");
        let (items, rejected) = ParserService::parse(&raw, FormatVariant::Plain);

        assert_eq!(items.len(), 2);
        assert_eq!(rejected, 1);
    }

    #[test]
    fn missing_option_prefix_rejects_the_candidate() {
        let raw = "Q1. Question?\nA) a\nB) b\nC c\nD) d\nCorrect: A\nExplanation: because\n";
        let (items, rejected) = ParserService::parse(raw, FormatVariant::Plain);

        assert!(items.is_empty());
        assert_eq!(rejected, 1);
    }

    #[test]
    fn correct_letter_is_case_normalized() {
        let raw = "Q1. Question?\na) a\nb) b\nc) c\nd) d\nCorrect: b\nExplanation: because\n";
        let (items, rejected) = ParserService::parse(raw, FormatVariant::Plain);

        assert_eq!(rejected, 0);
        assert_eq!(items[0].correct, 'B');
        assert_eq!(items[0].option_text('B'), Some("b"));
    }

    #[test]
    fn out_of_range_correct_letter_rejects_the_candidate() {
        let raw = "Q1. Question?\nA) a\nB) b\nC) c\nD) d\nCorrect: E\nExplanation: because\n";
        let (items, rejected) = ParserService::parse(raw, FormatVariant::Plain);

        assert!(items.is_empty());
        assert_eq!(rejected, 1);
    }

    #[test]
    fn code_block_is_captured_with_its_fences() {
        let raw = fixtures::raw_code_quiz_text();
        let (items, rejected) = ParserService::parse(&raw, FormatVariant::CodeOptional);

        assert_eq!(rejected, 0);
        assert_eq!(items.len(), 1);
        let code = items[0].code.as_deref().expect("code block expected");
        assert!(code.starts_with("```"));
        assert!(code.ends_with("```"));
        assert!(code.contains("let x = 1;"));
        // Field extraction resumed after the closing fence.
        assert_eq!(items[0].option_text('A'), Some("it compiles"));
    }

    #[test]
    fn unterminated_code_fence_rejects_the_candidate() {
        let raw = "Q1. What happens?\n```\nlet x = 1;\nA) a\nB) b\nC) c\nD) d\nCorrect: A\nExplanation: because\n";
        let (items, rejected) = ParserService::parse(raw, FormatVariant::CodeOptional);

        assert!(items.is_empty());
        assert_eq!(rejected, 1);
    }

    #[test]
    fn plain_variant_never_captures_code() {
        let raw = fixtures::raw_code_quiz_text();
        let (items, rejected) = ParserService::parse(&raw, FormatVariant::Plain);

        // The fence line is not a valid option line, so the candidate dies.
        assert!(items.is_empty());
        assert_eq!(rejected, 1);
    }

    #[test]
    fn text_without_markers_yields_nothing() {
        let (items, rejected) =
            ParserService::parse("I could not generate a quiz today.", FormatVariant::Plain);

        assert!(items.is_empty());
        assert_eq!(rejected, 0);
    }

    #[test]
    fn marker_case_and_spacing_variants() {
        let raw = "  Q10.   Question ten?\nA) a\nB) b\nC) c\nD) d\ncorrect: a\nexplanation: why not\n";
        let (items, rejected) = ParserService::parse(raw, FormatVariant::Plain);

        assert_eq!(rejected, 0);
        assert_eq!(items[0].question, "Question ten?");
        assert_eq!(items[0].correct, 'A');
        assert_eq!(items[0].explanation, "why not");
    }
}
