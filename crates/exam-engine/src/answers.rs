//! Answer-key parsing and merging.
//!
//! Exams publish an original key and sometimes an officially corrected key
//! in a separate document; corrections supersede the original. Missing or
//! empty keys are valid inputs, never errors.

use shared_types::AnswerMap;

use crate::patterns::{canonical_option_label, parse_exam_number, ANSWER_ROW};

/// Merge the two provenance tiers into the final key.
///
/// For every number in either source the corrected value wins when present
/// and non-empty; otherwise the original value is used; a number with no
/// usable value in either source is omitted, never fabricated.
pub fn merge(original: &AnswerMap, corrected: &AnswerMap) -> AnswerMap {
    let mut merged = AnswerMap::new();

    for (&number, value) in original {
        if !value.trim().is_empty() {
            merged.insert(number, value.clone());
        }
    }
    for (&number, value) in corrected {
        if !value.trim().is_empty() {
            merged.insert(number, value.clone());
        }
    }

    merged
}

/// Extract `number -> answer` rows from an answer-key document.
///
/// Accepts 第1題 A / 1. B / fullwidth digits and letters, plus annulment
/// notes (送分) kept as free text. First row per number wins; unparsable
/// rows are skipped.
pub fn parse_answer_key(text: &str) -> AnswerMap {
    let mut key = AnswerMap::new();

    for caps in ANSWER_ROW.captures_iter(text) {
        let Some(number) = parse_exam_number(&caps[1]) else {
            continue;
        };
        let raw = &caps[2];
        let value = match raw.chars().next() {
            Some(c) if raw.chars().count() == 1 => match canonical_option_label(c) {
                Some(label) => label.to_string(),
                None => continue,
            },
            // Annulment phrases pass through as free text.
            _ => raw.to_string(),
        };
        key.entry(number).or_insert(value);
    }

    key
}
