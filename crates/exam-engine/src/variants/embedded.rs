//! Embedded fill-in-the-blank extraction: identical anchor logic to the
//! choice variant, but options are delimited by the private-use-area glyphs
//! some exam PDFs embed instead of (A)-(D) letters.

use shared_types::{QuestionKind, QuestionRecord};

use crate::extract::{anchor, option};

/// Glyph delimiters are mapped to canonical A-D labels on output through the
/// shared glyph table; the record shape is indistinguishable from a plain
/// choice extraction.
pub fn extract(text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    let anchors = anchor::scan_anchors(text);
    let mut records = Vec::new();

    for (number, region) in anchor::regions(text, &anchors) {
        let split = option::split_glyph_options(region);
        if let Some(record) = super::build_record(
            number,
            split.stem,
            split.options,
            QuestionKind::Choice,
            None,
            warnings,
        ) {
            records.push(record);
        }
    }

    records
}
