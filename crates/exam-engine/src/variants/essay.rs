//! Essay extraction: numbered anchors with no option markers in sight.

use shared_types::{QuestionKind, QuestionRecord};

use crate::extract::{anchor, option};
use crate::patterns::{normalize_span, ESSAY_LOOKAHEAD_CHARS};

/// An anchor qualifies as an essay question when no option marker appears
/// within a bounded lookahead past it; the whole remaining region is the
/// prompt and options stay empty. Anchors that do show markers are left for
/// the choice-family variants.
pub fn extract(text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    let anchors = anchor::scan_anchors(text);
    let mut records = Vec::new();

    for (number, region) in anchor::regions(text, &anchors) {
        if option::has_letter_marker_within(region, ESSAY_LOOKAHEAD_CHARS) {
            continue;
        }
        if let Some(record) = super::build_record(
            number,
            normalize_span(region),
            Vec::new(),
            QuestionKind::Essay,
            None,
            warnings,
        ) {
            records.push(record);
        }
    }

    records
}
