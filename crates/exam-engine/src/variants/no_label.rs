//! No-label extraction: numbered questions with no option markers at all.
//! Options are recovered positionally from delimiter spans, never invented:
//! an ambiguous split leaves the option list empty rather than wrong.

use shared_types::{QuestionKind, QuestionRecord};

use crate::extract::anchor;
use crate::patterns::normalize_span;

/// Stem ends at the first question mark or colon; the remainder splits into
/// candidate options at sentence-final punctuation and line breaks. Exactly
/// 2..=4 candidates make a choice question; anything else keeps the whole
/// region as an unlabeled prompt.
pub fn extract(text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    let mut anchors = anchor::scan_anchors(text);
    if anchors.is_empty() {
        anchors = anchor::scan_loose_anchors(text);
    }

    let mut records = Vec::new();
    for (number, region) in anchor::regions(text, &anchors) {
        let (stem_raw, tail) = split_stem(region);
        let candidates = option_candidates(tail);

        let record = if (2..=4).contains(&candidates.len()) {
            super::build_record(
                number,
                normalize_span(stem_raw),
                candidates,
                QuestionKind::Choice,
                None,
                warnings,
            )
        } else {
            super::build_record(
                number,
                normalize_span(region),
                Vec::new(),
                QuestionKind::Unknown,
                None,
                warnings,
            )
        };
        if let Some(record) = record {
            records.push(record);
        }
    }

    records
}

/// Split at the first interrogative/colon mark, keeping the mark on the stem.
pub(crate) fn split_stem(region: &str) -> (&str, &str) {
    for (idx, c) in region.char_indices() {
        if matches!(c, '？' | '?' | '：' | ':') {
            let cut = idx + c.len_utf8();
            return (&region[..cut], &region[cut..]);
        }
    }
    (region, "")
}

/// Delimiter spans after the stem. Each candidate is a verbatim (trimmed)
/// substring of the region; overlong spans disqualify the split.
pub(crate) fn option_candidates(tail: &str) -> Vec<String> {
    let mut out = Vec::new();
    for span in tail.split(['。', '；', ';', '\n']) {
        let span = span.trim();
        if span.is_empty() {
            continue;
        }
        // A "option" longer than a clause is a paragraph, not an option.
        if span.chars().count() > 40 {
            return Vec::new();
        }
        out.push(span.to_string());
    }
    out
}
