//! Last-resort tolerant extraction: a superset of every other variant's
//! anchor patterns, wider group phrasing, and a per-question cascade through
//! all option-marker styles. Tried when nothing more specific succeeds.

use std::collections::BTreeSet;

use shared_types::{QuestionKind, QuestionRecord};

use super::no_label;
use crate::extract::{anchor, option};
use crate::patterns::{
    normalize_span, parse_exam_number, ESSAY_KEYWORDS, GROUP_INSTRUCTION_WIDE,
    WIDE_LOOKAHEAD_CHARS,
};

pub fn extract(text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    let mut instruction_spans = Vec::new();
    let mut ranges = Vec::new();
    for caps in GROUP_INSTRUCTION_WIDE.captures_iter(text) {
        if let (Some(whole), Some(first), Some(last)) = (
            caps.get(0),
            parse_exam_number(&caps[1]),
            parse_exam_number(&caps[2]),
        ) {
            if first <= last {
                instruction_spans.push((whole.start(), whole.end()));
                ranges.push((first, last));
            }
        }
    }

    // Anchor superset: standard 第N題 anchors (instruction phrases masked),
    // plus loose line-start anchors for numbers nothing else found.
    let mut anchors = anchor::scan_anchors_excluding(text, &instruction_spans);
    let known: BTreeSet<u32> = anchors.iter().map(|a| a.number).collect();
    for loose in anchor::scan_loose_anchors(text) {
        if !known.contains(&loose.number) {
            anchors.push(loose);
        }
    }
    anchors.sort_by_key(|a| a.start);

    let mut records = Vec::new();
    for (number, region) in anchor::regions(text, &anchors) {
        let group_range = ranges
            .iter()
            .find(|&&(first, last)| number >= first && number <= last)
            .copied();

        let (prompt, options, kind) = interpret_region(region);
        if let Some(record) =
            super::build_record(number, prompt, options, kind, group_range, warnings)
        {
            records.push(record);
        }
    }

    records
}

/// Cascade through marker styles: letter markers, embedded glyphs, essay
/// keywords, then the positional split. An undecidable region stays a bare
/// Unknown prompt rather than guessing.
fn interpret_region(region: &str) -> (String, Vec<String>, QuestionKind) {
    let letter = option::split_letter_options(region);
    if non_empty(&letter.options) >= 2 {
        return (letter.stem, letter.options, QuestionKind::Choice);
    }

    let glyph = option::split_glyph_options(region);
    if non_empty(&glyph.options) >= 2 {
        return (glyph.stem, glyph.options, QuestionKind::Choice);
    }

    if !option::has_letter_marker_within(region, WIDE_LOOKAHEAD_CHARS)
        && ESSAY_KEYWORDS.iter().any(|kw| region.contains(kw))
    {
        return (normalize_span(region), Vec::new(), QuestionKind::Essay);
    }

    let (stem_raw, tail) = no_label::split_stem(region);
    let candidates = no_label::option_candidates(tail);
    if (2..=4).contains(&candidates.len()) {
        return (normalize_span(stem_raw), candidates, QuestionKind::Choice);
    }

    (normalize_span(region), Vec::new(), QuestionKind::Unknown)
}

fn non_empty(options: &[String]) -> usize {
    options.iter().filter(|o| !o.trim().is_empty()).count()
}
