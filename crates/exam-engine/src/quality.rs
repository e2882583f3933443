//! Text quality scoring.
//!
//! One scorer serves two callers: ranking the output of competing raw-text
//! backends, and ranking competing extractor-variant results inside the
//! dispatcher. Pure and deterministic: identical input always yields an
//! identical score.

use crate::patterns::{
    CHAR_VALIDITY_WEIGHT, FORMAT_WEIGHT, LENGTH_TARGET_CHARS, LENGTH_WEIGHT, OPTION_MARKER,
    QUESTION_ANCHOR, STRUCTURE_WEIGHT,
};

/// Score a text block on a 0..=1 scale.
///
/// Weighted combination: length adequacy, character validity (replacement
/// and control characters penalized, runs doubly so), structural
/// completeness (question anchors and option markers present), format
/// plausibility (printable-to-total ratio).
pub fn score(text: &str) -> f32 {
    if text.trim().is_empty() {
        return 0.0;
    }

    LENGTH_WEIGHT * length_adequacy(text)
        + CHAR_VALIDITY_WEIGHT * character_validity(text)
        + STRUCTURE_WEIGHT * structural_completeness(text)
        + FORMAT_WEIGHT * format_plausibility(text)
}

/// Saturates at `LENGTH_TARGET_CHARS`; shorter texts score proportionally.
fn length_adequacy(text: &str) -> f32 {
    let chars = text.chars().count();
    (chars as f32 / LENGTH_TARGET_CHARS as f32).min(1.0)
}

/// 1.0 for clean text, dropping with the share of replacement/control
/// characters. A run of 3+ bad characters (typical of a failed decode)
/// costs extra.
fn character_validity(text: &str) -> f32 {
    let mut total = 0usize;
    let mut bad = 0usize;
    let mut run = 0usize;
    let mut long_runs = 0usize;

    for c in text.chars() {
        total += 1;
        if c == '\u{FFFD}' || (c.is_control() && !c.is_whitespace()) {
            bad += 1;
            run += 1;
            if run == 3 {
                long_runs += 1;
            }
        } else {
            run = 0;
        }
    }

    if total == 0 {
        return 0.0;
    }
    let bad_ratio = bad as f32 / total as f32;
    let run_penalty = (long_runs as f32 * 0.1).min(0.5);
    (1.0 - bad_ratio * 4.0 - run_penalty).clamp(0.0, 1.0)
}

/// Expected exam markers: question anchors carry most of the weight, option
/// markers the rest.
fn structural_completeness(text: &str) -> f32 {
    let anchors = QUESTION_ANCHOR.find_iter(text).count();
    let markers = OPTION_MARKER.find_iter(text).count();

    let anchor_part = (anchors as f32 / 5.0).min(1.0) * 0.6;
    let marker_part = (markers as f32 / 8.0).min(1.0) * 0.4;
    anchor_part + marker_part
}

/// Ratio of printable characters to total.
fn format_plausibility(text: &str) -> f32 {
    let mut total = 0usize;
    let mut printable = 0usize;
    for c in text.chars() {
        total += 1;
        if !c.is_control() || c.is_whitespace() {
            printable += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        printable as f32 / total as f32
    }
}
