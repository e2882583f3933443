//! Question anchor scanning.

use crate::patterns::{parse_exam_number, LOOSE_ANCHOR, QUESTION_ANCHOR};

/// One question anchor found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Question number the anchor names.
    pub number: u32,
    /// Byte offset where the anchor token starts.
    pub start: usize,
    /// Byte offset just past the anchor token; the question body follows.
    pub body_start: usize,
}

/// Scan standard 第N題 anchors in document order.
pub fn scan_anchors(text: &str) -> Vec<Anchor> {
    scan_anchors_excluding(text, &[])
}

/// Scan standard anchors, skipping matches inside the given byte spans.
/// Used to keep 第X題/第Y題 inside a group-instruction phrase from being
/// mistaken for question starts.
pub fn scan_anchors_excluding(text: &str, excluded: &[(usize, usize)]) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    for caps in QUESTION_ANCHOR.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if excluded
            .iter()
            .any(|&(s, e)| whole.start() >= s && whole.end() <= e)
        {
            continue;
        }
        if let Some(number) = parse_exam_number(&caps[1]) {
            anchors.push(Anchor {
                number,
                start: whole.start(),
                body_start: whole.end(),
            });
        }
    }
    anchors
}

/// Scan loose line-start anchors ("12." / "12、"). Only the NoLabel and
/// AIAssisted variants trust these.
pub fn scan_loose_anchors(text: &str) -> Vec<Anchor> {
    let mut anchors = Vec::new();
    for caps in LOOSE_ANCHOR.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if let Some(number) = parse_exam_number(&caps[1]) {
            anchors.push(Anchor {
                number,
                start: whole.start(),
                body_start: whole.end(),
            });
        }
    }
    anchors
}

/// Slice the body region of each anchor: from past the anchor token to the
/// start of the next anchor, or document end for the last one.
pub fn regions<'a>(text: &'a str, anchors: &[Anchor]) -> Vec<(u32, &'a str)> {
    let mut out = Vec::with_capacity(anchors.len());
    for (i, anchor) in anchors.iter().enumerate() {
        let end = anchors
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(text.len());
        if anchor.body_start <= end {
            out.push((anchor.number, &text[anchor.body_start..end]));
        }
    }
    out
}
