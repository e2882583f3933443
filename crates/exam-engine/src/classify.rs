//! Document format classification.
//!
//! Classification is a hint, not a verdict: the dispatcher tries the
//! classified variant first and cascades through the rest, so a wrong guess
//! costs retries, never a hard failure.

use serde::{Deserialize, Serialize};

use crate::patterns::{
    EMBEDDED_OPTION_GLYPHS, ESSAY_KEYWORDS, GROUP_INSTRUCTION, LOOSE_ANCHOR, OPTION_MARKER,
    QUESTION_ANCHOR, SECTION_HEADER,
};

/// The seven document-format variants, one per extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatTag {
    /// Multi-question groups sharing a passage.
    Comprehensive,
    /// Essay part and test part in one document.
    Mixed,
    /// Options delimited by embedded private-use-area glyphs.
    Embedded,
    /// Written-answer questions only.
    Essay,
    /// Plain multiple choice with letter markers.
    Choice,
    /// Numbered questions with no option markers at all.
    NoLabel,
    /// Last-resort tolerant extraction.
    AiAssisted,
}

/// Static specificity order: more specific formats win ties over generic
/// fallbacks, and the dispatcher retries in this order.
pub const PRIORITY: [FormatTag; 7] = [
    FormatTag::Comprehensive,
    FormatTag::Mixed,
    FormatTag::Embedded,
    FormatTag::Essay,
    FormatTag::Choice,
    FormatTag::NoLabel,
    FormatTag::AiAssisted,
];

impl FormatTag {
    /// Stable identifier recorded in ScanReport diagnostics.
    pub fn id(&self) -> &'static str {
        match self {
            FormatTag::Comprehensive => "comprehensive",
            FormatTag::Mixed => "mixed",
            FormatTag::Embedded => "embedded",
            FormatTag::Essay => "essay",
            FormatTag::Choice => "choice",
            FormatTag::NoLabel => "no_label",
            FormatTag::AiAssisted => "ai_assisted",
        }
    }
}

/// Classification result: one tag plus a confidence in 0..=1. Computed once
/// per document, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatClassification {
    pub tag: FormatTag,
    pub confidence: f32,
}

/// Evidence below this aggregate means the document shows none of the known
/// format signals; classification degrades to AiAssisted.
const MIN_EVIDENCE: f32 = 0.5;

/// Classify raw document text into one format tag.
///
/// Lexical signal densities map to per-tag evidence; highest aggregate wins,
/// ties broken by `PRIORITY`. Confidence is the normalized margin between
/// the top two scores. Never errors: unrecognizable text classifies as
/// AiAssisted with near-zero confidence.
pub fn classify(text: &str) -> FormatClassification {
    let signals = Signals::measure(text);
    let mut scores: Vec<(FormatTag, f32)> = PRIORITY
        .iter()
        .map(|&tag| (tag, signals.evidence(tag)))
        .collect();

    // PRIORITY order + stable sort = specificity tie-break for free.
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (top_tag, top) = scores[0];
    if top < MIN_EVIDENCE {
        return FormatClassification {
            tag: FormatTag::AiAssisted,
            confidence: 0.0,
        };
    }

    let second = scores[1].1;
    let confidence = ((top - second) / top).clamp(0.0, 1.0);
    FormatClassification {
        tag: top_tag,
        confidence,
    }
}

/// Paragraphs averaging more than this many characters read as prose, not
/// itemized test questions.
const PROSE_PARAGRAPH_CHARS: usize = 120;

/// Raw lexical measurements over one document.
struct Signals {
    anchors: usize,
    loose_anchors: usize,
    letter_markers: usize,
    glyph_markers: usize,
    essay_keywords: usize,
    group_instructions: usize,
    section_headers: usize,
    avg_paragraph_len: usize,
}

impl Signals {
    fn measure(text: &str) -> Self {
        let paragraphs: Vec<usize> = text
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.chars().count())
            .collect();
        let avg_paragraph_len = if paragraphs.is_empty() {
            0
        } else {
            paragraphs.iter().sum::<usize>() / paragraphs.len()
        };

        Self {
            anchors: QUESTION_ANCHOR.find_iter(text).count(),
            loose_anchors: LOOSE_ANCHOR.find_iter(text).count(),
            letter_markers: OPTION_MARKER.find_iter(text).count(),
            glyph_markers: text
                .chars()
                .filter(|c| EMBEDDED_OPTION_GLYPHS.iter().any(|(g, _)| g == c))
                .count(),
            essay_keywords: ESSAY_KEYWORDS
                .iter()
                .map(|kw| text.matches(kw).count())
                .sum(),
            group_instructions: GROUP_INSTRUCTION.find_iter(text).count(),
            section_headers: SECTION_HEADER.find_iter(text).count(),
            avg_paragraph_len,
        }
    }

    fn evidence(&self, tag: FormatTag) -> f32 {
        match tag {
            FormatTag::Comprehensive => self.group_instructions as f32 * 3.0,
            FormatTag::Mixed => {
                let mut e = self.section_headers as f32 * 2.5;
                if self.essay_keywords > 0 && self.letter_markers > 0 {
                    e += 1.0;
                }
                e
            }
            FormatTag::Embedded => {
                let mut e = (self.glyph_markers as f32 * 0.5).min(6.0);
                if e > 0.0 && self.anchors > 0 {
                    e += 0.5;
                }
                e
            }
            FormatTag::Essay => {
                let mut e = self.essay_keywords as f32 * 1.2;
                if e > 0.0
                    && self.anchors + self.loose_anchors > 0
                    && self.letter_markers == 0
                    && self.glyph_markers == 0
                {
                    e += 0.5;
                }
                // Long prose paragraphs without option markers read as
                // written-answer material.
                if e > 0.0
                    && self.letter_markers == 0
                    && self.avg_paragraph_len > PROSE_PARAGRAPH_CHARS
                {
                    e += 0.5;
                }
                e
            }
            FormatTag::Choice => {
                if self.anchors > 0 && self.letter_markers >= 2 {
                    let per_question = self.letter_markers as f32 / (self.anchors as f32 * 2.0);
                    1.0 + per_question.min(2.0)
                } else {
                    0.0
                }
            }
            FormatTag::NoLabel => {
                if (self.anchors > 0 || self.loose_anchors > 1)
                    && self.letter_markers == 0
                    && self.glyph_markers == 0
                    && self.essay_keywords == 0
                {
                    1.5
                } else {
                    0.0
                }
            }
            // Permissive baseline: always a candidate, never the favorite.
            FormatTag::AiAssisted => 0.1,
        }
    }
}
