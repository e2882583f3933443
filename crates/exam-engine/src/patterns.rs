//! Lexical pattern tables shared by every extractor variant.
//!
//! All anchors, option markers, group-instruction phrases, keyword lists and
//! scoring weights live here and only here. Variants look patterns up through
//! this module instead of carrying private copies, so recalibration is a
//! single-point change.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Standard question anchor: 第N題 with ASCII or fullwidth digits.
    pub static ref QUESTION_ANCHOR: Regex =
        Regex::new(r"第\s*([0-9０-９]{1,3})\s*題").unwrap();

    /// Loose numeric anchor at line start: "12." / "12、" / "１２．".
    /// Only NoLabel and AIAssisted consult this.
    pub static ref LOOSE_ANCHOR: Regex =
        Regex::new(r"(?m)^[ \t　]*([0-9０-９]{1,3})\s*[.、．]").unwrap();

    /// Parenthesized option marker: (A)〜(D), ASCII or fullwidth.
    pub static ref OPTION_MARKER: Regex =
        Regex::new(r"[(（]\s*([A-DＡ-Ｄ])\s*[)）]").unwrap();

    /// Multi-question group instruction: 請依下文回答第X題至第Y題.
    pub static ref GROUP_INSTRUCTION: Regex =
        Regex::new(r"請依下文回答第\s*([0-9０-９]{1,3})\s*(?:題)?\s*至\s*(?:第)?\s*([0-9０-９]{1,3})\s*題").unwrap();

    /// Superset of group phrasings accepted by the AIAssisted variant:
    /// 依上文/下文, 請回答第X至Y題, ranges joined by 至/到/~.
    pub static ref GROUP_INSTRUCTION_WIDE: Regex =
        Regex::new(r"(?:請)?(?:依[上下]文)?回答第\s*([0-9０-９]{1,3})\s*(?:題)?\s*[至到~～]\s*(?:第)?\s*([0-9０-９]{1,3})\s*題").unwrap();

    /// Section header splitting mixed essay/test documents:
    /// 甲、申論題部分 / 乙、測驗題部分 and close variants.
    pub static ref SECTION_HEADER: Regex =
        Regex::new(r"(?m)^[ \t　]*[甲乙丙]\s*[、.．]\s*(申論題|問答題|測驗題|選擇題)").unwrap();

    /// Answer-key row: 第1題 A / 1. B / １：Ｃ, or an annulment note.
    pub static ref ANSWER_ROW: Regex =
        Regex::new(r"(?:第\s*)?([0-9０-９]{1,3})\s*(?:題)?\s*[:：.、．]?\s*([A-DＡ-Ｄ]|送分|一律給分|均給分)").unwrap();
}

/// Essay-instruction keywords signalling a written-answer question.
pub const ESSAY_KEYWORDS: &[&str] = &[
    "申論",
    "試述",
    "試說明",
    "試申論",
    "試分析",
    "試評論",
    "請說明",
    "請論述",
    "請敘述",
    "簡答",
];

/// Private-use-area glyphs some embedded-blank exam PDFs use in place of
/// (A)-(D) markers. The codepoints are implementation-defined per source
/// font; they are opaque tokens resolved only through this table.
pub const EMBEDDED_OPTION_GLYPHS: &[(char, char)] = &[
    ('\u{E18C}', 'A'),
    ('\u{E18D}', 'B'),
    ('\u{E18E}', 'C'),
    ('\u{E18F}', 'D'),
];

/// Keyword tables feeding category derivation. First table to match wins,
/// in this order.
pub const CATEGORY_TABLE: &[(&str, &[&str])] = &[
    (
        "Law",
        &[
            "法律", "憲法", "刑法", "民法", "行政法", "法規", "法院", "訴訟", "條文", "法條",
        ],
    ),
    (
        "Reading Comprehension",
        &["依下文", "依上文", "閱讀", "短文", "下列文章", "本文"],
    ),
    (
        "Mathematics",
        &["計算", "機率", "平均", "百分比", "面積", "速率", "數列"],
    ),
    (
        "Civics",
        &["公民", "政府", "選舉", "民主", "政策", "行政機關", "立法院"],
    ),
];

/// Negation phrasing that tends to mark harder questions.
pub const NEGATION_KEYWORDS: &[&str] = &["何者錯誤", "何者非", "不正確", "不包括", "何者不"];

// ============================================================================
// Scoring constants (single source of truth)
// ============================================================================

/// Text-quality weight: length adequacy.
pub const LENGTH_WEIGHT: f32 = 0.30;
/// Text-quality weight: character validity.
pub const CHAR_VALIDITY_WEIGHT: f32 = 0.30;
/// Text-quality weight: structural completeness.
pub const STRUCTURE_WEIGHT: f32 = 0.25;
/// Text-quality weight: format plausibility.
pub const FORMAT_WEIGHT: f32 = 0.15;

/// Character count at which length adequacy saturates.
pub const LENGTH_TARGET_CHARS: usize = 300;

/// Minimum structural score the dispatcher accepts without falling back.
pub const MIN_STRUCTURAL_SCORE: f32 = 0.6;

/// How far (in chars) the essay variant looks past an anchor for option
/// markers before treating the question as essay-form.
pub const ESSAY_LOOKAHEAD_CHARS: usize = 80;

/// Wider lookahead used by the AIAssisted variant for group boundaries.
pub const WIDE_LOOKAHEAD_CHARS: usize = 200;

// ============================================================================
// Text helpers
// ============================================================================

/// Parse a question number that may use fullwidth digits.
pub fn parse_exam_number(raw: &str) -> Option<u32> {
    let mut value: u32 = 0;
    let mut seen = false;
    for c in raw.trim().chars() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '０'..='９' => c as u32 - '０' as u32,
            _ => return None,
        };
        value = value.checked_mul(10)?.checked_add(digit)?;
        seen = true;
    }
    if seen && value > 0 {
        Some(value)
    } else {
        None
    }
}

/// Map an option label (ASCII or fullwidth letter, or an embedded glyph) to
/// its canonical ASCII letter A-D.
pub fn canonical_option_label(c: char) -> Option<char> {
    match c {
        'A'..='D' => Some(c),
        'Ａ'..='Ｄ' => Some((b'A' + (c as u32 - 'Ａ' as u32) as u8) as char),
        _ => EMBEDDED_OPTION_GLYPHS
            .iter()
            .find(|(glyph, _)| *glyph == c)
            .map(|(_, label)| *label),
    }
}

/// Normalize a span for output: strip control characters, collapse runs of
/// whitespace to a single space, trim.
pub fn normalize_span(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c.is_control() || c == '\u{FFFD}' {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Prefix of `s` holding at most `n` chars, on a char boundary.
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
