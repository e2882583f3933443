use std::collections::{BTreeMap, BTreeSet};

/// What shape of answer a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuestionKind {
    /// Multiple choice with labeled options (A-D).
    Choice,
    /// Free-form written answer, no options.
    Essay,
    /// Numbered question whose shape could not be determined.
    Unknown,
}

/// Derived difficulty estimate. Heuristic only, never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One extracted exam question.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuestionRecord {
    /// 1-based question number; unique within a successful extraction and
    /// immutable once assigned by an extractor.
    pub number: u32,
    /// Normalized question stem (control characters stripped, whitespace
    /// collapsed). Never empty.
    pub prompt: String,
    /// Labeled options A-D in order. Empty for essay questions; at most 4.
    pub options: Vec<String>,
    pub kind: QuestionKind,
    /// Lexical topic tag, e.g. "Law" or "Reading Comprehension". Derived.
    pub category: String,
    pub difficulty: Difficulty,
    /// Set when the question shares a passage with sibling numbers.
    pub group_range: Option<(u32, u32)>,
}

impl QuestionRecord {
    pub fn is_group_member(&self) -> bool {
        self.group_range.is_some()
    }

    /// Record invariants checked before a record may be counted as scanned:
    /// non-empty prompt, at most 4 options, and a Choice record carries at
    /// least 2 non-empty options.
    pub fn satisfies_invariants(&self) -> bool {
        if self.prompt.trim().is_empty() || self.options.len() > 4 {
            return false;
        }
        match self.kind {
            QuestionKind::Choice => {
                self.options.iter().filter(|o| !o.trim().is_empty()).count() >= 2
            }
            QuestionKind::Essay | QuestionKind::Unknown => true,
        }
    }
}

/// Answer key: question number to answer letter (A-D) or free text.
pub type AnswerMap = BTreeMap<u32, String>;

/// The two provenance tiers an answer key can come from. Only the merged
/// mapping is retained downstream; provenance stays diagnostic.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct AnswerSources {
    /// Key as originally published with the exam.
    pub original: AnswerMap,
    /// Officially revised key superseding the original, when one exists.
    pub corrected: AnswerMap,
}

/// Completeness report for one document extraction. Created at the start of
/// a document's extraction, finalized when the dispatcher stops retrying.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScanReport {
    /// Question count known a priori (table of contents, page heuristic).
    pub expected_count: Option<u32>,
    /// Every question number registered exactly once.
    pub registered: BTreeSet<u32>,
    /// Numbers an extractor produced more than once.
    pub duplicates: BTreeSet<u32>,
    /// Gaps relative to 1..=max(registered), or 1..=expected_count when known.
    pub missing: BTreeSet<u32>,
    /// Which extractor variant produced each registered number.
    pub extractor_per_number: BTreeMap<u32, String>,
    /// Malformed spans dropped during extraction.
    pub warnings: Vec<String>,
    /// True iff at least one number registered, no gaps, no duplicates.
    pub is_complete: bool,
}

impl ScanReport {
    /// Report for a document where every extraction attempt came back empty.
    pub fn empty(expected_count: Option<u32>) -> Self {
        let missing = match expected_count {
            Some(n) => (1..=n).collect(),
            None => BTreeSet::new(),
        };
        Self {
            expected_count,
            registered: BTreeSet::new(),
            duplicates: BTreeSet::new(),
            missing,
            extractor_per_number: BTreeMap::new(),
            warnings: Vec::new(),
            is_complete: false,
        }
    }
}
