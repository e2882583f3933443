//! The extractor variant family.
//!
//! Seven interchangeable strategies, one per document format. Each exposes
//! `extract(text, warnings) -> Vec<QuestionRecord>`: never errors, skips
//! malformed spans with a warning, and produces the same record shape so the
//! dispatcher can compare outputs across variants.

pub mod ai_assisted;
pub mod choice;
pub mod comprehensive;
pub mod embedded;
pub mod essay;
pub mod mixed;
pub mod no_label;

use shared_types::{QuestionKind, QuestionRecord};

use crate::classify::FormatTag;
use crate::enrich;

/// Run the variant matching `tag`. Total over the enum, so candidate
/// ordering in the dispatcher is a plain testable function.
pub fn run(tag: FormatTag, text: &str, warnings: &mut Vec<String>) -> Vec<QuestionRecord> {
    match tag {
        FormatTag::Comprehensive => comprehensive::extract(text, warnings),
        FormatTag::Mixed => mixed::extract(text, warnings),
        FormatTag::Embedded => embedded::extract(text, warnings),
        FormatTag::Essay => essay::extract(text, warnings),
        FormatTag::Choice => choice::extract(text, warnings),
        FormatTag::NoLabel => no_label::extract(text, warnings),
        FormatTag::AiAssisted => ai_assisted::extract(text, warnings),
    }
}

/// Assemble one record, deriving category and difficulty, and enforce the
/// record invariants. A span failing them is dropped from the variant's
/// output and logged as a warning, never an error.
pub(crate) fn build_record(
    number: u32,
    prompt: String,
    options: Vec<String>,
    kind: QuestionKind,
    group_range: Option<(u32, u32)>,
    warnings: &mut Vec<String>,
) -> Option<QuestionRecord> {
    let category = enrich::categorize(&prompt, group_range.is_some());
    let difficulty = enrich::difficulty(&prompt, &options);
    let record = QuestionRecord {
        number,
        prompt,
        options,
        kind,
        category,
        difficulty,
        group_range,
    };

    if record.satisfies_invariants() {
        Some(record)
    } else {
        tracing::warn!(number, "dropped malformed question span");
        warnings.push(format!("question {}: dropped malformed span", number));
        None
    }
}
