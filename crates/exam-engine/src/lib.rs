//! Exam document extraction engine.
//!
//! Turns wildly inconsistent exam layouts (pure choice, pure essay, mixed,
//! embedded-glyph options, passage-sharing question groups) into one
//! canonical record shape, with per-number completeness accounting and an
//! answer key merged from original and corrected sources.
//!
//! The pipeline never aborts on document content: every degraded outcome is
//! data (a non-complete ScanReport, an empty record list), so batch callers
//! always receive an inspectable result.

pub mod answers;
pub mod classify;
pub mod dispatch;
pub mod enrich;
pub mod extract;
pub mod patterns;
pub mod quality;
pub mod source;
pub mod tracker;
pub mod variants;

use std::path::Path;

use shared_types::{AnswerMap, AnswerSources, QuestionRecord, ScanReport};

pub use classify::{FormatClassification, FormatTag};
pub use source::{BackendChain, RawTextSource, SourceError};
pub use tracker::ScanTracker;

/// Everything one document's extraction produces, handed by value to
/// downstream consumers (CSV and script generators serialize it as is).
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExtractionOutcome {
    pub records: Vec<QuestionRecord>,
    /// Final merged answer key; empty when no key document was available.
    pub answers: AnswerMap,
    /// Provenance tiers kept for diagnostics only.
    pub answer_sources: AnswerSources,
    pub report: ScanReport,
    pub classification: FormatClassification,
    /// Unix timestamp of the extraction run.
    pub extracted_at: u64,
}

/// ExtractionPipeline entry point: classify, dispatch across extractor
/// variants, merge answer keys. One instance per document run; instances
/// share no mutable state, so documents may be processed concurrently.
pub struct ExtractionPipeline;

impl ExtractionPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Extract questions from already-obtained document text.
    pub fn run(&self, text: &str, expected_count: Option<u32>) -> ExtractionOutcome {
        self.run_with_answers(text, None, None, expected_count)
    }

    /// Extract questions and merge the answer key documents, when available.
    pub fn run_with_answers(
        &self,
        text: &str,
        original_key_text: Option<&str>,
        corrected_key_text: Option<&str>,
        expected_count: Option<u32>,
    ) -> ExtractionOutcome {
        let classification = classify::classify(text);
        let (records, report) = dispatch::dispatch(text, &classification, expected_count);

        let original = original_key_text
            .map(answers::parse_answer_key)
            .unwrap_or_default();
        let corrected = corrected_key_text
            .map(answers::parse_answer_key)
            .unwrap_or_default();
        let merged = answers::merge(&original, &corrected);

        if records.is_empty() {
            tracing::warn!("extraction produced no records");
        }

        ExtractionOutcome {
            records,
            answers: merged,
            answer_sources: AnswerSources {
                original,
                corrected,
            },
            report,
            classification,
            extracted_at: chrono::Utc::now().timestamp() as u64,
        }
    }

    /// Convenience over a raw-text backend. A failing backend degrades to
    /// the empty string (classified AiAssisted, empty result) rather than
    /// propagating an error.
    pub fn run_document<S: RawTextSource>(
        &self,
        source: &S,
        path: &Path,
        max_pages: Option<u32>,
        expected_count: Option<u32>,
    ) -> ExtractionOutcome {
        let text = match source.extract_raw_text(path, max_pages) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "text backend failed");
                String::new()
            }
        };
        self.run(&text, expected_count)
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_runs_end_to_end() {
        let text: String = (1..=3)
            .map(|n| {
                format!(
                    "第{}題 下列有關行政處分之敘述，何者正確？\
                     (A)選項甲 (B)選項乙 (C)選項丙 (D)選項丁\n",
                    n
                )
            })
            .collect();
        let outcome = ExtractionPipeline::new().run(&text, None);
        assert_eq!(outcome.records.len(), 3);
        assert!(outcome.report.is_complete);
        assert_eq!(outcome.classification.tag, FormatTag::Choice);
        assert!(outcome.answers.is_empty());
    }

    #[test]
    fn test_pipeline_merges_answer_keys() {
        let text = "第1題 何者正確？(A)甲 (B)乙\n第2題 何者錯誤？(A)丙 (B)丁\n";
        let outcome = ExtractionPipeline::new().run_with_answers(
            text,
            Some("第1題 A\n第2題 B\n"),
            Some("第2題 C\n"),
            None,
        );
        assert_eq!(outcome.answers[&1], "A");
        assert_eq!(outcome.answers[&2], "C");
        assert_eq!(outcome.answer_sources.original[&2], "B");
    }

    #[test]
    fn test_outcome_serializes_to_json() {
        let outcome = ExtractionPipeline::new()
            .run("第1題 何者正確？(A)甲 (B)乙 (C)丙 (D)丁\n", None);
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"records\""));
        assert!(json.contains("\"is_complete\""));
    }

    #[test]
    fn test_failing_backend_degrades_to_empty_outcome() {
        struct BrokenSource;
        impl RawTextSource for BrokenSource {
            fn extract_raw_text(
                &self,
                _path: &Path,
                _max_pages: Option<u32>,
            ) -> Result<String, SourceError> {
                Err(SourceError::Backend("reader crashed".to_string()))
            }
        }

        let outcome = ExtractionPipeline::new().run_document(
            &BrokenSource,
            Path::new("missing.pdf"),
            None,
            None,
        );
        assert!(outcome.records.is_empty());
        assert!(!outcome.report.is_complete);
        assert_eq!(outcome.classification.tag, FormatTag::AiAssisted);
    }
}
