//! Extractor dispatch: a ranked, verifiable competition among the variants.
//!
//! Rather than trusting the classifier's single guess, every candidate is
//! scored on two document-independent signals: registration completeness and
//! structural text quality. The first candidate passing both wins; failing
//! that, the largest partial result is returned rather than discarded.

use shared_types::{QuestionRecord, ScanReport};

use crate::classify::{FormatClassification, FormatTag, PRIORITY};
use crate::patterns::MIN_STRUCTURAL_SCORE;
use crate::quality;
use crate::tracker::ScanTracker;
use crate::variants;

/// Run extraction candidates in order until one is complete and structurally
/// sound, falling back to the best remaining candidate otherwise. The
/// fallback report keeps the tracker's completeness verdict, so a short but
/// gap-free document is never reported incomplete.
pub fn dispatch(
    text: &str,
    classification: &FormatClassification,
    expected_count: Option<u32>,
) -> (Vec<QuestionRecord>, ScanReport) {
    let mut best: Option<(Vec<QuestionRecord>, ScanReport, f32)> = None;

    for tag in candidate_order(classification.tag) {
        let mut warnings = Vec::new();
        let records = variants::run(tag, text, &mut warnings);

        let mut tracker = ScanTracker::new();
        for record in &records {
            tracker.register(record.number, tag.id());
        }
        let mut report = tracker.finalize(expected_count);
        report.warnings = warnings;

        let score = structural_score(&records);
        tracing::debug!(
            variant = tag.id(),
            registered = report.registered.len(),
            complete = report.is_complete,
            score,
            "evaluated extraction candidate"
        );

        if report.is_complete && score > MIN_STRUCTURAL_SCORE {
            return (records, report);
        }

        // Best-effort ranking: a complete pass beats any partial one, then
        // larger registered sets, then higher structural score.
        let improves = match &best {
            None => !records.is_empty(),
            Some((_, best_report, best_score)) => {
                (report.is_complete, report.registered.len(), score)
                    > (
                        best_report.is_complete,
                        best_report.registered.len(),
                        *best_score,
                    )
            }
        };
        if improves {
            best = Some((records, report, score));
        }
    }

    // The report keeps the tracker's completeness verdict: a complete pass
    // that only missed the quality gate is still complete.
    match best {
        Some((records, report, _)) => (records, report),
        None => (Vec::new(), ScanReport::empty(expected_count)),
    }
}

/// Candidate order: the classified variant first, then the remaining six in
/// static specificity order.
pub fn candidate_order(first: FormatTag) -> Vec<FormatTag> {
    let mut order = vec![first];
    order.extend(PRIORITY.iter().copied().filter(|&tag| tag != first));
    order
}

/// Structural score of an extraction result: the records are rendered back
/// into canonical exam text (anchors and letter markers restored) and scored
/// by the shared text-quality scorer.
pub fn structural_score(records: &[QuestionRecord]) -> f32 {
    if records.is_empty() {
        return 0.0;
    }
    let mut rendered = String::new();
    for record in records {
        rendered.push_str(&format!("第{}題 {}", record.number, record.prompt));
        for (i, option) in record.options.iter().enumerate() {
            let label = (b'A' + i as u8) as char;
            rendered.push_str(&format!("（{}）{}", label, option));
        }
        rendered.push('\n');
    }
    quality::score(&rendered)
}
