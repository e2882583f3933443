//! Completeness tracking for one extraction attempt.

use std::collections::{BTreeMap, BTreeSet};

use shared_types::ScanReport;

/// Registers every question number an extractor attempt produced and reports
/// duplicates and gaps. Scoped to one attempt; the dispatcher builds a fresh
/// tracker per candidate.
#[derive(Debug, Default)]
pub struct ScanTracker {
    /// First registration wins; later duplicates are diagnostic only.
    first_registration: BTreeMap<u32, String>,
    duplicates: BTreeSet<u32>,
}

impl ScanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a question number. A second registration of the same number
    /// is recorded as a duplicate and does not overwrite the first writer.
    pub fn register(&mut self, number: u32, extractor_id: &str) {
        if self.first_registration.contains_key(&number) {
            self.duplicates.insert(number);
        } else {
            self.first_registration
                .insert(number, extractor_id.to_string());
        }
    }

    pub fn registered_count(&self) -> usize {
        self.first_registration.len()
    }

    /// Freeze the attempt into a report. Missing numbers are computed
    /// against `1..=expected_count` when known, else `1..=max(registered)`.
    /// Idempotent and side-effect-free; callable once per candidate pass.
    pub fn finalize(&self, expected_count: Option<u32>) -> ScanReport {
        let registered: BTreeSet<u32> = self.first_registration.keys().copied().collect();

        let upper = expected_count.or_else(|| registered.iter().next_back().copied());
        let missing: BTreeSet<u32> = match upper {
            Some(max) => (1..=max).filter(|n| !registered.contains(n)).collect(),
            None => BTreeSet::new(),
        };

        let is_complete =
            !registered.is_empty() && missing.is_empty() && self.duplicates.is_empty();

        ScanReport {
            expected_count,
            registered,
            duplicates: self.duplicates.clone(),
            missing,
            extractor_per_number: self.first_registration.clone(),
            warnings: Vec::new(),
            is_complete,
        }
    }
}
