//! Upstream text-backend seam.
//!
//! Raw text extraction (PDF readers, OCR fallback) lives outside this crate.
//! The pipeline only needs a string per document; a failing backend degrades
//! to the empty string so classification falls through to the permissive
//! AIAssisted variant instead of aborting.

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("text backend failed: {0}")]
    Backend(String),
}

/// A raw-text backend. Implementations may race multiple PDF readers and an
/// OCR fallback internally; the contract here is only that success yields
/// the document text (possibly empty) for the first `max_pages` pages.
pub trait RawTextSource {
    fn extract_raw_text(&self, path: &Path, max_pages: Option<u32>)
        -> Result<String, SourceError>;
}

/// Runs every registered backend and keeps the text the quality scorer
/// rates highest. Backend errors only disqualify that backend; the chain
/// errors out when no backend produced any text at all.
#[derive(Default)]
pub struct BackendChain {
    backends: Vec<(String, Box<dyn RawTextSource>)>,
}

impl BackendChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(
        mut self,
        name: impl Into<String>,
        backend: impl RawTextSource + 'static,
    ) -> Self {
        self.backends.push((name.into(), Box::new(backend)));
        self
    }
}

impl RawTextSource for BackendChain {
    fn extract_raw_text(
        &self,
        path: &Path,
        max_pages: Option<u32>,
    ) -> Result<String, SourceError> {
        let mut best: Option<(f32, String)> = None;

        for (name, backend) in &self.backends {
            match backend.extract_raw_text(path, max_pages) {
                Ok(text) => {
                    let score = crate::quality::score(&text);
                    tracing::debug!(backend = %name, score, chars = text.chars().count());
                    if best.as_ref().map_or(true, |(s, _)| score > *s) {
                        best = Some((score, text));
                    }
                }
                Err(err) => {
                    tracing::warn!(backend = %name, %err, "text backend failed");
                }
            }
        }

        match best {
            Some((_, text)) => Ok(text),
            None => Err(SourceError::Backend(format!(
                "all {} backends failed for {}",
                self.backends.len(),
                path.display()
            ))),
        }
    }
}
