//! Error types for contact-fingerprints.
//!
//! Aggregation is all-or-nothing: any of these aborts the run, and every
//! variant carries enough context (source name, line position, offending
//! content) to diagnose the input without re-running.

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for table building, emission, and rendering.
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// A non-comment line that cannot be parsed: too few tab-separated
    /// fields, or a frequency field that is not a number.
    #[error("malformed line {line} in {source_name}: {reason} ({content:?})")]
    MalformedLine {
        source_name: String,
        /// 1-based position within the source.
        line: usize,
        content: String,
        reason: String,
    },

    /// Caller supplied a label list whose length differs from the number
    /// of input sources. Detected before aggregation begins.
    #[error("{labels} column header(s) supplied for {sources} input file(s)")]
    LabelCountMismatch { labels: usize, sources: usize },

    /// An input source could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Source {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Heatmap rendering failed (backend error or nothing to plot).
    #[error("plot error: {0}")]
    Render(String),
}

impl FingerprintError {
    /// Creates a malformed-line error for the given source position.
    pub fn malformed(
        source_name: impl Into<String>,
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FingerprintError::MalformedLine {
            source_name: source_name.into(),
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }
}
