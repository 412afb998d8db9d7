//! Error types for the resume-parser library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ResumeParserError`]: **Fatal** for one call: the document (or the
//!   batch input) cannot be processed at all (empty path, missing file,
//!   corrupt PDF, pdfium not loadable). Returned as `Err(ResumeParserError)`.
//!
//! * [`RecoverableError`]: **Non-fatal**: a single page or a single field
//!   failed, but the rest of the document is fine. Never returned to the
//!   caller; it is handed to the [`crate::observer::ParseObserver`] and the
//!   failed piece contributes empty text or an absent value.

use crate::output::Field;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the resume-parser library.
///
/// Page- and field-level failures use [`RecoverableError`] and never
/// propagate here.
#[derive(Debug, Error)]
pub enum ResumeParserError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The caller passed an empty or whitespace-only path.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    NotFound { path: PathBuf },

    /// The file exists but could not be opened or parsed as a PDF.
    #[error("Failed to extract text from '{path}': {detail}")]
    Document { path: PathBuf, detail: String },

    /// The batch input path does not exist or is not a directory.
    #[error("Input directory '{path}' is not usable: {reason}")]
    InputDirectory { path: PathBuf, reason: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV writer rejected a record.
    #[error("Failed to write CSV output: {0}")]
    CsvWrite(#[from] csv::Error),

    /// The JSON serialiser rejected the records.
    #[error("Failed to write JSON output: {0}")]
    JsonWrite(#[from] serde_json::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or keyword-file validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Install libpdfium system-wide (e.g. /usr/lib/libpdfium.so).\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (or its directory).\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResumeParserError {
    /// True for errors caused by the caller rather than by document content.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ResumeParserError::InvalidArgument { .. })
    }
}

/// A non-fatal error for a single page or field.
///
/// Reported to the observer; the page contributes empty text and the field
/// is left absent.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum RecoverableError {
    /// Text extraction failed for one page.
    #[error("Page {page}: text extraction failed: {detail}")]
    PageExtraction { page: usize, detail: String },

    /// A field heuristic failed.
    #[error("{field} extraction failed: {detail}")]
    FieldExtraction { field: Field, detail: String },
}
