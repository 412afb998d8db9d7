//! Per-document orchestration: extract → normalise → parse → annotate.
//!
//! [`ResumePipeline::process_resume`] is the forgiving entry point: a
//! missing or corrupt document simply yields `Ok(None)`. Only a malformed
//! call (empty path) is an error, since that is a caller bug rather than
//! bad input. [`ResumePipeline::try_process_resume`] returns document
//! errors as well, for callers (like the batch driver) that want the reason.

use crate::config::ParserConfig;
use crate::error::ResumeParserError;
use crate::observer::SharedObserver;
use crate::output::{FieldSet, ResumeRecord};
use crate::pipeline::extract::{validate_path, PdfiumTextExtractor, TextExtractor};
use crate::pipeline::normalize::clean_text;
use crate::pipeline::parser::ResumeParser;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// The full single-document pipeline.
///
/// Generic over the text source so it can be driven by something other than
/// pdfium; [`ResumePipeline::new`] uses [`PdfiumTextExtractor`].
pub struct ResumePipeline<E = PdfiumTextExtractor> {
    extractor: E,
    parser: ResumeParser,
    observer: SharedObserver,
    config: ParserConfig,
}

impl ResumePipeline<PdfiumTextExtractor> {
    /// Build a pdfium-backed pipeline.
    pub fn new(config: ParserConfig) -> Self {
        Self::with_extractor(config, PdfiumTextExtractor)
    }
}

impl<E: TextExtractor> ResumePipeline<E> {
    /// Build a pipeline over a custom text source.
    pub fn with_extractor(config: ParserConfig, extractor: E) -> Self {
        let observer = config.resolve_observer();
        let parser = ResumeParser::new(config.keywords.clone(), observer.clone());
        Self {
            extractor,
            parser,
            observer,
            config,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn observer(&self) -> &SharedObserver {
        &self.observer
    }

    /// Normalise raw text and parse it, without touching the filesystem.
    pub fn parse_text(&self, raw: &str) -> FieldSet {
        let text = clean_text(raw, self.config.strip_special_chars);
        self.parser.parse(&text)
    }

    /// Process one resume, surfacing every document-level error.
    ///
    /// `Ok(None)` means the document held no text.
    pub fn try_process_resume(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<ResumeRecord>, ResumeParserError> {
        let path = path.as_ref();
        validate_path(path)?;

        let start = Instant::now();
        info!("Processing resume: {}", path.display());

        // ── Step 1: Extract text ─────────────────────────────────────────
        let raw = self.extractor.extract(path, self.observer.as_ref())?;
        if raw.trim().is_empty() {
            self.observer.on_document_empty(path);
            return Ok(None);
        }

        // ── Step 2-3: Normalise and parse ────────────────────────────────
        let fields = self.parse_text(&raw);

        // ── Step 4: Attach metadata ──────────────────────────────────────
        let record = ResumeRecord::new(fields, path);
        debug!(
            "Processed {} in {}ms",
            record.file,
            start.elapsed().as_millis()
        );
        self.observer.on_document_complete(path, &record);
        Ok(Some(record))
    }

    /// Process one resume, absorbing document-level failures.
    ///
    /// # Errors
    /// Only [`ResumeParserError::InvalidArgument`] for an empty path. Any
    /// other failure is reported to the observer and yields `Ok(None)`.
    pub fn process_resume(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Option<ResumeRecord>, ResumeParserError> {
        let path = path.as_ref();
        match self.try_process_resume(path) {
            Err(e) if e.is_invalid_argument() => Err(e),
            Err(e) => {
                self.observer.on_document_error(path, &e);
                Ok(None)
            }
            Ok(record) => Ok(record),
        }
    }
}
