//! Observer trait for pipeline events.
//!
//! Inject an [`Arc<dyn ParseObserver>`] via
//! [`crate::config::ParserConfigBuilder::observer`] to receive events at the
//! pipeline's extension points: page failures, field matches, field
//! failures, document outcomes and batch progress.
//!
//! The pipeline itself never decides how these events are surfaced. The
//! default, [`TracingObserver`], forwards them to `tracing`; the CLI drives a
//! progress bar; tests count them.
//!
//! # Example
//!
//! ```rust
//! use resume_parser::{Field, ParseObserver, ParserConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct MatchCounter(AtomicUsize);
//!
//! impl ParseObserver for MatchCounter {
//!     fn on_field_match(&self, _field: Field, _value: &str) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let config = ParserConfig::builder()
//!     .observer(Arc::new(MatchCounter(AtomicUsize::new(0))))
//!     .build()
//!     .unwrap();
//! ```

use crate::error::{RecoverableError, ResumeParserError};
use crate::output::{BatchSummary, Field, ResumeRecord};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Receives pipeline events.
///
/// Implementations must be `Send + Sync`: the batch driver may process
/// several documents at once on the blocking pool. All methods default to
/// no-ops so implementors only override what they need.
pub trait ParseObserver: Send + Sync {
    /// Called once before the first document of a batch.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called before a document is handed to the pipeline.
    ///
    /// `index` is 1-based.
    fn on_document_start(&self, index: usize, total_files: usize, path: &Path) {
        let _ = (index, total_files, path);
    }

    /// A page's text could not be extracted; it contributes nothing.
    fn on_page_error(&self, path: &Path, error: &RecoverableError) {
        let _ = (path, error);
    }

    /// A field extractor produced a value.
    fn on_field_match(&self, field: Field, value: &str) {
        let _ = (field, value);
    }

    /// A field extractor failed; the field is left absent.
    fn on_field_error(&self, error: &RecoverableError) {
        let _ = error;
    }

    /// The document yielded no text, so no record was produced.
    fn on_document_empty(&self, path: &Path) {
        let _ = path;
    }

    /// A record was produced.
    fn on_document_complete(&self, path: &Path, record: &ResumeRecord) {
        let _ = (path, record);
    }

    /// The document could not be processed.
    fn on_document_error(&self, path: &Path, error: &ResumeParserError) {
        let _ = (path, error);
    }

    /// Called once after every document of a batch has been attempted.
    fn on_batch_complete(&self, summary: &BatchSummary) {
        let _ = summary;
    }
}

/// A no-op observer for callers that want silence.
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// Forwards every event to `tracing`. This is the default observer.
pub struct TracingObserver;

impl ParseObserver for TracingObserver {
    fn on_batch_start(&self, total_files: usize) {
        info!("Starting batch processing of {} resume(s)", total_files);
    }

    fn on_document_start(&self, index: usize, total_files: usize, path: &Path) {
        info!("[{}/{}] Processing: {}", index, total_files, path.display());
    }

    fn on_page_error(&self, path: &Path, error: &RecoverableError) {
        warn!("{}: {}", path.display(), error);
    }

    fn on_field_match(&self, field: Field, value: &str) {
        debug!("Extracted {}: {}", field, value);
    }

    fn on_field_error(&self, error: &RecoverableError) {
        warn!("{}", error);
    }

    fn on_document_empty(&self, path: &Path) {
        warn!("No text extracted from {}", path.display());
    }

    fn on_document_complete(&self, path: &Path, record: &ResumeRecord) {
        info!(
            "Parsed {} ({} field(s) populated)",
            path.display(),
            record.fields.populated_count()
        );
    }

    fn on_document_error(&self, path: &Path, error: &ResumeParserError) {
        error!("Error processing {}: {}", path.display(), error);
    }

    fn on_batch_complete(&self, summary: &BatchSummary) {
        info!("Processing summary:");
        info!("  Total files: {}", summary.total);
        info!("  Successfully processed: {}", summary.succeeded);
        info!("  Failed: {}", summary.failed);
        if !summary.failed_files.is_empty() {
            let names: Vec<&str> = summary.failed_files.iter().map(|f| f.file.as_str()).collect();
            warn!("Failed files: {}", names.join(", "));
        }
    }
}

/// Convenience alias matching the type stored in [`crate::config::ParserConfig`].
pub type SharedObserver = Arc<dyn ParseObserver>;
