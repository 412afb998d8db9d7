//! Batch driver: parse every `.pdf` in a directory.
//!
//! Documents are independent, so the driver runs each one on tokio's
//! blocking pool (pdfium calls block) with at most
//! [`ParserConfig::concurrency`](crate::config::ParserConfig::concurrency)
//! in flight. `buffered` (not `buffer_unordered`) keeps results in
//! discovery order, so output never depends on scheduling.
//!
//! One bad file never aborts the batch: it is logged, counted in the
//! summary, and skipped.

use crate::error::ResumeParserError;
use crate::output::{BatchOutput, BatchSummary, FailedFile, ResumeRecord};
use crate::pipeline::extract::TextExtractor;
use crate::process::ResumePipeline;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// File-name suffix accepted as a resume (case-sensitive).
pub const PDF_SUFFIX: &str = ".pdf";

/// List the `.pdf` files directly inside `dir`, sorted by file name.
///
/// # Errors
/// [`ResumeParserError::InputDirectory`] when `dir` is missing, is not a
/// directory, or cannot be read.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>, ResumeParserError> {
    let dir_err = |reason: String| ResumeParserError::InputDirectory {
        path: dir.to_path_buf(),
        reason,
    };

    if !dir.exists() {
        return Err(dir_err("does not exist".into()));
    }
    if !dir.is_dir() {
        return Err(dir_err("not a directory".into()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| dir_err(e.to_string()))? {
        let entry = entry.map_err(|e| dir_err(e.to_string()))?;
        let path = entry.path();
        let is_pdf = entry.file_name().to_string_lossy().ends_with(PDF_SUFFIX);
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    debug!("Found {} PDF file(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// Process every resume in `dir`.
///
/// # Returns
/// `Ok(BatchOutput)` even when some (or all) files fail; check
/// `output.summary`. An empty directory yields an empty output and a warning.
///
/// # Errors
/// Only when `dir` itself is unusable.
pub async fn process_directory<E>(
    dir: impl AsRef<Path>,
    pipeline: Arc<ResumePipeline<E>>,
) -> Result<BatchOutput, ResumeParserError>
where
    E: TextExtractor + 'static,
{
    let dir = dir.as_ref();
    let files = discover_pdfs(dir)?;
    let total = files.len();

    if total == 0 {
        warn!("No PDF files found in {}", dir.display());
        return Ok(BatchOutput::default());
    }

    let observer = pipeline.observer().clone();
    let concurrency = pipeline.config().concurrency.max(1);
    observer.on_batch_start(total);

    let outcomes: Vec<(PathBuf, Result<Option<ResumeRecord>, ResumeParserError>)> =
        stream::iter(files.into_iter().enumerate().map(|(idx, path)| {
            let pipeline = Arc::clone(&pipeline);
            async move {
                pipeline.observer().on_document_start(idx + 1, total, &path);
                let task_path = path.clone();
                let result =
                    tokio::task::spawn_blocking(move || pipeline.try_process_resume(&task_path))
                        .await
                        .unwrap_or_else(|e| {
                            Err(ResumeParserError::Internal(format!(
                                "Resume worker panicked: {}",
                                e
                            )))
                        });
                (path, result)
            }
        }))
        .buffered(concurrency)
        .collect()
        .await;

    let mut records = Vec::with_capacity(total);
    let mut failed_files = Vec::new();
    for (path, result) in outcomes {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match result {
            Ok(Some(record)) => records.push(record),
            Ok(None) => failed_files.push(FailedFile {
                file,
                reason: "no text extracted".into(),
            }),
            Err(e) => {
                observer.on_document_error(&path, &e);
                failed_files.push(FailedFile {
                    file,
                    reason: e.to_string(),
                });
            }
        }
    }

    let output = BatchOutput {
        summary: BatchSummary {
            total,
            succeeded: records.len(),
            failed: failed_files.len(),
            failed_files,
        },
        records,
    };
    observer.on_batch_complete(&output.summary);
    Ok(output)
}

/// Synchronous wrapper around [`process_directory`].
///
/// Creates a temporary tokio runtime internally.
pub fn process_directory_sync<E>(
    dir: impl AsRef<Path>,
    pipeline: Arc<ResumePipeline<E>>,
) -> Result<BatchOutput, ResumeParserError>
where
    E: TextExtractor + 'static,
{
    tokio::runtime::Runtime::new()
        .map_err(|e| ResumeParserError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(process_directory(dir, pipeline))
}
