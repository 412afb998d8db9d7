//! Text extraction: turn a PDF file into one string of page texts.
//!
//! Local files are validated before pdfium is touched: an empty path, a
//! missing file and a file without the `%PDF` magic bytes each get a
//! distinct error, rather than whatever pdfium reports for them.
//!
//! A page whose text layer cannot be read contributes nothing; the observer
//! hears about it and the remaining pages are still extracted.

use crate::error::{RecoverableError, ResumeParserError};
use crate::observer::ParseObserver;
use crate::pipeline::engine;
use std::fmt::Debug;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Source of raw document text.
///
/// [`PdfiumTextExtractor`] is the production implementation; the seam lets
/// the orchestrator run against any other source.
pub trait TextExtractor: Send + Sync {
    /// Return the concatenated text of every page at `path`.
    ///
    /// Page-level failures go to `observer` and do not fail the call.
    fn extract(&self, path: &Path, observer: &dyn ParseObserver) -> Result<String, ResumeParserError>;
}

/// Extracts page text with pdfium.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumTextExtractor;

impl TextExtractor for PdfiumTextExtractor {
    fn extract(&self, path: &Path, observer: &dyn ParseObserver) -> Result<String, ResumeParserError> {
        validate_path(path)?;
        check_pdf_file(path)?;

        let pdfium = engine::bind_pdfium()?;
        let document =
            pdfium
                .load_pdf_from_file(path, None)
                .map_err(|e| ResumeParserError::Document {
                    path: path.to_path_buf(),
                    detail: format!("{:?}", e),
                })?;

        let pages = document.pages();
        let total_pages = pages.len() as usize;
        debug!("Opened PDF with {} pages: {}", total_pages, path.display());

        let text = concat_pages(
            path,
            pages.iter().map(|page| page.text().map(|t| t.all())),
            observer,
        );

        info!("Extracted {} characters from {}", text.len(), path.display());
        Ok(text)
    }
}

/// Join page texts in order, with no separator.
///
/// A page that failed contributes nothing and is reported to `observer`
/// as a 1-based [`RecoverableError::PageExtraction`]; later pages are
/// still read.
pub fn concat_pages<I, E>(path: &Path, pages: I, observer: &dyn ParseObserver) -> String
where
    I: IntoIterator<Item = Result<String, E>>,
    E: Debug,
{
    let mut text = String::new();
    for (idx, page) in pages.into_iter().enumerate() {
        match page {
            Ok(s) => {
                debug!("Extracted {} chars from page {}", s.len(), idx + 1);
                text.push_str(&s);
            }
            Err(e) => {
                let err = RecoverableError::PageExtraction {
                    page: idx + 1,
                    detail: format!("{:?}", e),
                };
                observer.on_page_error(path, &err);
            }
        }
    }
    text
}

/// Reject empty or whitespace-only paths.
pub fn validate_path(path: &Path) -> Result<(), ResumeParserError> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ResumeParserError::InvalidArgument {
            reason: "PDF path cannot be empty".into(),
        });
    }
    Ok(())
}

/// Check the file exists, is readable, and starts with `%PDF`.
///
/// Files shorter than four bytes are left for pdfium to reject.
fn check_pdf_file(path: &Path) -> Result<(), ResumeParserError> {
    if !path.exists() {
        return Err(ResumeParserError::NotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(ResumeParserError::Document {
                    path: path.to_path_buf(),
                    detail: format!("not a PDF file (first bytes: {:?})", magic),
                });
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ResumeParserError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(ResumeParserError::Document {
            path: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}
