//! Binding to the pdfium shared library.
//!
//! Resolution order:
//!
//! 1. `PDFIUM_LIB_PATH`: a library file, or a directory holding the
//!    platform library (`libpdfium.so`, `libpdfium.dylib`, `pdfium.dll`).
//! 2. The system library search path.

use crate::error::ResumeParserError;
use pdfium_render::prelude::Pdfium;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable pointing at an existing pdfium library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to pdfium, honouring `PDFIUM_LIB_PATH`.
pub fn bind_pdfium() -> Result<Pdfium, ResumeParserError> {
    if let Ok(raw) = std::env::var(PDFIUM_LIB_PATH_ENV) {
        let mut path = PathBuf::from(raw);
        if path.is_dir() {
            path = path.join(Pdfium::pdfium_platform_library_name());
        }
        debug!("Binding pdfium from {}", path.display());
        return Pdfium::bind_to_library(&path)
            .map(Pdfium::new)
            .map_err(|e| {
                ResumeParserError::PdfiumBindingFailed(format!("{}: {}", path.display(), e))
            });
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| ResumeParserError::PdfiumBindingFailed(e.to_string()))
}

/// Check that pdfium can be loaded, without keeping the binding.
pub fn ensure_pdfium_available() -> Result<(), ResumeParserError> {
    bind_pdfium().map(|_| ())
}
