//! # resume-parser
//!
//! Extract candidate fields (name, email, phone, education, skills) from PDF
//! resumes and aggregate them into CSV or JSON.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract    concatenate page text via pdfium (bad pages → empty)
//!  ├─ 2. Normalise  newlines / whitespace runs → single spaces
//!  ├─ 3. Parse      name, email, phone, education, skills (regex + keywords)
//!  ├─ 4. Annotate   File + FilePath metadata
//!  └─ 5. Output     one record per file → CSV / JSON
//! ```
//!
//! Every stage is a plain function of its input. Page- and field-level
//! failures are absorbed where they happen and reported to a
//! [`ParseObserver`]; a bad document yields no record instead of aborting a
//! batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_parser::{ParserConfig, ResumePipeline};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = ResumePipeline::new(ParserConfig::default());
//!     if let Some(record) = pipeline.process_resume("resumes/jane_doe.pdf")? {
//!         println!("{:?} <{:?}>", record.fields.name, record.fields.email);
//!         println!("skills: {}", record.fields.skills.join(", "));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Parsing text that did not come from a PDF needs no pdfium at all:
//!
//! ```rust
//! use resume_parser::{ParserConfig, ResumePipeline};
//!
//! let pipeline = ResumePipeline::new(ParserConfig::default());
//! let fields = pipeline.parse_text("Jane Doe\njane@doe.io\nMaster of Science\nRust, SQL");
//! assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
//! assert_eq!(fields.skills, vec!["Rust", "SQL"]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume-parser` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## PDFium
//!
//! Text extraction binds to the pdfium shared library at runtime. Set
//! `PDFIUM_LIB_PATH` to a library file or its directory, or install it on
//! the system library path.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod keywords;
pub mod observer;
pub mod output;
pub mod pipeline;
pub mod process;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{discover_pdfs, process_directory, process_directory_sync};
pub use config::{ParserConfig, ParserConfigBuilder};
pub use error::{RecoverableError, ResumeParserError};
pub use keywords::KeywordTable;
pub use observer::{NoopObserver, ParseObserver, SharedObserver, TracingObserver};
pub use output::{
    save_records, write_csv, write_json, BatchOutput, BatchSummary, FailedFile, Field, FieldSet,
    OutputFormat, ResumeRecord,
};
pub use pipeline::extract::{PdfiumTextExtractor, TextExtractor};
pub use pipeline::fields::{
    extract_education, extract_email, extract_name, extract_phone, extract_skills,
};
pub use pipeline::normalize::{clean_text, normalize_text};
pub use pipeline::parser::ResumeParser;
pub use process::ResumePipeline;
