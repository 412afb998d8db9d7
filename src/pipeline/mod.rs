//! Pipeline stages for resume parsing.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ normalize ──▶ parser (fields × 5)
//! (pdfium)    (whitespace)   (regex / keywords)
//! ```
//!
//! 1. [`extract`]:   validate the path and concatenate page text via pdfium;
//!    [`engine`] resolves the pdfium library
//! 2. [`normalize`]: fold newlines and whitespace runs into single spaces
//! 3. [`fields`]:    one pure matcher per field
//! 4. [`parser`]:    run the matchers, isolate failures, build a `FieldSet`

pub mod engine;
pub mod extract;
pub mod fields;
pub mod normalize;
pub mod parser;
