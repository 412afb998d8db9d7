//! Configuration types for resume parsing.
//!
//! All parsing behaviour is controlled through [`ParserConfig`], built via
//! its [`ParserConfigBuilder`]. The keyword table and observer are shared
//! behind `Arc` so one config can drive many concurrent documents.

use crate::error::ResumeParserError;
use crate::keywords::KeywordTable;
use crate::observer::{SharedObserver, TracingObserver};
use std::fmt;
use std::sync::Arc;

/// Configuration for the resume pipeline and batch driver.
///
/// Built via [`ParserConfig::builder()`] or using [`ParserConfig::default()`].
///
/// # Example
/// ```rust
/// use resume_parser::ParserConfig;
///
/// let config = ParserConfig::builder()
///     .strip_special_chars(true)
///     .concurrency(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.concurrency, 4);
/// ```
#[derive(Clone)]
pub struct ParserConfig {
    /// Keyword tables for education and skills matching. Default: built-in table.
    pub keywords: Arc<KeywordTable>,

    /// Strip decorative punctuation after normalising. Default: false.
    ///
    /// Keeps word characters, whitespace and `@ . - # ( )` so emails,
    /// phone numbers and tokens like `C#` survive.
    pub strip_special_chars: bool,

    /// Documents processed at once by the batch driver. Default: 1.
    ///
    /// Each document is still processed sequentially; this only lets the
    /// batch overlap independent files. Output order never changes.
    pub concurrency: usize,

    /// Event sink. If None, uses [`TracingObserver`].
    pub observer: Option<SharedObserver>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            keywords: Arc::new(KeywordTable::default()),
            strip_special_chars: false,
            concurrency: 1,
            observer: None,
        }
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("skills", &self.keywords.skills.len())
            .field("education", &self.keywords.education.len())
            .field("strip_special_chars", &self.strip_special_chars)
            .field("concurrency", &self.concurrency)
            .field("observer", &self.observer.as_ref().map(|_| "<dyn ParseObserver>"))
            .finish()
    }
}

impl ParserConfig {
    /// Create a new builder for `ParserConfig`.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder {
            config: Self::default(),
        }
    }

    /// The configured observer, or the tracing observer.
    pub fn resolve_observer(&self) -> SharedObserver {
        self.observer
            .clone()
            .unwrap_or_else(|| Arc::new(TracingObserver))
    }
}

/// Builder for [`ParserConfig`].
#[derive(Debug)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    pub fn keywords(mut self, table: KeywordTable) -> Self {
        self.config.keywords = Arc::new(table);
        self
    }

    pub fn strip_special_chars(mut self, v: bool) -> Self {
        self.config.strip_special_chars = v;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n;
        self
    }

    pub fn observer(mut self, observer: SharedObserver) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ParserConfig, ResumeParserError> {
        let c = &self.config;
        if c.concurrency == 0 {
            return Err(ResumeParserError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        c.keywords.validate()?;
        Ok(self.config)
    }
}
