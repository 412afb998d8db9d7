//! Resume parser: run every field extractor and assemble a [`FieldSet`].
//!
//! Each extractor runs inside its own unwind guard. A panic in one becomes
//! an absent value plus a `FieldExtraction` event; the other fields are
//! unaffected. If assembling the set panics anyway, the empty set is
//! returned, so callers always get a well-shaped record.

use crate::error::RecoverableError;
use crate::keywords::KeywordTable;
use crate::observer::SharedObserver;
use crate::output::{Field, FieldSet};
use crate::pipeline::fields;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

/// Field-set builder with an injected keyword table and observer.
#[derive(Clone)]
pub struct ResumeParser {
    keywords: Arc<KeywordTable>,
    observer: SharedObserver,
}

impl ResumeParser {
    pub fn new(keywords: Arc<KeywordTable>, observer: SharedObserver) -> Self {
        Self { keywords, observer }
    }

    /// Extract all five fields from normalised text.
    pub fn parse(&self, text: &str) -> FieldSet {
        match panic::catch_unwind(AssertUnwindSafe(|| self.parse_fields(text))) {
            Ok(fields) => {
                debug!("Parsed resume with {} field(s)", fields.populated_count());
                fields
            }
            Err(payload) => {
                debug!("Resume aggregation failed: {}", panic_message(&*payload));
                FieldSet::empty()
            }
        }
    }

    fn parse_fields(&self, text: &str) -> FieldSet {
        let keywords = &*self.keywords;
        let name = self.guard(Field::Name, || fields::extract_name(text));
        let email = self.guard(Field::Email, || fields::extract_email(text));
        let phone = self.guard(Field::Phone, || fields::extract_phone(text));
        let education = self.guard(Field::Education, || {
            fields::extract_education(text, keywords)
        });
        let skills = self
            .guard(Field::Skills, || {
                Some(fields::extract_skills(text, keywords)).filter(|s| !s.is_empty())
            })
            .unwrap_or_default();

        FieldSet {
            name,
            email,
            phone,
            education,
            skills,
        }
    }

    /// Run one extractor, turning a panic into `None` and reporting matches.
    fn guard<T, F>(&self, field: Field, extract: F) -> Option<T>
    where
        T: FieldValue,
        F: FnOnce() -> Option<T>,
    {
        match panic::catch_unwind(AssertUnwindSafe(extract)) {
            Ok(Some(value)) => {
                self.observer.on_field_match(field, &value.describe());
                Some(value)
            }
            Ok(None) => None,
            Err(payload) => {
                let err = RecoverableError::FieldExtraction {
                    field,
                    detail: panic_message(&*payload),
                };
                self.observer.on_field_error(&err);
                None
            }
        }
    }
}

/// How a found value is rendered for observer events.
trait FieldValue {
    fn describe(&self) -> String;
}

impl FieldValue for String {
    fn describe(&self) -> String {
        self.clone()
    }
}

impl FieldValue for Vec<String> {
    fn describe(&self) -> String {
        self.join(", ")
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
