//! Output types and the tabular writer.
//!
//! A [`FieldSet`] is what the parser produces for one document; a
//! [`ResumeRecord`] adds the file metadata. Serde renames keep the external
//! column names (`Name`, `Email`, …, `FilePath`) stable across CSV and JSON.

use crate::error::ResumeParserError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column order of the CSV output.
pub const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Email",
    "Phone",
    "Education",
    "Skills",
    "File",
    "FilePath",
];

/// Separator used when a skills list is flattened into a single cell.
pub const SKILLS_SEPARATOR: &str = ", ";

/// The five extracted fields, used to label observer events and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Phone,
    Education,
    Skills,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Education => "Education",
            Field::Skills => "Skills",
        };
        f.write_str(s)
    }
}

/// Fields extracted from one document.
///
/// `None` marks a field that could not be determined. `skills` is never
/// absent, only empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldSet {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub education: Option<String>,
    pub skills: Vec<String>,
}

impl FieldSet {
    /// The all-absent field set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of fields carrying a value (an empty skills list does not count).
    pub fn populated_count(&self) -> usize {
        [&self.name, &self.email, &self.phone, &self.education]
            .iter()
            .filter(|v| v.is_some())
            .count()
            + usize::from(!self.skills.is_empty())
    }
}

/// One successfully processed resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(flatten)]
    pub fields: FieldSet,
    /// Base file name, e.g. `jane_doe.pdf`.
    #[serde(rename = "File")]
    pub file: String,
    /// Absolute path of the source PDF.
    #[serde(rename = "FilePath")]
    pub file_path: String,
}

impl ResumeRecord {
    /// Attach file metadata derived from `path` to `fields`.
    ///
    /// `FilePath` is made absolute against the current directory without
    /// resolving symlinks.
    pub fn new(fields: FieldSet, path: &Path) -> Self {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_path = std::path::absolute(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .to_string_lossy()
            .into_owned();
        Self {
            fields,
            file,
            file_path,
        }
    }

    /// Flatten into one CSV row in [`CSV_HEADERS`] order.
    pub fn to_csv_row(&self) -> [String; 7] {
        let f = &self.fields;
        [
            f.name.clone().unwrap_or_default(),
            f.email.clone().unwrap_or_default(),
            f.phone.clone().unwrap_or_default(),
            f.education.clone().unwrap_or_default(),
            f.skills.join(SKILLS_SEPARATOR),
            self.file.clone(),
            self.file_path.clone(),
        ]
    }
}

/// A file the batch driver could not turn into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub file: String,
    pub reason: String,
}

/// Aggregate counts for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failed_files: Vec<FailedFile>,
}

/// Records plus summary returned by [`crate::batch::process_directory`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutput {
    pub records: Vec<ResumeRecord>,
    pub summary: BatchSummary,
}

/// Serialisation format for [`save_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Comma-separated values with a header row. (default)
    #[default]
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

/// Write `records` as CSV (header row first) to `writer`.
pub fn write_csv<W: Write>(records: &[ResumeRecord], writer: W) -> Result<(), ResumeParserError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for record in records {
        wtr.write_record(record.to_csv_row())?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `records` as a pretty JSON array to `writer`.
pub fn write_json<W: Write>(records: &[ResumeRecord], writer: W) -> Result<(), ResumeParserError> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

/// Save `records` to `path`, creating the parent directory if needed.
///
/// The file is written to a temporary sibling and renamed into place so a
/// failed run never leaves a truncated output behind.
pub fn save_records(
    records: &[ResumeRecord],
    path: &Path,
    format: OutputFormat,
) -> Result<PathBuf, ResumeParserError> {
    let write_err = |source: std::io::Error| ResumeParserError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(write_err)?;
    match format {
        OutputFormat::Csv => write_csv(records, tmp.as_file_mut())?,
        OutputFormat::Json => write_json(records, tmp.as_file_mut())?,
    }
    tmp.as_file_mut().flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Saved {} record(s) to {}", records.len(), path.display());
    Ok(path.to_path_buf())
}
