//! Keyword tables for education and skills matching.
//!
//! Order is significant: education matching returns the first keyword in
//! table order, skills matching returns hits in table order. The built-in
//! table is hand-maintained; an alternate one can be loaded from JSON.

use crate::error::ResumeParserError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Built-in skills, grouped by category.
pub const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "Python",
    "Java",
    "JavaScript",
    "C++",
    "C#",
    "Go",
    "Rust",
    "PHP",
    "TypeScript",
    // Web frameworks
    "Django",
    "Flask",
    "FastAPI",
    "React",
    "Angular",
    "Vue.js",
    "Node.js",
    "Express",
    // Data science & ML
    "Machine Learning",
    "Deep Learning",
    "Data Analysis",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "NLP",
    "Computer Vision",
    // Data tools
    "SQL",
    "Pandas",
    "NumPy",
    "Matplotlib",
    "Seaborn",
    "Plotly",
    // Databases
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Elasticsearch",
    // Cloud & DevOps
    "AWS",
    "Azure",
    "Google Cloud",
    "Docker",
    "Kubernetes",
    "Jenkins",
    "Git",
    "CI/CD",
    // Tools & platforms
    "Excel",
    "Power BI",
    "Tableau",
    "Jupyter",
    "Linux",
    "Windows",
    "Mac",
    "Postman",
    "REST API",
];

/// Built-in degree keywords, most common first.
pub const DEFAULT_EDUCATION: &[&str] = &[
    "Bachelor", "Master", "B.Tech", "M.Tech", "B.E", "M.E", "MBA", "B.Sc", "M.Sc", "B.A", "M.A",
    "B.Com", "BCA", "MCA", "Ph.D", "Diploma",
];

/// Ordered keyword lists used by the education and skills extractors.
///
/// Loaded from JSON as `{"skills": [...], "education": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    pub skills: Vec<String>,
    pub education: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            education: DEFAULT_EDUCATION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl KeywordTable {
    pub fn new(skills: Vec<String>, education: Vec<String>) -> Self {
        Self { skills, education }
    }

    /// Load a table from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ResumeParserError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ResumeParserError::InvalidConfig(format!(
                "cannot read keyword file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let table: KeywordTable = serde_json::from_str(&raw).map_err(|e| {
            ResumeParserError::InvalidConfig(format!(
                "keyword file '{}' is not valid JSON: {}",
                path.display(),
                e
            ))
        })?;
        table.validate()?;
        Ok(table)
    }

    /// Reject empty lists and blank entries.
    ///
    /// A blank keyword is a substring of every text and would match
    /// unconditionally.
    pub fn validate(&self) -> Result<(), ResumeParserError> {
        for (list, name) in [(&self.skills, "skills"), (&self.education, "education")] {
            if list.is_empty() {
                return Err(ResumeParserError::InvalidConfig(format!(
                    "keyword list '{name}' must not be empty"
                )));
            }
            if let Some(pos) = list.iter().position(|k| k.trim().is_empty()) {
                return Err(ResumeParserError::InvalidConfig(format!(
                    "keyword list '{name}' has a blank entry at index {pos}"
                )));
            }
        }
        Ok(())
    }
}
