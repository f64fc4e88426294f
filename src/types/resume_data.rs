// src/types/resume_data.rs
//! Structured résumé data extracted from a Markdown document

use serde::{Deserialize, Serialize};

// ===== Résumé Record =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub title: String,
    pub email: String,
    pub telegram: String,
    pub skills: Skills,
    pub jobs: Vec<JobEntry>,
    pub education: Education,
    pub languages: Languages,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub frontend: String,
    pub backend: String,
}

/// One position in the employment history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntry {
    pub title: String,
    pub period: String,
    /// Only set when the heading carried a `| duration` clause.
    pub duration: String,
    pub company: String,
    pub description: String,
    /// Bullet lines with `**bold**` already turned into `<strong>` tags.
    pub achievements: Vec<String>,
    pub technologies: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub period: String,
    pub university: String,
    pub faculty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Languages {
    pub russian: String,
    pub english: String,
}

/// Fields parsed out of a `####` job heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobHeader {
    pub title: String,
    pub period: String,
    pub duration: String,
    pub company: String,
}

impl JobEntry {
    /// Open a fresh entry from its heading; body fields start empty.
    pub fn from_header(header: JobHeader) -> Self {
        Self {
            title: header.title,
            period: header.period,
            duration: header.duration,
            company: header.company,
            ..Default::default()
        }
    }
}

impl ResumeRecord {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
