// src/validation.rs
//! Schema checks on a parsed résumé record

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ResumeRecord;

static STRICT_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid strict email pattern"));

/// Hard checks: the record must be usable by a template as is.
pub fn validate_resume(record: &ResumeRecord) -> Result<()> {
    if !record.email.is_empty() && !STRICT_EMAIL.is_match(&record.email) {
        anyhow::bail!("Invalid email address: {}", record.email);
    }

    Ok(())
}

/// Soft issues worth reporting but not worth failing a render for.
pub fn validation_warnings(record: &ResumeRecord) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Err(e) = validate_resume(record) {
        warnings.push(e.to_string());
    }

    if record.name.trim().is_empty() {
        warnings.push("Resume has no name heading (# Name)".to_string());
    }

    if record.jobs.is_empty() {
        warnings.push("Resume has no job entries (#### Title (Period) - Company)".to_string());
    }

    for job in record.jobs.iter().filter(|job| job.period.is_empty()) {
        warnings.push(format!("Job '{}' has no period", job.title));
    }

    warnings
}
