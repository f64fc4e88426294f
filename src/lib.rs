// src/lib.rs
//! Markdown résumé to structured data, and from there to styled HTML.

pub mod config;
pub mod core;
pub mod experience;
pub mod generator;
pub mod parser;
pub mod types;
pub mod utils;
pub mod validation;

pub use config::ResumeConfig;
pub use experience::{years_of_experience, years_of_experience_at};
pub use generator::HtmlGenerator;
pub use parser::{parse, parse_job_header};
pub use types::{Education, GenerationResult, JobEntry, JobHeader, Languages, ResumeRecord, Skills};
pub use validation::{validate_resume, validation_warnings};

/// Convenience function for one-shot HTML generation
pub async fn generate_html(markdown: &str, config: ResumeConfig) -> GenerationResult {
    match HtmlGenerator::new(config) {
        Ok(generator) => generator.generate_html(markdown).await,
        Err(e) => GenerationResult::failure(format!("{:#}", e)),
    }
}
