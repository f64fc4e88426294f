// src/types/mod.rs
pub mod resume_data;
pub mod response;

pub use resume_data::{Education, JobEntry, JobHeader, Languages, ResumeRecord, Skills};
pub use response::GenerationResult;
