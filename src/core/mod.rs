// src/core/mod.rs
//! File access and template services shared by the generator and the CLI

pub mod fs_ops;
pub mod template_engine;

pub use fs_ops::FsOps;
pub use template_engine::{TemplateEngine, TemplateInfo, TemplateManifest};
