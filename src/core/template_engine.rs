// src/core/template_engine.rs
//! Template discovery and placeholder substitution
//!
//! Templates live in `templates/<id>/`, with an optional `manifest.toml` and
//! one sub-directory per language holding the HTML page, the job fragment
//! and the stylesheet.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

use crate::config::DEFAULT_TEMPLATE;

// {{key}} or ${key}
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{(\w+)\}\}|\$\{(\w+)\}").expect("valid placeholder pattern")
});

// ===== Template Models =====

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateManifest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_main_file")]
    pub main_file: String,
    #[serde(default = "default_job_file")]
    pub job_file: String,
    #[serde(default = "default_stylesheet")]
    pub stylesheet: String,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

fn default_main_file() -> String {
    "resume.html".to_string()
}

fn default_job_file() -> String {
    "job.html".to_string()
}

fn default_stylesheet() -> String {
    "resume.css".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "ru".to_string()]
}

impl TemplateManifest {
    fn for_directory(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            main_file: default_main_file(),
            job_file: default_job_file(),
            stylesheet: default_stylesheet(),
            languages: default_languages(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemplateInfo {
    pub id: String,
    pub path: PathBuf,
    pub manifest: TemplateManifest,
}

impl TemplateInfo {
    pub fn language_dir(&self, lang: &str) -> PathBuf {
        self.path.join(lang)
    }

    pub fn main_file_path(&self, lang: &str) -> PathBuf {
        self.language_dir(lang).join(&self.manifest.main_file)
    }

    pub fn job_file_path(&self, lang: &str) -> PathBuf {
        self.language_dir(lang).join(&self.manifest.job_file)
    }

    pub fn stylesheet_path(&self, lang: &str) -> PathBuf {
        self.language_dir(lang).join(&self.manifest.stylesheet)
    }

    pub fn supports_language(&self, lang: &str) -> bool {
        self.manifest.languages.iter().any(|l| l == lang)
    }
}

// ===== Main Template Engine =====

pub struct TemplateEngine {
    templates_dir: PathBuf,
    templates: Vec<TemplateInfo>,
}

impl TemplateEngine {
    /// Create new template engine with automatic discovery
    pub fn new(templates_dir: PathBuf) -> Result<Self> {
        let mut engine = Self {
            templates_dir,
            templates: Vec::new(),
        };
        engine.discover_templates()?;
        Ok(engine)
    }

    fn discover_templates(&mut self) -> Result<()> {
        self.templates.clear();

        if !self.templates_dir.exists() {
            warn!(
                "Templates directory does not exist: {}",
                self.templates_dir.display()
            );
            return Ok(());
        }

        let entries = std::fs::read_dir(&self.templates_dir).with_context(|| {
            format!(
                "Failed to read templates directory: {}",
                self.templates_dir.display()
            )
        })?;

        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }

            if let Some(template_id) = path.file_name().and_then(|n| n.to_str()) {
                match Self::load_template_info(template_id, &path) {
                    Ok(template) => {
                        trace!(
                            "Loaded template: {} from {}",
                            template.id,
                            template.path.display()
                        );
                        self.templates.push(template);
                    }
                    Err(e) => warn!("Failed to load template {}: {}", template_id, e),
                }
            }
        }

        self.templates.sort_by(|a, b| a.id.cmp(&b.id));
        info!("Discovered {} templates", self.templates.len());
        Ok(())
    }

    fn load_template_info(template_id: &str, template_path: &Path) -> Result<TemplateInfo> {
        let manifest_path = template_path.join("manifest.toml");

        let manifest = if manifest_path.exists() {
            let content = std::fs::read_to_string(&manifest_path)
                .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))?
        } else {
            TemplateManifest::for_directory(template_id)
        };

        Ok(TemplateInfo {
            id: template_id.to_string(),
            path: template_path.to_path_buf(),
            manifest,
        })
    }

    pub fn list_templates(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.id.clone()).collect()
    }

    pub fn templates(&self) -> &[TemplateInfo] {
        &self.templates
    }

    pub fn get_template(&self, template_id: &str) -> Option<&TemplateInfo> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    pub fn template_exists(&self, template_id: &str) -> bool {
        self.get_template(template_id).is_some()
    }

    pub fn templates_dir(&self) -> &PathBuf {
        &self.templates_dir
    }

    /// Match a requested template id against the discovered ones, falling
    /// back to the default template, then to whatever was found first.
    pub fn normalize_template(&self, requested: Option<&str>) -> String {
        let requested = requested.unwrap_or(DEFAULT_TEMPLATE).trim().to_lowercase();

        if let Some(template) = self
            .templates
            .iter()
            .find(|t| t.id.to_lowercase() == requested)
        {
            return template.id.clone();
        }

        if !self.template_exists(DEFAULT_TEMPLATE) {
            if let Some(first) = self.templates.first() {
                return first.id.clone();
            }
        }

        DEFAULT_TEMPLATE.to_string()
    }

    // ===== Variable Processing =====

    /// Process template variables in content (supports both {{var}} and ${var} syntax)
    pub fn process_variables(content: &str, variables: &HashMap<String, String>) -> String {
        // One pass over the template; substituted values are never rescanned
        PLACEHOLDER
            .replace_all(content, |caps: &Captures| {
                let key = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                match variables.get(key) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}
