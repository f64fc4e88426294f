// src/config.rs
use crate::utils::normalize_language;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE: &str = "v1";

#[derive(Debug, Clone)]
pub struct ResumeConfig {
    pub template: String,
    pub lang: String,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub root_dir: PathBuf,
}

impl ResumeConfig {
    pub fn new(template: &str, lang: &str) -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            template: template.trim().to_lowercase(),
            lang: normalize_language(Some(lang)),
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("output"),
            root_dir: current_dir,
        }
    }

    /// Defaults overridden by `RESUME_TEMPLATE`, `RESUME_LANG`,
    /// `RESUME_TEMPLATES_DIR` and `RESUME_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        let template =
            std::env::var("RESUME_TEMPLATE").unwrap_or_else(|_| DEFAULT_TEMPLATE.to_string());
        let lang = std::env::var("RESUME_LANG").unwrap_or_else(|_| "en".to_string());

        let mut config = Self::new(&template, &lang);
        if let Ok(dir) = std::env::var("RESUME_TEMPLATES_DIR") {
            config = config.with_templates_dir(PathBuf::from(dir));
        }
        if let Ok(dir) = std::env::var("RESUME_OUTPUT_DIR") {
            config = config.with_output_dir(PathBuf::from(dir));
        }
        config
    }

    pub fn with_template(mut self, template: String) -> Self {
        self.template = template.trim().to_lowercase();
        self
    }

    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = normalize_language(Some(lang));
        self
    }

    pub fn with_templates_dir(mut self, dir: PathBuf) -> Self {
        self.templates_dir = dir;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_root_dir(mut self, dir: PathBuf) -> Self {
        self.root_dir = dir;
        self
    }

    fn absolute_path(&self, relative_path: &Path) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.to_path_buf()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn templates_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.templates_dir)
    }

    pub fn output_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_dir)
    }
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE, "en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_inputs() {
        let config = ResumeConfig::new(" V2 ", "Russian");
        assert_eq!(config.template, "v2");
        assert_eq!(config.lang, "ru");
        assert_eq!(config.templates_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_relative_dirs_resolve_against_root() {
        let config = ResumeConfig::default()
            .with_root_dir(PathBuf::from("/srv/resumes"))
            .with_output_dir(PathBuf::from("/tmp/out"));
        assert_eq!(
            config.templates_dir_absolute(),
            PathBuf::from("/srv/resumes/templates")
        );
        assert_eq!(config.output_dir_absolute(), PathBuf::from("/tmp/out"));
    }
}
