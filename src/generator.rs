// src/generator.rs
use crate::config::ResumeConfig;
use crate::core::{FsOps, TemplateEngine, TemplateInfo};
use crate::experience::years_of_experience;
use crate::parser::parse;
use crate::types::{GenerationResult, JobEntry, ResumeRecord};
use crate::utils::escape_html;
use crate::validation::validation_warnings;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

static STYLESHEET_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<link\s+rel="stylesheet"\s+href="resume\.css"\s*/?>"#)
        .expect("valid stylesheet link pattern")
});

const DEFAULT_JOB_FRAGMENT: &str = r#"<article class="job">
  <header>
    <h4>{{title}}</h4>
    <span class="company">{{company}}</span>
    <span class="period">{{period}}</span>
    <span class="duration">{{duration}}</span>
  </header>
  <p class="description">{{description}}</p>
  <ul class="achievements">{{achievements}}</ul>
  <p class="technologies">{{technologies}}</p>
</article>
"#;

pub struct HtmlGenerator {
    pub config: ResumeConfig,
    template_manager: TemplateEngine,
}

impl HtmlGenerator {
    pub fn new(mut config: ResumeConfig) -> Result<Self> {
        let template_manager = TemplateEngine::new(config.templates_dir_absolute())
            .context("Failed to initialize template manager")?;

        config.template = template_manager.normalize_template(Some(&config.template));

        Ok(Self {
            config,
            template_manager,
        })
    }

    pub fn template_manager(&self) -> &TemplateEngine {
        &self.template_manager
    }

    /// Parse, render and wrap the outcome; never returns an error.
    pub async fn generate_html(&self, markdown: &str) -> GenerationResult {
        GenerationResult::from(self.try_generate_html(markdown).await)
    }

    pub async fn generate_html_from_file(&self, path: &Path) -> GenerationResult {
        match FsOps::read_file_safe(path).await {
            Ok(markdown) => self.generate_html(&markdown).await,
            Err(e) => GenerationResult::failure(format!("{:#}", e)),
        }
    }

    pub async fn try_generate_html(&self, markdown: &str) -> Result<String> {
        let record = parse(markdown);
        for warning in validation_warnings(&record) {
            warn!("Resume validation: {}", warning);
        }

        let experience = years_of_experience(&record.jobs);
        let html = self.render(&record, experience).await?;

        info!(
            "Rendered resume for '{}' ({} template, {} lang, {} bytes)",
            record.name,
            self.config.template,
            self.config.lang,
            html.len()
        );
        Ok(html)
    }

    /// Render an already parsed record with the configured template.
    pub async fn render(&self, record: &ResumeRecord, experience: i32) -> Result<String> {
        let template = self.current_template()?;
        let lang = self.config.lang.as_str();

        if !template.supports_language(lang) {
            warn!(
                "Template '{}' does not declare language '{}'",
                template.id, lang
            );
        }

        let main_path = template.main_file_path(lang);
        let page = FsOps::read_file_safe(&main_path)
            .await
            .with_context(|| format!("Template '{}' has no page for '{}'", template.id, lang))?;

        let job_fragment = FsOps::read_optional(&template.job_file_path(lang))
            .await?
            .unwrap_or_else(|| DEFAULT_JOB_FRAGMENT.to_string());

        let css = FsOps::read_optional(&template.stylesheet_path(lang))
            .await?
            .unwrap_or_default();

        let mut variables = record_variables(record, experience, lang);
        variables.insert("jobs".to_string(), render_jobs(&record.jobs, &job_fragment));

        let html = TemplateEngine::process_variables(&page, &variables);
        Ok(inline_stylesheet(&html, &css))
    }

    fn current_template(&self) -> Result<&TemplateInfo> {
        self.template_manager
            .get_template(&self.config.template)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Template '{}' not found. Available templates: {:?}. Templates directory: {}",
                    self.config.template,
                    self.template_manager.list_templates(),
                    self.template_manager.templates_dir().display()
                )
            })
    }
}

fn record_variables(record: &ResumeRecord, experience: i32, lang: &str) -> HashMap<String, String> {
    let text_fields = [
        ("name", &record.name),
        ("title", &record.title),
        ("email", &record.email),
        ("telegram", &record.telegram),
        ("skills_frontend", &record.skills.frontend),
        ("skills_backend", &record.skills.backend),
        ("education_period", &record.education.period),
        ("education_university", &record.education.university),
        ("education_faculty", &record.education.faculty),
        ("languages_russian", &record.languages.russian),
        ("languages_english", &record.languages.english),
    ];

    let mut variables: HashMap<String, String> = text_fields
        .iter()
        .map(|(key, value)| (key.to_string(), escape_html(value)))
        .collect();
    variables.insert("experience".to_string(), experience.to_string());
    variables.insert("lang".to_string(), lang.to_string());
    variables
}

fn render_jobs(jobs: &[JobEntry], fragment: &str) -> String {
    jobs.iter()
        .map(|job| {
            // Achievements already carry <strong> markup and go in unescaped
            let achievements: String = job
                .achievements
                .iter()
                .map(|a| format!("<li>{}</li>", a))
                .collect();

            let mut vars = HashMap::new();
            vars.insert("title".to_string(), escape_html(&job.title));
            vars.insert("period".to_string(), escape_html(&job.period));
            vars.insert("duration".to_string(), escape_html(&job.duration));
            vars.insert("company".to_string(), escape_html(&job.company));
            vars.insert("description".to_string(), escape_html(&job.description));
            vars.insert("technologies".to_string(), escape_html(&job.technologies));
            vars.insert("achievements".to_string(), achievements);

            TemplateEngine::process_variables(fragment, &vars)
        })
        .collect()
}

/// Swap the external `resume.css` link for an inline `<style>` block.
pub fn inline_stylesheet(html: &str, css: &str) -> String {
    if !STYLESHEET_LINK.is_match(html) {
        debug!("No stylesheet link found, leaving HTML untouched");
        return html.to_string();
    }

    let style = format!("<style>\n{}\n</style>", css);
    STYLESHEET_LINK
        .replace(html, regex::NoExpand(style.as_str()))
        .into_owned()
}
