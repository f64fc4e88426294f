// src/parser.rs
//! Line-oriented parser that turns a loosely formatted Markdown résumé
//! into a [`ResumeRecord`].
//!
//! The document has no formal grammar. Each non-blank line is tested, in a
//! fixed order, as a name heading (`#`), a title heading (`##`), a contact
//! line, a section heading (`###`) or a job heading (`####`); anything else
//! is body text interpreted by the current section. Malformed input never
//! fails, it just leaves fields at their defaults.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{JobEntry, JobHeader, ResumeRecord};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+\.[A-Za-z0-9_]+").expect("valid email pattern")
});

static TELEGRAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("valid telegram pattern"));

// Title (Period | Duration) - Company
static JOB_HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)\s*\((.+?)(?:\s*\|\s*(.+?))?\)\s*-\s*(.+)$")
        .expect("valid job header pattern")
});

static BOLD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"));

static TECHNOLOGIES_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\*\*Technologies\*\*:\s*").expect("valid technologies label")
});

static TECH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\*\*Tech\*\*:\s*").expect("valid tech label"));

/// How body lines are read until the next `###` heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionMode {
    #[default]
    None,
    Skills,
    Experience,
    Education,
    Languages,
}

impl SectionMode {
    /// Returns `None` for headings that match no known keyword.
    pub fn from_heading(heading: &str) -> Option<Self> {
        let upper = heading.to_uppercase();

        if upper.contains("SKILLS") {
            Some(Self::Skills)
        } else if upper.contains("EXPERIENCE") || upper.contains("WORK") {
            Some(Self::Experience)
        } else if upper.contains("EDUCATION") {
            Some(Self::Education)
        } else if upper.contains("LANGUAGE") {
            Some(Self::Languages)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct ParserState {
    record: ResumeRecord,
    section: SectionMode,
    current_job: Option<JobEntry>,
    in_achievements: bool,
}

impl ParserState {
    fn consume(mut self, line: &str) -> Self {
        self.handle_line(line);
        self
    }

    fn handle_line(&mut self, line: &str) {
        if let Some(name) = heading_text(line, "#") {
            self.record.name = name.to_string();
            return;
        }

        if let Some(title) = heading_text(line, "##") {
            self.record.title = title.to_string();
            return;
        }

        // Contact lines win over everything below, including headings
        if self.handle_contact(line) {
            return;
        }

        if let Some(heading) = heading_text(line, "###") {
            self.finish_job();
            if let Some(mode) = SectionMode::from_heading(heading) {
                self.section = mode;
            }
            return;
        }

        if line.starts_with("#### ") {
            self.finish_job();
            self.current_job = Some(JobEntry::from_header(parse_job_header(line)));
            self.in_achievements = false;
            return;
        }

        match self.section {
            SectionMode::Skills => self.handle_skills(line),
            SectionMode::Experience => self.handle_experience(line),
            SectionMode::Education => self.handle_education(line),
            SectionMode::Languages => self.handle_languages(line),
            SectionMode::None => {}
        }
    }

    /// Returns true when the line was taken as a contact line, even if no
    /// address or handle could be extracted from it.
    fn handle_contact(&mut self, line: &str) -> bool {
        let lower = line.to_lowercase();

        if lower.starts_with("contacts:") || lower.starts_with("email:") || line.contains("mail") {
            if let Some(email) = EMAIL_PATTERN.find(line) {
                self.record.email = email.as_str().to_string();
            }
            return true;
        }

        if lower.starts_with("telegram:") || line.contains('@') {
            if let Some(handle) = TELEGRAM_PATTERN.find(line) {
                self.record.telegram = handle.as_str().to_string();
            }
            return true;
        }

        false
    }

    fn handle_skills(&mut self, line: &str) {
        if line.starts_with("**Frontend:") {
            self.record.skills.frontend = strip_label(line, "**Frontend:**");
        } else if line.starts_with("**Backend:") {
            self.record.skills.backend = strip_label(line, "**Backend:**");
        }
    }

    fn handle_experience(&mut self, line: &str) {
        let Some(job) = self.current_job.as_mut() else {
            return;
        };
        let lower = line.to_lowercase();

        if line.starts_with("**") && !lower.contains("technolog") {
            let text = line.strip_prefix("**").unwrap_or(line);
            job.description = text.strip_suffix("**").unwrap_or(text).to_string();
            self.in_achievements = true;
        } else if lower.contains("**technolog") {
            let without_long = TECHNOLOGIES_LABEL.replace(line, "");
            job.technologies = TECH_LABEL.replace(&without_long, "").into_owned();
            self.in_achievements = false;
        } else if self.in_achievements {
            if let Some(bullet) = line.strip_prefix("- ") {
                job.achievements.push(bold_to_strong(bullet.trim_start()));
            }
        }
    }

    fn handle_education(&mut self, line: &str) {
        let lower = line.to_lowercase();
        let education = &mut self.record.education;

        if let Some(rest) = line.strip_prefix("**") {
            let end = rest.find("**").unwrap_or(rest.len());
            education.period = rest[..end].to_string();
        } else if contains_any(&lower, &["university", "college", "institute"]) {
            education.university = line.to_string();
        } else if contains_any(&lower, &["faculty", "department", "degree"]) {
            education.faculty = line.to_string();
        }
    }

    fn handle_languages(&mut self, line: &str) {
        let lower = line.to_lowercase();

        if lower.contains("russian") {
            self.record.languages.russian = line.to_string();
        } else if lower.contains("english") {
            self.record.languages.english = line.to_string();
        }
    }

    fn finish_job(&mut self) {
        if let Some(job) = self.current_job.take() {
            self.record.jobs.push(job);
        }
        self.in_achievements = false;
    }

    fn finish(mut self) -> ResumeRecord {
        self.finish_job();
        self.record
    }
}

/// Parse a Markdown résumé. Never fails; sections that cannot be read are
/// left empty.
pub fn parse(content: &str) -> ResumeRecord {
    let record = content
        .lines()
        .map(trim_line)
        .filter(|line| !line.is_empty())
        .fold(ParserState::default(), ParserState::consume)
        .finish();

    debug!(
        "Parsed resume: {} jobs, name set: {}, email set: {}",
        record.jobs.len(),
        !record.name.is_empty(),
        !record.email.is_empty()
    );

    record
}

// Also drops a byte order mark left at the start of the file
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Parse a job heading such as
/// `#### Senior Developer (May 2025 - Present | 6 months) - Company`.
///
/// The leading `####` is optional. When the heading does not follow the
/// `Title (Period) - Company` shape the whole text becomes the title.
pub fn parse_job_header(line: &str) -> JobHeader {
    let content = line.strip_prefix("####").unwrap_or(line).trim_start();

    match JOB_HEADER_PATTERN.captures(content) {
        Some(caps) => {
            let group = |i: usize| {
                caps.get(i)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default()
            };
            JobHeader {
                title: group(1),
                period: group(2),
                duration: group(3),
                company: group(4),
            }
        }
        None => JobHeader {
            title: content.to_string(),
            ..Default::default()
        },
    }
}

/// Convert `**bold**` runs into `<strong>` tags, leaving other text as is.
pub fn bold_to_strong(text: &str) -> String {
    BOLD_PATTERN
        .replace_all(text, "<strong>$1</strong>")
        .into_owned()
}

/// Text of a heading with exactly `marker` (followed by a space) in front.
fn heading_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    rest.starts_with(' ').then(|| rest.trim_start())
}

fn strip_label(line: &str, label: &str) -> String {
    match line.strip_prefix(label) {
        Some(rest) => rest.trim_start().to_string(),
        None => line.to_string(),
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = r#"
# Ivan Petrov
## Senior Full-Stack Developer

Contacts: ivan.petrov@example.com
Telegram: @ivan_dev

### Skills
**Frontend:** React, TypeScript, Svelte
**Backend:** Node.js, NestJS, PostgreSQL

### Work Experience

#### Senior Full-Stack Developer (May 2025 - Present | 6 months) - Acme Corp
**Building the billing platform**
- Led **migration** to event sourcing
- Cut p95 latency by **40%**
**Technologies**: Rust, Tokio, PostgreSQL

#### Backend Developer (2021 - 2025) - Globex
**Payments team**
- Designed the ledger service
**Technologies**: Go, Kafka

### Education
**2015 - 2019**
Moscow State University
Faculty of Computational Mathematics

### Languages
Russian - native
English - B2 (Upper-Intermediate)
"#;

    #[test]
    fn test_parse_full_document() {
        let record = parse(SAMPLE_RESUME);

        assert_eq!(record.name, "Ivan Petrov");
        assert_eq!(record.title, "Senior Full-Stack Developer");
        assert_eq!(record.email, "ivan.petrov@example.com");
        assert_eq!(record.telegram, "@ivan_dev");
        assert_eq!(record.skills.frontend, "React, TypeScript, Svelte");
        assert_eq!(record.skills.backend, "Node.js, NestJS, PostgreSQL");

        assert_eq!(record.jobs.len(), 2);
        let first = &record.jobs[0];
        assert_eq!(first.title, "Senior Full-Stack Developer");
        assert_eq!(first.period, "May 2025 - Present");
        assert_eq!(first.duration, "6 months");
        assert_eq!(first.company, "Acme Corp");
        assert_eq!(first.description, "Building the billing platform");
        assert_eq!(
            first.achievements,
            vec![
                "Led <strong>migration</strong> to event sourcing".to_string(),
                "Cut p95 latency by <strong>40%</strong>".to_string(),
            ]
        );
        assert_eq!(first.technologies, "Rust, Tokio, PostgreSQL");

        let second = &record.jobs[1];
        assert_eq!(second.company, "Globex");
        assert_eq!(second.duration, "");
        assert_eq!(second.achievements, vec!["Designed the ledger service"]);
        assert_eq!(second.technologies, "Go, Kafka");

        assert_eq!(record.education.period, "2015 - 2019");
        assert_eq!(record.education.university, "Moscow State University");
        assert_eq!(
            record.education.faculty,
            "Faculty of Computational Mathematics"
        );
        assert_eq!(record.languages.russian, "Russian - native");
        assert_eq!(record.languages.english, "English - B2 (Upper-Intermediate)");
    }

    #[test]
    fn test_no_headings_leaves_identity_empty() {
        let record = parse("just some text\nanother line\n\n   \n");
        assert_eq!(record.name, "");
        assert_eq!(record.title, "");
        assert!(record.jobs.is_empty());
    }

    #[test]
    fn test_empty_input_yields_default_record() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_single_job_is_finalized_at_end_of_input() {
        let record = parse("### Experience\n#### Engineer (2020 - 2022) - Acme\n**Core team**");
        assert_eq!(record.jobs.len(), 1);
        assert_eq!(record.jobs[0].description, "Core team");
    }

    #[test]
    fn test_jobs_keep_document_order() {
        let record = parse(
            "### Experience\n#### A (2019) - One\n#### B (2020) - Two\n### Education\n#### C (2021) - Three",
        );
        let companies: Vec<&str> = record.jobs.iter().map(|j| j.company.as_str()).collect();
        assert_eq!(companies, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_job_header_with_duration() {
        let header = parse_job_header("#### Senior Engineer (2021 - 2023 | 2y) - Acme Corp");
        assert_eq!(
            header,
            JobHeader {
                title: "Senior Engineer".to_string(),
                period: "2021 - 2023".to_string(),
                duration: "2y".to_string(),
                company: "Acme Corp".to_string(),
            }
        );
    }

    #[test]
    fn test_job_header_without_parentheses_falls_back_to_title() {
        let header = parse_job_header("#### Contractor - FreelanceCo");
        assert_eq!(header.title, "Contractor - FreelanceCo");
        assert_eq!(header.period, "");
        assert_eq!(header.duration, "");
        assert_eq!(header.company, "");
    }

    #[test]
    fn test_achievement_bold_becomes_strong() {
        let record = parse(
            "### Experience\n#### Lead (2020 - 2021) - Acme\n**Platform**\n- Led **migration** effort",
        );
        assert_eq!(
            record.jobs[0].achievements,
            vec!["Led <strong>migration</strong> effort"]
        );
    }

    #[test]
    fn test_bullets_before_description_are_ignored() {
        let record = parse(
            "### Experience\n#### Lead (2020) - Acme\n- too early\n**Platform**\n- kept\n**Technologies**: Rust\n- too late",
        );
        assert_eq!(record.jobs[0].achievements, vec!["kept"]);
        assert_eq!(record.jobs[0].technologies, "Rust");
    }

    #[test]
    fn test_job_body_outside_experience_section_is_ignored() {
        let record = parse("#### Lead (2020) - Acme\n**Platform**\n- bullet");
        assert_eq!(record.jobs.len(), 1);
        assert_eq!(record.jobs[0].description, "");
        assert!(record.jobs[0].achievements.is_empty());
    }

    #[test]
    fn test_contact_heuristics_shadow_bullets() {
        let record = parse(
            "### Experience\n#### Lead (2020) - Acme\n**Platform**\n- Built a mailing pipeline\n- Paged @oncall nightly\n- Shipped v2",
        );
        assert_eq!(record.jobs[0].achievements, vec!["Shipped v2"]);
        assert_eq!(record.telegram, "@oncall");
        assert_eq!(record.email, "");
    }

    #[test]
    fn test_email_line_detected_by_mail_substring() {
        let record = parse("E-mail me at jane.doe@corp.io\nTelegram: none");
        assert_eq!(record.email, "jane.doe@corp.io");
        assert_eq!(record.telegram, "");
    }

    #[test]
    fn test_unknown_section_keeps_current_mode() {
        let record = parse("### Skills\n**Frontend:** React\n### Hobbies\n**Frontend:** Vue");
        assert_eq!(record.skills.frontend, "Vue");
    }

    #[test]
    fn test_skills_label_without_closing_marker_keeps_line() {
        let record = parse("### Skills\n**Backend: Rust, Go");
        assert_eq!(record.skills.backend, "**Backend: Rust, Go");
    }

    #[test]
    fn test_education_and_languages_last_write_wins() {
        let record = parse(
            "### Education\n**2010 - 2014** BSc\nState College\n**2014 - 2016**\nTech Institute\nDepartment of Physics\n### Languages\nEnglish - C1\nEnglish - C2\nRussian - native",
        );
        assert_eq!(record.education.period, "2014 - 2016");
        assert_eq!(record.education.university, "Tech Institute");
        assert_eq!(record.education.faculty, "Department of Physics");
        assert_eq!(record.languages.english, "English - C2");
        assert_eq!(record.languages.russian, "Russian - native");
    }

    #[test]
    fn test_section_heading_case_insensitive() {
        assert_eq!(SectionMode::from_heading("work history"), Some(SectionMode::Experience));
        assert_eq!(SectionMode::from_heading("Language"), Some(SectionMode::Languages));
        assert_eq!(SectionMode::from_heading("Projects"), None);
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(SAMPLE_RESUME), parse(SAMPLE_RESUME));
    }

    #[test]
    fn test_crlf_line_endings() {
        let record = parse("# Jane Doe\r\n## Engineer\r\n");
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.title, "Engineer");
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let record = parse("\u{feff}# Ivan Petrov\n## Dev");
        assert_eq!(record.name, "Ivan Petrov");
        assert_eq!(record.title, "Dev");
    }

    #[test]
    fn test_tech_label_is_read_as_description() {
        let record = parse("### Experience\n#### Dev (2020) - Acme\n**Tech**: Go\n- Built CLI");
        let job = &record.jobs[0];
        assert_eq!(job.description, "Tech**: Go");
        assert_eq!(job.technologies, "");
        assert_eq!(job.achievements, vec!["Built CLI"]);
    }

    #[test]
    fn test_contact_heuristics_shadow_headings() {
        let record = parse(
            "### Experience\n#### Lead (2020) - mail.ru\n**Platform**\n### Work @ home\n#### Dev (2021) - Acme",
        );
        assert_eq!(record.jobs.len(), 1);
        assert_eq!(record.jobs[0].company, "Acme");
        assert_eq!(record.jobs[0].description, "");
        assert_eq!(record.email, "");
        assert_eq!(record.telegram, "");
    }
}
