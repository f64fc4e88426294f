// src/utils.rs
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Normalize language code; templates ship in English and Russian only
pub fn normalize_language(lang: Option<&str>) -> String {
    match lang.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("ru") | Some("russian") | Some("русский") => "ru".to_string(),
        Some("en") | Some("english") | Some("английский") => "en".to_string(),
        _ => "en".to_string(), // Default to English for None or unknown languages
    }
}

/// Build output file path
pub fn output_file_path(base: &Path, stem: &str, template: &str, lang: &str, ext: &str) -> PathBuf {
    base.join(format!(
        "{}_{}_{}_{}.{}",
        stem,
        template,
        lang,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"),
        ext
    ))
}

/// File name without its extension, `resume` when there is none
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume")
        .to_string()
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Validate file extension against allowed types
pub fn validate_file_extension(filename: &str, allowed: &[&str]) -> Result<()> {
    let ext = get_file_extension(filename)
        .ok_or_else(|| anyhow::anyhow!("File has no extension: {}", filename))?;

    if !allowed.contains(&ext.as_str()) {
        anyhow::bail!(
            "Unsupported file extension: {}. Allowed: {:?}",
            ext,
            allowed
        );
    }

    Ok(())
}

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
