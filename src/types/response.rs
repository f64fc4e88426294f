use serde::{Deserialize, Serialize};

// ===== Generation Response Types =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn success(html: String) -> Self {
        Self {
            success: true,
            html: Some(html),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            html: None,
            error: Some(error),
        }
    }
}

impl From<anyhow::Result<String>> for GenerationResult {
    fn from(result: anyhow::Result<String>) -> Self {
        match result {
            Ok(html) => Self::success(html),
            Err(e) => Self::failure(format!("{:#}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_omits_html() {
        let json = serde_json::to_value(GenerationResult::failure("boom".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "error": "boom" }));
    }

    #[test]
    fn test_from_error_keeps_context_chain() {
        let result: anyhow::Result<String> =
            Err(anyhow::anyhow!("no such file").context("Failed to read template"));
        let generation = GenerationResult::from(result);
        assert!(!generation.success);
        assert_eq!(
            generation.error.as_deref(),
            Some("Failed to read template: no such file")
        );
    }
}
