//! Payloads carried by log events

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

/// A log message is either plain text, or a structured error
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(untagged)]
pub enum LogMessage {
    Text(String),
    Error(Diagnostic),
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Diagnostic> for LogMessage {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::Error(diagnostic)
    }
}

/// Structured error as produced by the build pipeline. Every field is optional
/// since producers are free to send partial error objects, and a field of the
/// wrong shape is treated as missing.
#[derive(Debug, PartialEq, Eq, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Diagnostic {
    #[serde(deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub stack: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub hints: Vec<String>,
}

/// Decodes a field, falling back to its default when the value has the
/// wrong type
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

const FALLBACK_DESCRIPTION: &str = "Unknown error";

impl Diagnostic {
    pub fn new(message: &str) -> Self {
        Self { message: Some(message.to_string()), ..Default::default() }
    }

    /// Builds a diagnostic out of an error chain, with each cause
    /// becoming a line of detail
    pub fn from_error(err: &anyhow::Error) -> Self {
        let causes = err
            .chain()
            .skip(1)
            .map(|cause| format!("caused by: {}", cause))
            .collect::<Vec<String>>();

        Self {
            message: Some(err.to_string()),
            stack: if causes.is_empty() { None } else { Some(causes.join("\n")) },
            ..Default::default()
        }
    }

    /// The human-readable description, degrading to the error name and then
    /// to a generic placeholder
    pub fn description(&self) -> &str {
        non_empty(&self.message)
            .or_else(|| non_empty(&self.name))
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// Lines of detail following the description. Stack traces conventionally
    /// start by restating the error, so that line is skipped.
    pub fn detail_lines(&self) -> Vec<String> {
        let description = self.description();
        let mut lines = Vec::new();

        if let Some(stack) = non_empty(&self.stack) {
            let mut stack_lines = stack.lines().peekable();
            if let Some(first) = stack_lines.peek() {
                if restates(first, description) {
                    stack_lines.next();
                }
            }
            lines.extend(stack_lines.filter(|l| !l.trim().is_empty()).map(str::to_string));
        }

        lines.extend(self.hints.iter().map(|hint| format!("hint: {}", hint)));
        lines
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn restates(line: &str, description: &str) -> bool {
    let line = line.trim();
    line == description || line.ends_with(&format!(": {}", description))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_description_fallbacks() {
        assert_eq!(Diagnostic::new("boom").description(), "boom");

        let named = Diagnostic { name: Some("TypeError".to_string()), ..Default::default() };
        assert_eq!(named.description(), "TypeError");

        let blank = Diagnostic { message: Some("".to_string()), ..Default::default() };
        assert_eq!(blank.description(), "Unknown error");
    }

    #[test]
    fn test_detail_skips_restated_header() {
        let diagnostic = Diagnostic {
            message: Some("error".to_string()),
            name: Some("Error".to_string()),
            stack: Some("Error: error\n    at foo (a.js:1:1)\n    at bar (b.js:2:2)".to_string()),
            hints: vec!["check the config".to_string()],
        };

        let expected = vec![
            "    at foo (a.js:1:1)".to_string(),
            "    at bar (b.js:2:2)".to_string(),
            "hint: check the config".to_string(),
        ];
        assert_eq!(diagnostic.detail_lines(), expected);
    }

    #[test]
    fn test_from_error_chain() {
        let err = Err::<(), _>(anyhow!("disk on fire"))
            .context("Failed to read events")
            .unwrap_err();

        let diagnostic = Diagnostic::from_error(&err);
        assert_eq!(diagnostic.description(), "Failed to read events");
        assert_eq!(diagnostic.detail_lines(), vec!["caused by: disk on fire".to_string()]);
    }
}
