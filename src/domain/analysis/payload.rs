//! Analysis payload - the structured bug ticket produced from model output.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Structured analysis of one bug report.
///
/// Every field is always present. Fields the model leaves out deserialize to
/// empty text, and list-valued text (a common model habit for steps) is
/// joined line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisPayload {
    #[serde(deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reproduction_steps: String,
    #[serde(deserialize_with = "lenient_text")]
    pub root_cause: String,
    #[serde(deserialize_with = "lenient_text")]
    pub affected_module: String,
    #[serde(deserialize_with = "lenient_text")]
    pub suggested_fix: String,
    #[serde(deserialize_with = "lenient_text")]
    pub test_cases: String,
    pub priority: Priority,
    pub severity: Severity,
}

impl Default for AnalysisPayload {
    fn default() -> Self {
        Self {
            summary: String::new(),
            reproduction_steps: String::new(),
            root_cause: String::new(),
            affected_module: String::new(),
            suggested_fix: String::new(),
            test_cases: String::new(),
            priority: Priority::Medium,
            severity: Severity::Major,
        }
    }
}

/// Ticket priority.
///
/// Values outside the known set are kept as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Critical => "Critical",
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(s) => s,
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Priority::Critical,
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Other(value),
        }
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defect severity.
///
/// Values outside the known set are kept as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Blocker,
    Critical,
    #[default]
    Major,
    Minor,
    Trivial,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Blocker => "Blocker",
            Severity::Critical => "Critical",
            Severity::Major => "Major",
            Severity::Minor => "Minor",
            Severity::Trivial => "Trivial",
            Severity::Other(s) => s,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "blocker" => Severity::Blocker,
            "critical" => Severity::Critical,
            "major" => Severity::Major,
            "minor" => Severity::Minor,
            "trivial" => Severity::Trivial,
            _ => Severity::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Related user story, used to ground the analysis prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStoryContext {
    pub summary: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub acceptance_criteria: String,
    pub components: Vec<String>,
}

/// Accepts a string, a list, a scalar or null where text is expected.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

fn value_to_text(value: serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_fields() {
        let payload: AnalysisPayload = serde_json::from_value(json!({
            "summary": "Login fails",
            "reproductionSteps": "1. Open login",
            "rootCause": "Null session",
            "affectedModule": "Auth",
            "suggestedFix": "Check session",
            "testCases": "it('logs in')",
            "priority": "High",
            "severity": "Critical"
        }))
        .unwrap();

        assert_eq!(payload.reproduction_steps, "1. Open login");
        assert_eq!(payload.affected_module, "Auth");
        assert_eq!(payload.priority, Priority::High);
        assert_eq!(payload.severity, Severity::Critical);
    }

    #[test]
    fn missing_fields_default() {
        let payload: AnalysisPayload = serde_json::from_value(json!({"summary": "x"})).unwrap();

        assert_eq!(payload.summary, "x");
        assert_eq!(payload.root_cause, "");
        assert_eq!(payload.priority, Priority::Medium);
        assert_eq!(payload.severity, Severity::Major);
    }

    #[test]
    fn list_valued_steps_are_joined() {
        let payload: AnalysisPayload = serde_json::from_value(json!({
            "reproductionSteps": ["1. Open app", "2. Tap login"],
            "testCases": null
        }))
        .unwrap();

        assert_eq!(payload.reproduction_steps, "1. Open app\n2. Tap login");
        assert_eq!(payload.test_cases, "");
    }

    #[test]
    fn unknown_priority_is_kept_verbatim() {
        let payload: AnalysisPayload =
            serde_json::from_value(json!({"priority": "Urgent", "severity": "minor"})).unwrap();

        assert_eq!(payload.priority, Priority::Other("Urgent".to_string()));
        assert_eq!(payload.priority.to_string(), "Urgent");
        assert_eq!(payload.severity, Severity::Minor);
    }

    #[test]
    fn serializes_with_camel_case_and_plain_enums() {
        let value = serde_json::to_value(AnalysisPayload {
            summary: "s".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(value["summary"], "s");
        assert_eq!(value["affectedModule"], "");
        assert_eq!(value["priority"], "Medium");
        assert_eq!(value["severity"], "Major");
    }

    #[test]
    fn user_story_context_accepts_partial_input() {
        let story: UserStoryContext = serde_json::from_value(json!({
            "summary": "As a user I can log in",
            "components": ["Auth", "UI"]
        }))
        .unwrap();

        assert_eq!(story.components, vec!["Auth", "UI"]);
        assert_eq!(story.acceptance_criteria, "");
    }
}
