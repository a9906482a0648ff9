//! Prompt construction for the bug-analysis use cases.
//!
//! Builders are pure: same input, same prompt text.

use super::{AnalysisPayload, UserStoryContext};

pub const ANALYZE_SYSTEM_PROMPT: &str = "You are an expert QA analyst and software engineer. Analyze bug reports and generate comprehensive, developer-ready bug tickets. Always respond with valid JSON.";

pub const IDENTIFY_MODULE_SYSTEM_PROMPT: &str = "You are an expert at identifying software components and modules from bug descriptions. Respond with only the module name.";

pub const TEST_CASES_SYSTEM_PROMPT: &str =
    "You are an expert in writing Jest and React Testing Library tests. Generate comprehensive test cases.";

const ANALYSIS_SCHEMA: &str = r#"Please provide a structured analysis in the following JSON format:
{
  "summary": "Clear, concise bug title (max 100 chars)",
  "reproductionSteps": "Numbered step-by-step instructions to reproduce the bug",
  "rootCause": "Analysis of what might be causing this bug",
  "affectedModule": "The specific component, module, or feature affected",
  "suggestedFix": "Technical suggestion for how to fix this issue",
  "testCases": "Jest/React Testing Library test cases to verify the fix",
  "priority": "Critical|High|Medium|Low",
  "severity": "Blocker|Critical|Major|Minor|Trivial"
}

Be specific, technical, and actionable. Focus on clarity for developers. Respond ONLY with valid JSON."#;

/// User prompt for a full bug analysis.
pub fn analyze_user_prompt(
    description: &str,
    logs: Option<&str>,
    story: Option<&UserStoryContext>,
) -> String {
    let mut prompt = String::from(
        "Analyze the following bug report and generate a comprehensive, developer-ready bug ticket.\n\n",
    );

    if let Some(story) = story {
        prompt.push_str("**Related User Story Context:**\n");
        prompt.push_str(&format!("Summary: {}\n", story.summary));
        prompt.push_str(&format!("Description: {}\n", story.description));
        prompt.push_str(&format!("Acceptance Criteria: {}\n", story.acceptance_criteria));
        prompt.push_str(&format!("Components: {}\n\n", story.components.join(", ")));
    }

    prompt.push_str("**Bug Description from QA:**\n");
    prompt.push_str(description);
    prompt.push_str("\n\n");

    if let Some(logs) = logs.filter(|l| !l.trim().is_empty()) {
        prompt.push_str("**Logs/Error Messages:**\n");
        prompt.push_str(logs);
        prompt.push_str("\n\n");
    }

    prompt.push_str(ANALYSIS_SCHEMA);
    prompt
}

/// User prompt asking for the single most likely affected module.
pub fn identify_module_user_prompt(description: &str, available_components: &[String]) -> String {
    let mut prompt = format!(
        "Given the following bug description, identify the most likely affected module or component:\n\nBug Description: {}\n\n",
        description
    );

    if !available_components.is_empty() {
        prompt.push_str(&format!(
            "Available Components: {}\n\n",
            available_components.join(", ")
        ));
    }

    prompt.push_str(
        "Return ONLY the name of the most likely affected module/component. Be specific and concise.",
    );
    prompt
}

/// User prompt asking for test cases that cover a bug fix.
pub fn test_cases_user_prompt(analysis: &AnalysisPayload) -> String {
    format!(
        "Generate comprehensive Jest and React Testing Library test cases for the following bug fix:\n\n\
         Summary: {}\n\
         Reproduction Steps: {}\n\
         Suggested Fix: {}\n\n\
         Generate test cases that:\n\
         1. Test the bug scenario (should fail before fix)\n\
         2. Test the expected behavior (should pass after fix)\n\
         3. Test edge cases\n\
         4. Include proper setup, assertions, and cleanup\n\n\
         Return the test code in a well-formatted, ready-to-use format.",
        analysis.summary, analysis.reproduction_steps, analysis.suggested_fix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_prompt_without_optional_sections() {
        let prompt = analyze_user_prompt("Button broken", None, None);

        assert!(prompt.contains("**Bug Description from QA:**\nButton broken"));
        assert!(!prompt.contains("User Story"));
        assert!(!prompt.contains("Logs/Error Messages"));
        assert!(prompt.ends_with("Respond ONLY with valid JSON."));
    }

    #[test]
    fn analyze_prompt_includes_story_and_logs_in_order() {
        let story = UserStoryContext {
            summary: "Login".to_string(),
            description: "User logs in".to_string(),
            acceptance_criteria: "Redirects home".to_string(),
            components: vec!["Auth".to_string(), "UI".to_string()],
        };

        let prompt = analyze_user_prompt("Button broken", Some("TypeError: x"), Some(&story));

        let story_at = prompt.find("**Related User Story Context:**").unwrap();
        let bug_at = prompt.find("**Bug Description from QA:**").unwrap();
        let logs_at = prompt.find("**Logs/Error Messages:**\nTypeError: x").unwrap();
        assert!(story_at < bug_at && bug_at < logs_at);
        assert!(prompt.contains("Components: Auth, UI"));
    }

    #[test]
    fn blank_logs_are_omitted() {
        let prompt = analyze_user_prompt("Button broken", Some("   "), None);
        assert!(!prompt.contains("Logs/Error Messages"));
    }

    #[test]
    fn identify_prompt_lists_components_when_given() {
        let with = identify_module_user_prompt("Crash", &["Auth".to_string(), "Cart".to_string()]);
        let without = identify_module_user_prompt("Crash", &[]);

        assert!(with.contains("Available Components: Auth, Cart"));
        assert!(!without.contains("Available Components"));
    }

    #[test]
    fn test_cases_prompt_carries_analysis_fields() {
        let analysis = AnalysisPayload {
            summary: "Crash on save".to_string(),
            reproduction_steps: "1. Save".to_string(),
            suggested_fix: "Guard null".to_string(),
            ..Default::default()
        };

        let prompt = test_cases_user_prompt(&analysis);

        assert!(prompt.contains("Summary: Crash on save\n"));
        assert!(prompt.contains("Reproduction Steps: 1. Save\n"));
        assert!(prompt.contains("Suggested Fix: Guard null\n"));
    }
}
