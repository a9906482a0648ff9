//! Response Normalizer - turns raw model text into an [`AnalysisPayload`].
//!
//! Models often wrap their JSON in a fenced code block, sometimes tagged
//! `json`. A block is only recognised when its fences sit on their own lines,
//! so fences quoted inside JSON strings (escaped newlines) never match. When
//! the block does not parse, the whole reply is tried. Anything unparseable
//! yields the fallback payload, so this never fails.

use super::AnalysisPayload;

/// Length of the fallback summary, in characters.
pub const FALLBACK_SUMMARY_CHARS: usize = 100;

const OPEN_FENCES: [&str; 2] = ["```json\n", "```\n"];
const CLOSE_FENCE: &str = "\n```";

/// Parses `raw` into a payload, or builds the fallback from `fallback_seed`.
pub fn normalize(raw: &str, fallback_seed: &str) -> AnalysisPayload {
    let whole = raw.trim();
    let parsed = match extract_fenced(raw) {
        Some(block) => parse_payload(block.trim()).or_else(|_| parse_payload(whole)),
        None => parse_payload(whole),
    };

    match parsed {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(
                error = %e,
                response_len = raw.len(),
                "model response is not valid analysis JSON, using fallback payload"
            );
            fallback_payload(fallback_seed)
        }
    }
}

/// Only a JSON object is a payload; arrays and scalars are rejected.
fn parse_payload(text: &str) -> Result<AnalysisPayload, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }
    serde_json::from_value(value)
}

/// Deterministic placeholder analysis used when the model output can't be parsed.
pub fn fallback_payload(seed: &str) -> AnalysisPayload {
    AnalysisPayload {
        summary: seed.chars().take(FALLBACK_SUMMARY_CHARS).collect(),
        reproduction_steps: "Reproduction steps could not be auto-generated".to_string(),
        root_cause: "Analysis pending manual review".to_string(),
        affected_module: "Unknown".to_string(),
        suggested_fix: "Manual analysis required".to_string(),
        test_cases: "Test cases require manual creation".to_string(),
        ..AnalysisPayload::default()
    }
}

/// Body of the first line-delimited fenced block.
///
/// A `json`-tagged opening fence (any case) is preferred over a bare one.
/// Returns `None` without a matching closing fence.
fn extract_fenced(raw: &str) -> Option<&str> {
    // ASCII lowering keeps byte offsets valid for `raw`.
    let lowered = raw.to_ascii_lowercase();

    OPEN_FENCES.iter().find_map(|open| {
        let start = lowered.find(open)? + open.len();
        let len = lowered[start..].find(CLOSE_FENCE)?;
        Some(&raw[start..start + len])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{Priority, Severity};

    const JSON: &str = r#"{"summary":"Crash on save","reproductionSteps":"1. Save","rootCause":"NPE","affectedModule":"Editor","suggestedFix":"Guard null","testCases":"test()","priority":"High","severity":"Blocker"}"#;

    #[test]
    fn parses_unfenced_json() {
        let payload = normalize(JSON, "seed");
        assert_eq!(payload.summary, "Crash on save");
        assert_eq!(payload.priority, Priority::High);
        assert_eq!(payload.severity, Severity::Blocker);
    }

    #[test]
    fn fenced_and_unfenced_json_normalize_identically() {
        let plain = normalize(JSON, "seed");

        for raw in [
            format!("```json\n{}\n```", JSON),
            format!("```\n{}\n```", JSON),
            format!("Here is the analysis:\n```JSON\n{}\n```\nLet me know!", JSON),
            format!("  ```json\n{}\n```  ", JSON),
        ] {
            assert_eq!(normalize(&raw, "seed"), plain, "input: {}", raw);
        }
    }

    #[test]
    fn first_fenced_block_wins() {
        let raw = format!("```json\n{}\n```\n```json\n{{\"summary\":\"other\"}}\n```", JSON);
        assert_eq!(normalize(&raw, "seed").summary, "Crash on save");
    }

    #[test]
    fn unterminated_fence_parses_whole_text_and_falls_back() {
        let raw = format!("```json\n{}", JSON);
        assert_eq!(normalize(&raw, "seed").affected_module, "Unknown");
    }

    #[test]
    fn non_json_falls_back_with_truncated_summary() {
        let description = "Login button does nothing when clicked after third retry attempt on slow network, very very long text beyond a hundred characters to test truncation";

        let payload = normalize("I think the login is broken.", description);

        let expected: String = description.chars().take(100).collect();
        assert_eq!(payload.summary, expected);
        assert_eq!(payload.summary.chars().count(), 100);
        assert_eq!(payload.priority, Priority::Medium);
        assert_eq!(payload.severity, Severity::Major);
        assert_eq!(payload.affected_module, "Unknown");
        assert_eq!(payload.reproduction_steps, "Reproduction steps could not be auto-generated");
        assert_eq!(payload.root_cause, "Analysis pending manual review");
        assert_eq!(payload.suggested_fix, "Manual analysis required");
        assert_eq!(payload.test_cases, "Test cases require manual creation");
    }

    #[test]
    fn fallback_truncates_on_char_boundaries() {
        let seed = "é".repeat(150);
        assert_eq!(fallback_payload(&seed).summary, "é".repeat(100));
    }

    #[test]
    fn short_seed_is_kept_whole() {
        assert_eq!(fallback_payload("Crash").summary, "Crash");
    }

    #[test]
    fn json_array_is_not_a_payload() {
        assert_eq!(normalize("[1, 2, 3]", "seed").summary, "seed");
    }

    #[test]
    fn code_fence_inside_string_value_is_not_a_block() {
        let reply = r#"{"summary":"Crash on save","testCases":"```javascript\ntest('saves', () => {});\n```","priority":"High"}"#;

        let plain = normalize(reply, "seed");
        let fenced = normalize(&format!("```json\n{}\n```", reply), "seed");

        assert_eq!(plain.summary, "Crash on save");
        assert_eq!(
            plain.test_cases,
            "```javascript\ntest('saves', () => {});\n```"
        );
        assert_eq!(fenced, plain);
    }

    #[test]
    fn single_line_fence_is_not_a_block() {
        let raw = format!("```json {} ```", JSON);
        assert_eq!(normalize(&raw, "seed").affected_module, "Unknown");
    }

    #[test]
    fn json_tagged_block_is_preferred_over_bare_block() {
        let raw = format!("```\nnpm test\n```\n\n```json\n{}\n```", JSON);
        assert_eq!(normalize(&raw, "seed").summary, "Crash on save");
    }

    #[test]
    fn empty_response_falls_back() {
        assert_eq!(normalize("", "seed"), fallback_payload("seed"));
    }
}
