//! AI provider configuration

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::error::ValidationError;

/// Keys shorter than this are never real credentials.
pub const MIN_KEY_LENGTH: usize = 20;

/// Substrings found in sample `.env` files and masked keys.
const PLACEHOLDER_MARKERS: [&str; 3] = ["your-key", "your-api-key", "xxxxx"];

/// Returns true if `secret` looks like a real API key.
///
/// Rejects missing or blank values, known placeholder text, keys shorter than
/// [`MIN_KEY_LENGTH`], and (when `prefix` is given) keys that do not start
/// with that prefix.
pub fn is_usable_key(secret: Option<&str>, prefix: Option<&str>) -> bool {
    let Some(secret) = secret else {
        return false;
    };
    if secret.trim().is_empty() {
        return false;
    }
    if PLACEHOLDER_MARKERS.iter().any(|marker| secret.contains(marker)) {
        return false;
    }
    if secret.chars().count() < MIN_KEY_LENGTH {
        return false;
    }
    match prefix {
        Some(prefix) => secret.starts_with(prefix),
        None => true,
    }
}

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Groq API key (OpenAI-compatible endpoint)
    pub groq_api_key: Option<String>,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Google Gemini API key
    pub google_api_key: Option<String>,

    pub groq_model: Option<String>,
    pub openai_model: Option<String>,
    pub anthropic_model: Option<String>,
    pub gemini_model: Option<String>,

    /// Per-call transport timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// The fixed set of supported LLM backends.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Groq,
    OpenAI,
    Anthropic,
    Gemini,
}

impl AiProvider {
    /// Every provider, in failover priority order.
    pub const ALL: [AiProvider; 4] = [
        AiProvider::Groq,
        AiProvider::OpenAI,
        AiProvider::Anthropic,
        AiProvider::Gemini,
    ];

    /// Stable identifier used in logs and error reports.
    pub fn name(&self) -> &'static str {
        match self {
            AiProvider::Groq => "groq",
            AiProvider::OpenAI => "openai",
            AiProvider::Anthropic => "anthropic",
            AiProvider::Gemini => "gemini",
        }
    }

    /// Conventional environment variable holding the API key.
    pub fn secret_var(&self) -> &'static str {
        match self {
            AiProvider::Groq => "GROQ_API_KEY",
            AiProvider::OpenAI => "OPENAI_API_KEY",
            AiProvider::Anthropic => "ANTHROPIC_API_KEY",
            AiProvider::Gemini => "GOOGLE_API_KEY",
        }
    }

    /// Conventional environment variable holding the model override.
    pub fn model_var(&self) -> &'static str {
        match self {
            AiProvider::Groq => "GROQ_MODEL",
            AiProvider::OpenAI => "OPENAI_MODEL",
            AiProvider::Anthropic => "ANTHROPIC_MODEL",
            AiProvider::Gemini => "GEMINI_MODEL",
        }
    }

    /// Required key prefix, if the vendor issues recognisable keys.
    pub fn key_prefix(&self) -> Option<&'static str> {
        match self {
            AiProvider::Groq => Some("gsk_"),
            AiProvider::OpenAI => Some("sk-"),
            AiProvider::Anthropic => Some("sk-ant-"),
            AiProvider::Gemini => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::Groq => "llama-3.3-70b-versatile",
            AiProvider::OpenAI => "gpt-4o-mini",
            AiProvider::Anthropic => "claude-3-5-sonnet-20241022",
            AiProvider::Gemini => "gemini-1.5-flash",
        }
    }
}

impl AiConfig {
    /// Builds a configuration from a map of conventional secret names
    /// (`GROQ_API_KEY`, `OPENAI_MODEL`, ...).
    pub fn from_secrets(secrets: &HashMap<String, String>) -> Self {
        Self::default().with_fallback_secrets(secrets)
    }

    /// Fills any unset key or model from a map of conventional secret names.
    ///
    /// Values already present (e.g. from `BUGSENSE__AI__*`) win.
    pub fn with_fallback_secrets(mut self, secrets: &HashMap<String, String>) -> Self {
        for provider in AiProvider::ALL {
            let (key, model) = match provider {
                AiProvider::Groq => (&mut self.groq_api_key, &mut self.groq_model),
                AiProvider::OpenAI => (&mut self.openai_api_key, &mut self.openai_model),
                AiProvider::Anthropic => (&mut self.anthropic_api_key, &mut self.anthropic_model),
                AiProvider::Gemini => (&mut self.google_api_key, &mut self.gemini_model),
            };
            if key.is_none() {
                *key = secrets.get(provider.secret_var()).cloned();
            }
            if model.is_none() {
                *model = secrets.get(provider.model_var()).cloned();
            }
        }
        self
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Raw API key configured for a provider.
    pub fn api_key(&self, provider: AiProvider) -> Option<&str> {
        match provider {
            AiProvider::Groq => self.groq_api_key.as_deref(),
            AiProvider::OpenAI => self.openai_api_key.as_deref(),
            AiProvider::Anthropic => self.anthropic_api_key.as_deref(),
            AiProvider::Gemini => self.google_api_key.as_deref(),
        }
    }

    /// Model for a provider: the configured override or the provider default.
    pub fn model(&self, provider: AiProvider) -> String {
        let configured = match provider {
            AiProvider::Groq => self.groq_model.as_deref(),
            AiProvider::OpenAI => self.openai_model.as_deref(),
            AiProvider::Anthropic => self.anthropic_model.as_deref(),
            AiProvider::Gemini => self.gemini_model.as_deref(),
        };
        configured
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(provider.default_model())
            .to_string()
    }

    /// Check if a provider has a usable API key
    pub fn is_usable(&self, provider: AiProvider) -> bool {
        is_usable_key(self.api_key(provider), provider.key_prefix())
    }

    /// Providers with usable keys, in priority order.
    pub fn usable_providers(&self) -> Vec<AiProvider> {
        AiProvider::ALL
            .into_iter()
            .filter(|p| self.is_usable(*p))
            .collect()
    }

    /// Longest a failover pass can take: one transport timeout per provider.
    pub fn failover_budget_secs(&self) -> u64 {
        self.timeout_secs.saturating_mul(AiProvider::ALL.len() as u64)
    }

    /// Checks the transport timeout.
    ///
    /// Having no usable provider is not an error; requests answer 503.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            google_api_key: None,
            groq_model: None,
            openai_model: None,
            anthropic_model: None,
            gemini_model: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROQ_KEY: &str = "gsk_abcdefghijklmnopqrstuvwxyz";
    const ANTHROPIC_KEY: &str = "sk-ant-REDACTED";

    #[test]
    fn test_missing_or_blank_key_is_unusable() {
        assert!(!is_usable_key(None, None));
        assert!(!is_usable_key(Some(""), None));
        assert!(!is_usable_key(Some("                         "), None));
    }

    #[test]
    fn test_placeholder_keys_are_unusable() {
        assert!(!is_usable_key(Some("sk-ant-REDACTED"), Some("sk-ant-")));
        assert!(!is_usable_key(Some("paste-your-api-key-in-this-slot"), None));
        assert!(!is_usable_key(Some("gsk_xxxxxxxxxxxxxxxxxxxxxxxx"), Some("gsk_")));
    }

    #[test]
    fn test_short_key_is_unusable() {
        assert!(!is_usable_key(Some("gsk_short"), Some("gsk_")));
        // exactly the threshold passes
        assert!(is_usable_key(Some("abcdefghijklmnopqrst"), None));
        assert!(!is_usable_key(Some("abcdefghijklmnopqrs"), None));
    }

    #[test]
    fn test_prefix_is_enforced_when_given() {
        assert!(is_usable_key(Some(GROQ_KEY), Some("gsk_")));
        assert!(!is_usable_key(Some(GROQ_KEY), Some("sk-ant-")));
        assert!(is_usable_key(Some(GROQ_KEY), None));
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert!(config.usable_providers().is_empty());
    }

    #[test]
    fn test_priority_order_is_fixed() {
        let names: Vec<_> = AiProvider::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["groq", "openai", "anthropic", "gemini"]);
    }

    #[test]
    fn test_model_override_and_default() {
        let config = AiConfig {
            openai_model: Some("gpt-4o".to_string()),
            groq_model: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model(AiProvider::OpenAI), "gpt-4o");
        assert_eq!(config.model(AiProvider::Groq), "llama-3.3-70b-versatile");
        assert_eq!(config.model(AiProvider::Gemini), "gemini-1.5-flash");
    }

    #[test]
    fn test_from_secrets_reads_conventional_names() {
        let secrets = HashMap::from([
            ("GROQ_API_KEY".to_string(), GROQ_KEY.to_string()),
            ("ANTHROPIC_MODEL".to_string(), "claude-3-haiku".to_string()),
        ]);
        let config = AiConfig::from_secrets(&secrets);
        assert_eq!(config.groq_api_key.as_deref(), Some(GROQ_KEY));
        assert_eq!(config.model(AiProvider::Anthropic), "claude-3-haiku");
        assert_eq!(config.usable_providers(), vec![AiProvider::Groq]);
    }

    #[test]
    fn test_fallback_secrets_do_not_override_explicit_values() {
        let config = AiConfig {
            anthropic_api_key: Some(ANTHROPIC_KEY.to_string()),
            ..Default::default()
        }
        .with_fallback_secrets(&HashMap::from([(
            "ANTHROPIC_API_KEY".to_string(),
            "sk-ant-REDACTED".to_string(),
        )]));
        assert_eq!(config.anthropic_api_key.as_deref(), Some(ANTHROPIC_KEY));
    }

    #[test]
    fn test_validation_without_providers_passes() {
        let config = AiConfig {
            openai_api_key: Some("sk-your-api-key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.usable_providers().is_empty());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
    }

    #[test]
    fn test_failover_budget_covers_every_provider() {
        let config = AiConfig {
            timeout_secs: 45,
            ..Default::default()
        };
        assert_eq!(config.failover_budget_secs(), 180);
        assert_eq!(AiConfig::default().failover_budget_secs(), 480);
    }
}
