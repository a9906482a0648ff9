//! Process configuration.
//!
//! Values come from `BUGSENSE__`-prefixed environment variables, with `__`
//! between nesting levels (`BUGSENSE__SERVER__PORT`, `BUGSENSE__AI__GROQ_MODEL`).
//! A `.env` file is read first when present. Provider keys may also be given
//! under their usual names (`GROQ_API_KEY`, `OPENAI_API_KEY`, ...).
//!
//! ```no_run
//! use bugsense::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! ```

mod ai;
mod error;
mod server;

pub use ai::{is_usable_key, AiConfig, AiProvider, MIN_KEY_LENGTH};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig, MAX_REQUEST_TIMEOUT_SECS};

use serde::Deserialize;
use std::collections::HashMap;

const ENV_PREFIX: &str = "BUGSENSE";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Reads `.env`, then the process environment.
    ///
    /// Prefixed AI settings take precedence over the conventional
    /// unprefixed names.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let plain_env: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(plain_env)
    }

    fn from_sources(plain_env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let prefixed = config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .source(Some(plain_env.clone()));

        let mut loaded: AppConfig = config::Config::builder()
            .add_source(prefixed)
            .build()?
            .try_deserialize()?;

        loaded.ai = loaded.ai.with_fallback_secrets(&plain_env);
        Ok(loaded)
    }

    /// Checks the values the server needs to bind and serve.
    ///
    /// The request timeout must outlast a full failover pass, otherwise the
    /// timeout layer would cut the pass short before exhaustion is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;

        let required_secs = self.ai.failover_budget_secs();
        if self.server.request_timeout_secs < required_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                required_secs,
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
