//! Tracing initialisation for the server binary.
//!
//! Call [`init_tracing`] once at program start. `RUST_LOG` wins over the
//! configured filter when set. Later calls are ignored.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber.
///
/// * `default_filter` - directive used when `RUST_LOG` is unset or invalid
/// * `json` - emit newline-delimited JSON instead of human-readable lines
pub fn init_tracing(default_filter: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .try_init()
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init_tracing("info,bugsense=debug", false);
        init_tracing("not a [valid filter", true);
    }
}
