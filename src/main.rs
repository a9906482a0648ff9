//! BugSense AI server binary.

use std::sync::Arc;

use bugsense::adapters::ai::{FailoverInvoker, ProviderRegistry};
use bugsense::config::AppConfig;
use bugsense::{server, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server.log_filter, config.server.json_logs());
    config.validate()?;

    // An empty registry still starts; every analysis then answers 503.
    let registry = ProviderRegistry::from_config(&config.ai);
    let invoker = Arc::new(FailoverInvoker::new(registry));

    server::serve(&config.server, invoker).await
}
