//! Linguistic Analysis Service
//!
//! Loads configuration, connects the external capabilities once, then serves
//! `/`, `/health` and `/analyze`.

use anyhow::Result;
use tracing::info;

use linguistic_service::capabilities::remote::load_capabilities;
use linguistic_service::config::ServiceConfig;
use linguistic_service::server::run_server;
use linguistic_service::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::load()?;
    init_tracing(&config.log_filter)?;

    info!("🏛️  Starting {}...", config.service_name);
    let capabilities = load_capabilities(&config.capabilities).await?;
    info!("Capabilities: {:?}", capabilities);

    run_server(&config, &capabilities).await
}
