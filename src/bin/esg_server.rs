//! esg-server: ESG questionnaire REST API
//!
//! Stores one questionnaire response per user and financial year, with the
//! derived sustainability ratios computed on every save.
//!
//! ## Configuration
//! - `config.yaml`, `--config <path>` / `-c <path>`, or `ESG_CONFIG`
//! - `ESG__SERVER__PORT`, `ESG__STORAGE__TYPE`, ... override file values
//! - `ESG_LOG`: tracing filter (default: info)

use std::sync::Arc;

use tracing::{error, info, warn};

use esg_ledger::config::Config;
use esg_ledger::handlers::rest::{serve, AppState, StaticTokenResolver};
use esg_ledger::services::ResponseService;
use esg_ledger::storage::init_storage;
use esg_ledger::utils::bootstrap::{init_tracing, parse_config_path};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = parse_config_path();
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!(error = %e, "failed to load configuration");
        e
    })?;

    info!(
        address = %config.server.bind_address(),
        storage = ?config.storage.storage_type,
        "starting esg-server"
    );

    if config.auth.tokens.is_empty() {
        warn!("no auth tokens configured; every authenticated route will answer 401");
    }

    let store = init_storage(&config.storage).await?;
    let service = ResponseService::new(store.clone());
    let resolver = Arc::new(StaticTokenResolver::from_config(&config.auth));
    let state = AppState::new(service, resolver);

    let served = serve(state, &config.server, shutdown_signal()).await;
    store.close().await;
    served?;

    info!("esg-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
