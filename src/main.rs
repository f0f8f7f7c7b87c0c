//! PaySphere HTTP server.
//!
//! Environment:
//! - `PAYSPHERE_CONFIG_DIR`: configuration directory (default `./config/paysphere`)
//! - `PAYSPHERE_BIND`: listen address (default `127.0.0.1:8080`)
//! - `PAYSPHERE_DATA`: JSON snapshot file; state is kept in memory only when unset
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::path::Path;

use paysphere::api::{AppState, create_router};
use paysphere::config::{ConfigLoader, PayrollConfig, RosterEntry};
use paysphere::engine::PayrollEngine;
use paysphere::store::JsonFileStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/paysphere";
const DEFAULT_BIND: &str = "127.0.0.1:8080";

fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

/// Loads the configuration directory, falling back to built-in defaults when
/// it does not exist.
fn load_config(dir: &str) -> Result<(PayrollConfig, Vec<RosterEntry>), Box<dyn std::error::Error>> {
    if !Path::new(dir).is_dir() {
        warn!(config_dir = %dir, "Configuration directory missing, using built-in rates");
        return Ok((PayrollConfig::default(), Vec::new()));
    }
    let loader = ConfigLoader::load(dir)?;
    Ok(loader.into_parts())
}

fn build_engine(
    config: PayrollConfig,
    data_path: Option<String>,
) -> Result<PayrollEngine, Box<dyn std::error::Error>> {
    let Some(path) = data_path else {
        return Ok(PayrollEngine::new(config));
    };
    let store = JsonFileStore::open(&path)?;
    let snapshot = store.snapshot().clone();
    info!(data = %path, "Using JSON snapshot store");
    Ok(PayrollEngine::restore(config, snapshot, Box::new(store))?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config_dir = env::var("PAYSPHERE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind = env::var("PAYSPHERE_BIND").unwrap_or_else(|_| DEFAULT_BIND.into());

    let (config, roster) = load_config(&config_dir)?;
    info!(
        company = %config.company().name,
        config_dir = %config_dir,
        "Configuration loaded"
    );

    let mut engine = build_engine(config, env::var("PAYSPHERE_DATA").ok())?;
    if engine.employee_count() == 0 && !roster.is_empty() {
        let seeded = engine.seed_roster(&roster);
        info!(seeded, "Seeded predefined employees");
    }

    let app = create_router(AppState::new(engine));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(address = %bind, "PaySphere listening");
    axum::serve(listener, app).await?;
    Ok(())
}
