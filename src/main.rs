//! HTTP server for the Severance Settlement Engine.
//!
//! Environment:
//! - `SEVERANCE_CONFIG_DIR`: configuration directory (default `./config/clt-2025`)
//! - `SEVERANCE_BIND_ADDR`: listen address (default `0.0.0.0:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;

use severance_engine::api::{AppState, create_router};
use severance_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/clt-2025";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config_dir =
        env::var("SEVERANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        env::var("SEVERANCE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let loader = ConfigLoader::load(&config_dir).inspect_err(|err| {
        error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
    })?;
    info!(
        config_dir = %config_dir,
        code = %loader.metadata().code,
        version = %loader.metadata().version,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Severance engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
