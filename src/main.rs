//! Premium API - Insurance Premium Prediction Service
//!
//! # Usage
//!
//! ```bash
//! # Run with the bundled model artifact on 0.0.0.0:8000
//! cargo run --release
//!
//! # Custom model and bind address
//! ./premium-api --model /srv/models/premium.json --addr 127.0.0.1:9000
//! ```
//!
//! # Environment Variables
//!
//! - `PREMIUM_CONFIG`: Path to premium_config.toml
//! - `PREMIUM_SERVER_ADDR`: Bind address (overrides the config file)
//! - `PREMIUM_MODEL_PATH`: Model artifact path (overrides the config file)
//! - `PREMIUM_CORS_ORIGINS`: Comma-separated allowed origins
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use premium_api::api::{create_app, ServiceState};
use premium_api::config::{self, ServiceConfig};
use premium_api::model::{LinearArtifact, PredictionGateway};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "premium-api")]
#[command(about = "Insurance premium prediction service")]
#[command(version)]
struct CliArgs {
    /// Path to premium_config.toml (otherwise PREMIUM_CONFIG, then ./premium_config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8000")
    #[arg(short, long, env = "PREMIUM_SERVER_ADDR")]
    addr: Option<String>,

    /// Override the model artifact path (default: "model/premium_model.json")
    #[arg(short, long, value_name = "FILE", env = "PREMIUM_MODEL_PATH")]
    model: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Load the model artifact. Any failure aborts startup.
fn load_gateway(config: &ServiceConfig) -> Result<PredictionGateway> {
    let path = &config.model.path;
    let artifact = LinearArtifact::load_from_disk(path)
        .with_context(|| format!("Failed to load model artifact from {}", path.display()))?;

    info!(
        path = %path.display(),
        version = %artifact.version,
        numeric = artifact.numeric.len(),
        categorical = artifact.categorical.len(),
        "✓ Model artifact loaded"
    );

    Ok(PredictionGateway::loaded(Arc::new(artifact))
        .with_version_override(config.model.version_override.clone()))
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    let mut service_config =
        ServiceConfig::load(args.config.as_deref()).context("Failed to load service config")?;
    if let Some(addr) = args.addr {
        service_config.server.addr = addr;
    }
    if let Some(model) = args.model {
        service_config.model.path = model;
    }
    config::init(service_config);
    let cfg = config::get();

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Premium API - Insurance Premium Prediction");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let gateway = load_gateway(cfg)?;
    let tiers = cfg.city_tiers.table();
    info!(
        tier_1 = tiers.tier_1_len(),
        tier_2 = tiers.tier_2_len(),
        "City tier lists ready"
    );

    let state = ServiceState::new(gateway, Arc::new(tiers));
    let app = create_app(state, &cfg.server);

    let listener = tokio::net::TcpListener::bind(&cfg.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", cfg.server.addr))?;
    info!("✓ HTTP server listening on {}", cfg.server.addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await;

    if let Err(e) = result {
        error!("HTTP server error: {}", e);
        return Err(anyhow::anyhow!("HTTP server error: {}", e));
    }

    info!("✓ Premium API shutdown complete");
    Ok(())
}
