//! keyvend - serve environment-configured API keys over HTTP
//!
//! A single `GET /api/keys` endpoint returns the non-empty values of a fixed
//! set of environment variables (`API_KEY_1`..`API_KEY_3` by default) so a
//! browser client can pick them up at runtime.

mod config;
mod router;

use clap::Parser;
use keyvend_keys::KeysState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "keyvend")]
#[command(about = "Serve environment-configured API keys over HTTP", long_about = None)]
struct Args {
    /// Port to listen on [default: 3000]
    #[arg(short, long, env = "KEYVEND_PORT")]
    port: Option<u16>,

    /// Host to bind to [default: 0.0.0.0]
    #[arg(long, env = "KEYVEND_HOST")]
    host: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "KEYVEND_CONFIG")]
    config: Option<PathBuf>,

    /// Prefix of numbered key variables [default: API_KEY_]
    #[arg(long, env = "KEYVEND_KEY_PREFIX")]
    key_prefix: Option<String>,

    /// Number of numbered key variables [default: 3]
    #[arg(long, env = "KEYVEND_KEY_COUNT")]
    key_count: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "KEYVEND_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "keyvend={level},keyvend_keys={level},tower_http=debug",
                    level = args.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = config::Config::load(args.config.as_deref())?;

    config.apply_overrides(args.port, args.host, args.key_prefix, args.key_count);

    let slots = config.keys.slots();
    if slots.is_empty() {
        warn!("No key slots configured; every key request will fail");
    }

    info!("Starting keyvend...");
    info!("  Key slots: {}", slots.names().join(", "));

    let state = Arc::new(KeysState::from_env(slots));
    let app = router::create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("keyvend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
