//! waitcache - wait-time planner server.
//!
//! Serves stored theme-park wait-time snapshots, the weather overlay and the
//! ride planner over a JSON API, alongside the built front end.

use std::io;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use waitcache_core::Config;
use waitcache_server::{router, AppState};

const LOG_FILE_PREFIX: &str = "waitcache.log";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr, and also to a daily rolling file when a log directory
/// is configured. The returned guard must live until shutdown so buffered
/// file output is flushed.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    let _guard = init_tracing(&config);

    let addr = config.bind_addr();
    info!(
        park = config.park.name,
        data_dir = %config.data_dir.display(),
        weather = config.weather_api_key.is_some(),
        "waitcache starting"
    );

    let state = AppState::new(config)?;
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("waitcache shutting down");
    Ok(())
}
