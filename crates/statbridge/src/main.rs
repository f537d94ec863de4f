//! Statbridge - metrics bridge daemon
//!
//! Forwards metric updates to collectd (unixsock) and graphite (plaintext)
//! collectors, keeping every subscribed metric alive with a heartbeat
//! refresh.
//!
//! # Usage
//!
//! ```bash
//! statbridge --config configs/statbridge.toml
//!
//! # Feed it over stdin
//! echo "put svc.latency mean 42" | statbridge -c bridge.toml
//! ```

mod ingest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use statbridge_config::Config;
use statbridge_reporter::{Profile, Reporter, ReporterHandle};

/// Statbridge - metrics bridge daemon
#[derive(Parser, Debug)]
#[command(name = "statbridge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (error if specified but not found)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = resolve_log_level(cli.log_level.as_deref(), cli.config.as_deref());
    init_logging(&log_level)?;

    let config = load_config(cli.config)?;

    if let Err(e) = run_bridge(config).await {
        error!(error = %e, "bridge error");
        return Err(e);
    }

    info!("statbridge shutdown complete");
    Ok(())
}

/// Load configuration from the given path, or search default locations
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            // User explicitly provided config path - must exist
            if !path.exists() {
                return Err(anyhow::anyhow!(
                    "config file not found: {}",
                    path.display()
                ));
            }
            Config::from_file(&path).context("failed to load configuration")
        }
        None => {
            let default_paths = [
                PathBuf::from("statbridge.toml"),
                PathBuf::from("configs/statbridge.toml"),
            ];

            for path in &default_paths {
                if path.exists() {
                    info!(config = %path.display(), "using config file");
                    return Config::from_file(path).context("failed to load configuration");
                }
            }

            Err(anyhow::anyhow!(
                "no config file found (tried statbridge.toml, configs/statbridge.toml); \
                 at least one collector must be configured"
            ))
        }
    }
}

/// Main bridge run loop
async fn run_bridge(config: Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        collectors = ?config.enabled_collectors(),
        "statbridge starting"
    );

    let cancel = CancellationToken::new();
    let mut handles: Vec<ReporterHandle> = Vec::new();
    let mut tasks = Vec::new();

    if let Some(collectd) = config.collectd {
        let (reporter, handle) = Reporter::new(Profile::collectd(collectd));
        handles.push(handle);
        tasks.push(tokio::spawn(reporter.run(cancel.clone())));
    }

    if let Some(graphite) = config.graphite {
        let (reporter, handle) = Reporter::new(Profile::graphite(graphite));
        handles.push(handle);
        tasks.push(tokio::spawn(reporter.run(cancel.clone())));
    }

    let ingest_task = tokio::spawn(ingest::run(handles, cancel.clone()));

    info!(reporters = tasks.len(), "statbridge running");

    wait_for_shutdown().await;
    info!("shutdown signal received, stopping bridge...");

    cancel.cancel();

    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    for task in tasks {
        match tokio::time::timeout(shutdown_timeout, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "reporter task panicked during shutdown"),
            Err(_) => warn!("reporter did not finish within timeout, continuing shutdown"),
        }
    }
    ingest_task.abort();

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config_path: Option<&Path>) -> String {
    // CLI flag takes precedence
    if let Some(level) = cli_level {
        return level.to_string();
    }

    // Try to load from config file if specified
    if let Some(path) = config_path
        && path.exists()
        && let Ok(config) = Config::from_file(path)
    {
        return config.log.level.as_str().to_string();
    }

    // Default
    "info".to_string()
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
