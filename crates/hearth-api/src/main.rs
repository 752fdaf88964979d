//! Hearth Server Binary
//!
//! Household task-management backend.
//!
//! # Usage
//!
//! ```bash
//! # With config file
//! hearth --config config.yaml
//!
//! # With environment variables only
//! HEARTH_AUTH__JWT_SECRET=... hearth
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{error, info, Level};

use hearth_api::http::{create_router, AppState};
use hearth_api::observability::{init_logging, LoggingConfig};
use hearth_server::ServerConfig;
use hearth_storage::MemoryFamilyStore;

/// Hearth - Household Task-Management Server
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = if let Some(config_path) = args.config {
        ServerConfig::load(&config_path)?
    } else {
        ServerConfig::from_env()?
    };

    init_logging(LoggingConfig {
        json_format: config.logging.json,
        default_level: parse_log_level(&config.logging.level),
        include_spans: false,
    });

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Hearth server");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    match config.storage.backend.as_str() {
        "memory" => {
            info!("Using in-memory storage backend");
            let store = Arc::new(MemoryFamilyStore::new());
            let state = AppState::new(store, config.auth.jwt_secret.as_bytes());
            run_http_server(create_router(state), addr).await
        }
        other => {
            error!("Unknown storage backend: {other}");
            anyhow::bail!("Unknown storage backend: {other}");
        }
    }
}

/// Run the HTTP server with graceful shutdown.
async fn run_http_server(router: axum::Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!(%addr, "HTTP server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Parse log level from string.
fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace"), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_log_level("Info"), Level::INFO);
        assert_eq!(parse_log_level("unknown"), Level::INFO);
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = Args::try_parse_from(["hearth"]).unwrap();
        assert!(args.config.is_none());

        let args = Args::try_parse_from(["hearth", "--config", "config.yaml"]).unwrap();
        assert_eq!(args.config, Some("config.yaml".to_string()));
    }
}
