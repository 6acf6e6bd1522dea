//! # Refuge - Survivor registry and situational reports
//!
//! This is the main entry point that wires everything together.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring            │
//! │    │                                                            │
//! │    ├── Loads:   AppConfig (YAML file + CLI flags)               │
//! │    ├── Creates: SqliteSurvivorRepository (adapter)              │
//! │    ├── Creates: HttpRobotFeed (adapter)                         │
//! │    └── Serves:  HTTP router until Ctrl+C / SIGTERM              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use refuge_adapter::controller::{create_router, AppState};
use refuge_adapter::gateway::HttpRobotFeed;
use refuge_adapter::repository::SqliteSurvivorRepository;

use config::{AppConfig, Overrides};

#[derive(Debug, Parser)]
#[command(name = "refuge")]
#[command(about = "Refuge - survivor registry with infection reports and robot intel")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "REFUGE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8080
    #[arg(short, long, env = "REFUGE_BIND")]
    bind: Option<String>,

    /// SQLite database file (":memory:" for a throwaway database)
    #[arg(short, long, env = "REFUGE_DATABASE")]
    database: Option<String>,

    /// Robot feed endpoint
    #[arg(long, env = "REFUGE_ROBOT_FEED_URL")]
    robot_feed_url: Option<String>,

    /// Log filter, e.g. "debug" or "refuge_adapter=trace". Takes precedence over RUST_LOG
    #[arg(long, env = "REFUGE_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            bind: self.bind.clone(),
            database: self.database.clone(),
            robot_feed_url: self.robot_feed_url.clone(),
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = AppConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .apply(cli.overrides());
    config.validate()?;

    info!("Refuge starting");

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let repo = if config.database.is_in_memory() {
        warn!("Using in-memory database, survivors are lost on shutdown");
        SqliteSurvivorRepository::open_in_memory()
    } else {
        SqliteSurvivorRepository::open(Path::new(&config.database.path))
    }
    .with_context(|| format!("failed to open database {}", config.database.path))?;

    let feed = HttpRobotFeed::new(config.robot_feed.url.clone(), config.robot_feed.timeout())
        .context("failed to build robot feed client")?;
    info!(url = %feed.url(), timeout_secs = config.robot_feed.timeout_secs, "Robot feed configured");

    let app = create_router(AppState::new(repo.clone(), feed));

    // ========================================
    // Serve
    // ========================================

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    repo.close().context("failed to close database")?;
    info!("Refuge stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "refuge",
            "--bind",
            "127.0.0.1:9999",
            "--database",
            ":memory:",
            "--robot-feed-url",
            "http://localhost:1/robots",
        ])
        .unwrap();

        let config = AppConfig::default().apply(cli.overrides());

        assert_eq!(config.server.bind, "127.0.0.1:9999");
        assert!(config.database.is_in_memory());
        assert_eq!(config.robot_feed.url, "http://localhost:1/robots");
    }
}
