//! Showroom: a variant-bannered demo web app.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from the environment, resolves the content root, applies
//! the optional startup delay, runs the one-shot database probe, sets up
//! the Axum router, and starts the HTTP server.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use envconfig::Envconfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showroom::config::{AppConfig, DEFAULT_LOG_FILTER};
use showroom::content::ContentStore;
use showroom::db::run_startup_probe;
use showroom::routes::create_router;
use showroom::state::AppState;

/// Showroom: a demo web app for rollout and health-probe experiments
#[derive(Parser, Debug)]
#[command(name = "showroom", version, about)]
struct Args {
    /// Log level filter (e.g., "showroom=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from the environment
    let config = AppConfig::init_from_env()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        variant = %config.variant,
        request_logging = config.request_logging.enabled(),
        "Loaded configuration"
    );

    if config.db_required.enabled() {
        tracing::info!(
            "DB_REQUIRED is set: missing DB config or a connection failure will abort startup"
        );
    } else {
        tracing::info!(
            "DB_REQUIRED is not set: missing DB config or a connection failure will be logged but startup will continue"
        );
    }

    // Resolve the content root up front so a misconfigured deployment fails fast
    let content = ContentStore::new(&config.content_root).map_err(|err| {
        format!(
            "content root '{}' is not usable: {}",
            config.content_root, err
        )
    })?;
    tracing::info!(root = %content.root().display(), "Resolved content root");

    // Optional delay to simulate slow-starting applications
    tracing::info!(seconds = config.startup_delay_secs, "Delaying startup");
    tokio::time::sleep(Duration::from_secs(config.startup_delay_secs)).await;

    // One-shot database connectivity probe; fatal under the required policy
    run_startup_probe(&config).await?;

    // Create application state and router
    let state = AppState::new(config.clone(), content);
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves when SIGTERM or Ctrl+C arrives, triggering graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
