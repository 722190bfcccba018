//! Roster HTTP Server binary

use anyhow::Context;
use clap::Parser;
use roster_core::UserStore;
use roster_server::{telemetry, AppState, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Roster - in-memory user directory over HTTP")]
#[command(version)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides config and BIND_ADDRESS
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Send error chains and backtraces to clients in 500 responses
    #[arg(long)]
    expose_error_detail: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if cli.expose_error_detail {
        config.expose_error_detail = true;
    }

    telemetry::init_logging(&config)?;
    info!("Starting Roster HTTP Server v{}", env!("CARGO_PKG_VERSION"));
    if config.otel_enabled {
        info!("OpenTelemetry tracing enabled");
    }
    if config.expose_error_detail {
        warn!("Error detail exposure is enabled; 500 responses include internal diagnostics");
    }

    // Initialize Prometheus metrics
    roster_server::metrics::init_prometheus()?;
    roster_server::metrics::init_metrics();

    let store = Arc::new(UserStore::new());
    let state = AppState::with_error_detail(store, config.expose_error_detail);

    let app = roster_server::router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    info!("Listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    if config.otel_enabled {
        info!("Flushing OpenTelemetry traces...");
        telemetry::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}
