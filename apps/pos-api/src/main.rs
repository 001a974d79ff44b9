//! # Tillpoint API Server
//!
//! Startup sequence: tracing → configuration → database (with
//! migrations) → router → serve with graceful shutdown.
//!
//! ## Environment Variables
//!
//! * `HTTP_PORT` - listen port (default: 8080)
//! * `DATABASE_PATH` - SQLite file (default: ./tillpoint.db)
//! * `JWT_SECRET` - token signing secret (MUST be set in production)
//! * `JWT_LIFETIME_SECS` - access token lifetime (default: 3600)
//! * `RUST_LOG` - tracing filter (default: info)

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pos_api::config::ApiConfig;
use pos_api::create_router;
use tillpoint_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Tillpoint API server");

    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    let app = create_router(db, config.clone());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler (Ctrl+C, plus SIGTERM on unix).
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
