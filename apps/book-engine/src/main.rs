//! Book Engine Binary
//!
//! Starts the order-book reconciliation engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin book-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CONFIG_PATH`: Path to the YAML config file (default: config.yaml)
//! - `HTTP_PORT`: HTTP server port (default: 8080)
//! - `BIND_ADDRESS`: Bind address (default: 0.0.0.0)
//! - `RUST_LOG`: Log filter, overrides the configured level

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use book_engine::application::ports::DirectBookEvents;
use book_engine::application::services::BookService;
use book_engine::config::{Config, load_config};
use book_engine::infrastructure::http::{AppState, create_router};
use book_engine::infrastructure::persistence::{
    InMemoryBookRepository, InMemoryExecutionRepository, InMemoryOrderRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(None).context("failed to load configuration")?;
    init_tracing(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting book engine");

    let order_repository = Arc::new(InMemoryOrderRepository::new());
    let execution_repository = Arc::new(InMemoryExecutionRepository::new());
    let book_repository = Arc::new(InMemoryBookRepository::new());
    let service = Arc::new(BookService::new(
        Arc::clone(&order_repository),
        Arc::clone(&execution_repository),
        Arc::clone(&book_repository),
    ));
    let events = Arc::new(DirectBookEvents::new(Arc::clone(&service)));

    let state = AppState {
        order_repository,
        execution_repository,
        service,
        events,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()
        .context("invalid bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Wait for a shutdown signal.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
