//! CRUD HTTP API for breweries and the beers they brew.
//!
//! Each resource exposes create/read/update/delete under `/api/brewerys` and
//! `/api/beers`. Handlers validate the payload, delegate to a [`Store`] and
//! map failures to status codes through [`api::ApiError`].

pub mod api;
pub mod config;
pub mod model;
pub mod store;

// Export API types
pub use api::routes::create_router;
pub use api::{ApiError, ErrorResponse};

// Export all model types
pub use model::*;

// Export store types
pub use store::{InMemoryStore, PostgresStore, Store, StoreError};

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppConfig;

/// Connect the configured store and wrap it in the application router.
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    if config.database.in_memory {
        log::warn!("Using the in-memory store; data will not survive a restart");
        return Ok(create_router().with_state(Arc::new(InMemoryStore::new())));
    }

    let database_url = config.database_url();
    let store = PostgresStore::new(&database_url, config.database.max_connections).await?;
    store.migrate().await?;
    log::info!("Connected to PostgreSQL, schema up to date");

    Ok(create_router().with_state(Arc::new(store)))
}

/// Serve `app` on `listener` until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    log::info!("Shutdown signal received, stopping server");
}

/// Build the app for `config`, bind its address and serve until shutdown.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&config).await?;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_address))?;
    log::info!("Brewery API listening on http://{}", bind_address);

    serve(listener, app).await
}
