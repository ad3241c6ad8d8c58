//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, migrations and the Axum server lifecycle.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::persistence::{InMemoryUrlRepository, PgUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - Services and shared state
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = build_repository(&config).await?;

    let state = AppState::new(repository, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Creates the configured URL repository.
async fn build_repository(config: &Config) -> Result<Arc<dyn UrlRepository>> {
    match (config.storage_backend, config.database_url.as_deref()) {
        (StorageBackend::Postgres, Some(database_url)) => {
            let pool = connect_pool(config, database_url).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Migrations applied");

            Ok(Arc::new(PgUrlRepository::new(Arc::new(pool))))
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("DATABASE_URL is required for the postgres storage backend")
        }
        (StorageBackend::Memory, _) => {
            tracing::warn!("Using in-memory storage, records will be lost on shutdown");
            Ok(Arc::new(InMemoryUrlRepository::new()))
        }
    }
}

/// Opens a PostgreSQL pool using the pool settings from `config`.
///
/// # Errors
///
/// Returns an error if no connection can be established within
/// `DB_CONNECT_TIMEOUT`.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
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
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
