//! Todo API server.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: `PostgreSQL` connection URL; composed from
//!   `PGHOST`/`PGPORT`/`PGDATABASE`/`PGUSER`/`PGPASSWORD` when absent
//! - `HOST`: listen address (default: `0.0.0.0`)
//! - `PORT`: listen port (default: `5000`)
//! - `CLIENT_ORIGIN`: allowed CORS origin, `*` for any (default: `*`)
//! - `RUST_LOG`: logging filter (e.g., `debug`, `todo_app=debug`)

use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_app::api::{self, AppState};
use todo_app::infrastructure::{PostgresTodoRepository, ServerConfig, postgres};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting todo API server");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Configuration error");
            std::process::exit(1);
        }
    };

    // Pool lifecycle: opened once here, closed after graceful shutdown.
    let pool = match postgres::connect_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(error) => {
            tracing::error!(%error, "Failed to connect to PostgreSQL");
            std::process::exit(1);
        }
    };

    let repository = PostgresTodoRepository::new(pool.clone());
    if let Err(error) = repository.migrate().await {
        tracing::error!(%error, "Failed to run schema migration");
        std::process::exit(1);
    }
    tracing::info!("Schema migration complete");

    let state = AppState::new(Arc::new(repository));

    let cors = match config.client_origin.as_str() {
        "*" => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        origin => match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(error) => {
                tracing::error!(%error, "Invalid CLIENT_ORIGIN: {}", origin);
                std::process::exit(1);
            }
        },
    };

    let application = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = match TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to {}", config.bind_address());
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    if let Err(error) = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }

    pool.close().await;
    tracing::info!("Server shutdown complete");
}

/// Completes when a shutdown signal (SIGINT, SIGTERM) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
