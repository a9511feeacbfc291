//! Environment-driven server configuration.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: full `PostgreSQL` connection URL; when absent the
//!   URL is composed from `PGHOST` (localhost), `PGPORT` (5432),
//!   `PGDATABASE` (`todo_app`), `PGUSER` (postgres), `PGPASSWORD`
//!   (postgres)
//! - `HOST`: listen address (default `0.0.0.0`)
//! - `PORT`: listen port (default `5000`)
//! - `CLIENT_ORIGIN`: allowed CORS origin, `*` for any (default `*`)

use std::env;

use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `PORT` or `PGPORT` did not parse as a port number.
    #[error("invalid port value '{value}' for {variable}")]
    InvalidPort { variable: &'static str, value: String },
}

/// Server configuration loaded once at process start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Allowed CORS origin for the browser/terminal client; `*` = any.
    pub client_origin: String,
    /// `PostgreSQL` connection URL.
    pub database_url: String,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPort` when `PORT` or `PGPORT` is set
    /// but not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_port("PORT", 5000)?;
        let client_origin = env::var("CLIENT_ORIGIN").unwrap_or_else(|_| "*".to_string());
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => compose_database_url()?,
        };

        Ok(Self {
            host,
            port,
            client_origin,
            database_url,
        })
    }

    /// Returns the `host:port` pair the listener should bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(variable: &'static str, default: u16) -> Result<u16, ConfigError> {
    match env::var(variable) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(default);
            }
            trimmed.parse().map_err(|_| ConfigError::InvalidPort {
                variable,
                value: value.clone(),
            })
        }
        Err(_) => Ok(default),
    }
}

/// Composes a connection URL from the discrete `PG*` variables, with the
/// same defaults the original deployment used.
fn compose_database_url() -> Result<String, ConfigError> {
    let host = env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());
    let port = parse_port("PGPORT", 5432)?;
    let database = env::var("PGDATABASE").unwrap_or_else(|_| "todo_app".to_string());
    let user = env::var("PGUSER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("PGPASSWORD").unwrap_or_else(|_| "postgres".to_string());

    Ok(format!("postgres://{user}:{password}@{host}:{port}/{database}"))
}
