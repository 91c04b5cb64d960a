/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the optional PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary first), with defaults suitable for local development:
 *
 * | Variable                   | Default                      |
 * |----------------------------|------------------------------|
 * | `DATABASE_URL`             | unset (data routes answer 503) |
 * | `JWT_SECRET`               | development fallback         |
 * | `TOKEN_TTL_HOURS`          | 168                          |
 * | `SERVER_PORT`              | 3001                         |
 * | `DATABASE_MAX_CONNECTIONS` | 10                           |
 *
 * # Error Handling
 *
 * Malformed values are configuration errors. A database that cannot be
 * reached is logged and the server runs without it.
 */

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

const DEV_JWT_SECRET: &str = "book-bazaar-dev-secret-change-me";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// One year
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string
    pub database_url: Option<String>,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_ttl_hours: i64,
    /// Listen port
    pub port: u16,
    /// Connection pool size
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        match lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => tracing::warn!("JWT_SECRET not set. Using the development secret."),
        }
        if let Some(raw) = lookup("TOKEN_TTL_HOURS") {
            let hours = raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TOKEN_TTL_HOURS", raw))?;
            builder = builder.token_ttl_hours(hours);
        }
        if let Some(raw) = lookup("SERVER_PORT") {
            let port = raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", raw))?;
            builder = builder.port(port);
        }
        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            let max = raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS", raw))?;
            builder = builder.max_connections(max);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.token_ttl_hours <= 0 || self.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::InvalidValue(
                "TOKEN_TTL_HOURS",
                self.token_ttl_hours.to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS", "0".to_string()));
        }
        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<i64>,
    port: Option<u16>,
    max_connections: Option<u32>,
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();
        let config = ServerConfig {
            database_url: self.database_url,
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            token_ttl_hours: self.token_ttl_hours.unwrap_or(defaults.token_ttl_hours),
            port: self.port.unwrap_or(defaults.port),
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is configured and reachable
/// - `None` if `DATABASE_URL` is not set or the connection fails
///
/// Errors are logged but do not prevent server startup.
pub async fn load_database(config: &ServerConfig) -> Option<PgPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Continuing without migrations - database might not be up to date");
    } else {
        tracing::info!("Database migrations completed successfully");
    }

    Some(pool)
}
