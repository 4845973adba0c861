//! Database configuration
//!
//! PostgreSQL pool settings for SQLx.

use std::env;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use super::environment::{parse_value, ConfigError};

/// Pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = get("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let mut config = Self::new(url);

        if let Some(value) = get("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = parse_value("DATABASE_MAX_CONNECTIONS", value)?;
        }
        if let Some(value) = get("DATABASE_MIN_CONNECTIONS") {
            config.min_connections = parse_value("DATABASE_MIN_CONNECTIONS", value)?;
        }
        config.min_connections = config.min_connections.min(config.max_connections);

        Ok(config)
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
    }

    /// Create a connection pool, connecting eagerly
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        self.pool_options().connect(&self.url).await
    }

    /// Create a pool that connects on first use
    pub fn create_lazy_pool(&self) -> Result<PgPool, sqlx::Error> {
        self.pool_options().connect_lazy(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_required() {
        let err = DatabaseConfig::from_source(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_pool_sizes() {
        let config = DatabaseConfig::from_source(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/scooters".to_string()),
            "DATABASE_MAX_CONNECTIONS" => Some("4".to_string()),
            "DATABASE_MIN_CONNECTIONS" => Some("10".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.min_connections, 4);
    }
}
