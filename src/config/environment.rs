//! Environment configuration
//!
//! Reads server settings from the process environment (after `dotenvy` has
//! loaded `.env`). Required values produce a `ConfigError` instead of a panic.

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Parse a raw variable, keeping the raw text for the error
pub(crate) fn parse_value<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    let parsed = raw.trim().parse::<T>().ok();
    parsed.ok_or(ConfigError::Invalid { key, value: raw })
}

/// How a finished rental is priced and settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingPolicy {
    /// 5 per started minute, promo codes accepted, wallet always debited
    PerMinute,
    /// Started hours times the scooter's hourly rate, paid only if the wallet covers it
    Hourly,
}

impl FromStr for PricingPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_minute" | "per-minute" | "minute" => Ok(PricingPolicy::PerMinute),
            "hourly" | "hour" => Ok(PricingPolicy::Hourly),
            _ => Err(()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub pricing_policy: PricingPolicy,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "development-secret".to_string(),
            jwt_expiration: 86_400,
            cors_origins: Vec::new(),
            pricing_policy: PricingPolicy::PerMinute,
        }
    }
}

impl EnvironmentConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => parse_value("PORT", value)?,
            None => defaults.port,
        };

        let jwt_expiration = match get("JWT_EXPIRATION") {
            Some(value) => parse_value("JWT_EXPIRATION", value)?,
            None => defaults.jwt_expiration,
        };

        let pricing_policy = match get("PRICING_POLICY") {
            Some(value) => parse_value("PRICING_POLICY", value)?,
            None => defaults.pricing_policy,
        };

        let jwt_secret = get("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: get("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration,
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            pricing_policy,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
