//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once in `main` and handed to the components that
//! need it; nothing reads the environment after startup.

use std::env;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_EXECUTION_MAX_RETRIES,
    DEFAULT_EXECUTION_SERVICE_URL, DEFAULT_EXECUTION_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub execution: ExecutionConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Execution service configuration
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Base URL of the execution service
    pub base_url: String,
    /// Per-call timeout in seconds, applied to every execution request
    pub request_timeout_secs: u64,
    /// Retries for connect-level failures only; HTTP errors and timeouts
    /// are never retried
    pub max_retries: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            execution: ExecutionConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl ExecutionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env::var("EXECUTION_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_EXECUTION_SERVICE_URL.to_string()),
            request_timeout_secs: env::var("EXECUTION_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_EXECUTION_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EXECUTION_TIMEOUT_SECS".to_string()))?,
            max_retries: env::var("EXECUTION_MAX_RETRIES")
                .unwrap_or_else(|_| DEFAULT_EXECUTION_MAX_RETRIES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("EXECUTION_MAX_RETRIES".to_string()))?,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // Test that defaults are applied when env vars are not set
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);

        let execution = ExecutionConfig {
            base_url: DEFAULT_EXECUTION_SERVICE_URL.to_string(),
            request_timeout_secs: DEFAULT_EXECUTION_TIMEOUT_SECS,
            max_retries: DEFAULT_EXECUTION_MAX_RETRIES,
        };
        assert_eq!(execution.base_url, "http://localhost:9000");
        assert_eq!(execution.max_retries, 0);
    }
}
