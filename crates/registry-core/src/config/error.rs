//! Configuration error types
//!
//! This module provides the error types for configuration management.

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
