//! Environment configuration utilities
//!
//! This module provides utilities for loading and validating environment variables
//! with type conversion and default value handling.

use std::env;
use std::str::FromStr;

use super::{ConfigError, ConfigResult};

/// Environment variable loader with type conversion and validation
pub struct EnvLoader;

impl EnvLoader {
    /// Load a required environment variable
    pub fn load_required<T>(key: &str) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = env::var(key).map_err(|_| ConfigError::EnvVarNotFound(key.to_string()))?;

        value.parse().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: format!("{value} ({e})"),
        })
    }

    /// Load a required environment variable without parsing it.
    pub fn load_required_string(key: &str) -> ConfigResult<String> {
        env::var(key).map_err(|_| ConfigError::EnvVarNotFound(key.to_string()))
    }

    /// Load an optional environment variable with a default value
    pub fn load_with_default<T>(key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(key) {
            Ok(value) => value.parse().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: format!("{value} ({e})"),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Load a boolean environment variable with string variations
    pub fn load_bool(key: &str, default: bool) -> bool {
        match env::var(key).as_deref() {
            Ok("true" | "True" | "TRUE" | "1" | "yes" | "Yes" | "YES" | "on" | "On" | "ON") => true,
            Ok("false" | "False" | "FALSE" | "0" | "no" | "No" | "NO" | "off" | "Off" | "OFF") => {
                false
            }
            _ => default,
        }
    }
}
