//! Configuration for the registry engine.
//!
//! The engine itself only needs the registration key (§7: its absence is a
//! fatal configuration error) and the Health Supervisor's tunables. Transport
//! concerns (bind address, admin key, CORS, log format) live in `registry-app`.

pub mod env_utils;
pub mod error;

pub use error::{ConfigError, ConfigResult};

use crate::health::HealthSupervisorConfig;
use env_utils::EnvLoader;

/// Top-level configuration for a [`crate::registry::RegistryCore`] instance.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Shared secret presented by callers of `register`.
    pub registration_key: String,
    /// Health Supervisor tuning parameters.
    pub health: HealthSupervisorConfig,
}

impl RegistryConfig {
    /// Load configuration from the process environment.
    ///
    /// `SERVICE_REGISTRATION_KEY` is required; its absence is a fatal startup
    /// error per spec — this function returns `Err` rather than panicking so
    /// the caller (the binary's `main`) decides how to report it.
    pub fn from_env() -> ConfigResult<Self> {
        let registration_key = EnvLoader::load_required_string("SERVICE_REGISTRATION_KEY")?;
        if registration_key.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "SERVICE_REGISTRATION_KEY must not be empty".to_string(),
            ));
        }

        Ok(Self {
            registration_key,
            health: HealthSupervisorConfig {
                enabled: EnvLoader::load_bool("HEALTH_CHECK_ENABLED", true),
                interval_ms: EnvLoader::load_with_default("HEALTH_CHECK_INTERVAL_MS", 5_000)?,
                batch_size: EnvLoader::load_with_default("HEALTH_CHECK_BATCH_SIZE", 100)?,
                max_concurrent: EnvLoader::load_with_default("HEALTH_CHECK_MAX_CONCURRENT", 10)?,
                ttl_ms: EnvLoader::load_with_default("HEALTH_CHECK_TTL_MS", 2_000)?,
            },
        })
    }
}
