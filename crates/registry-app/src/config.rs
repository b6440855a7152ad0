//! Application-level configuration: transport bind address and admin
//! secret. Engine configuration (registration key, health supervisor
//! tuning) lives in [`registry_core::RegistryConfig`] and is loaded
//! separately.

use std::env;

use registry_core::config::env_utils::EnvLoader;
use registry_core::config::ConfigError;

pub struct AppConfig {
    pub host: String,
    pub port: String,
    pub admin_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: String = EnvLoader::load_with_default("PORT", "3002".to_string())?;
        let admin_key = EnvLoader::load_required_string("ADMIN_API_KEY")?;
        if admin_key.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "ADMIN_API_KEY must not be empty".to_string(),
            ));
        }

        Ok(Self { host, port, admin_key })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
