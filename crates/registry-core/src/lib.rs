//! # Registry Core
//!
//! The in-memory engine behind a service registry: a dual-indexed directory
//! of live service instances, credential issuance and verification, an event
//! channel for state changes, and a background health supervisor.
//!
//! ## Core Concepts
//!
//! - **[`registry::RegistryCore`]** — the engine's public surface: register,
//!   unregister, lookup, and auth-check instances.
//! - **[`index::DualIndex`]** — the `id -> record` and `service type ->
//!   healthy ids` structures kept consistent under concurrent access.
//! - **[`credentials::Credentials`]** — mints instance ids/tokens and
//!   verifies presented credentials in constant time.
//! - **[`events::EventChannel`]** — synchronous, ordered fan-out of
//!   [`events::RegistryEvent`]s to subscribers.
//! - **[`health::HealthSupervisor`]** — periodically probes every instance
//!   in batches and flips health state on disagreement.
//!
//! ## Example
//!
//! ```rust
//! use registry_core::registry::{RegistryCore, RegistrationRequest};
//! use std::collections::HashMap;
//!
//! let registry = RegistryCore::new("shared-secret".to_string());
//! let record = registry.register("shared-secret", RegistrationRequest {
//!     service_type: "users".to_string(),
//!     host: "localhost".to_string(),
//!     port: "3000".to_string(),
//!     meta: HashMap::new(),
//! }).unwrap();
//! assert_eq!(registry.get_instances_by_type("users").unwrap().len(), 1);
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod events;
pub mod health;
pub mod index;
pub mod model;
pub mod registry;

#[cfg(test)]
pub mod testing;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use model::InstanceRecord;
pub use registry::{RegistrationRequest, RegistryCore};

/// Current version of the registry engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for consumers embedding the engine.
pub mod prelude {
    pub use crate::{InstanceRecord, RegistrationRequest, RegistryConfig, RegistryCore, RegistryError, Result};
    pub use crate::events::{EventChannel, RegistryEvent};
    pub use crate::health::{HealthSupervisor, HealthSupervisorConfig};
    pub use uuid::Uuid;
}
