//! Error types for the registry engine.
//!
//! All fallible registry operations return [`RegistryError`]. The taxonomy is
//! intentionally small: authentication and validation failures are surfaced to
//! callers, while probe and subscriber failures are handled locally by the
//! health supervisor and event channel respectively and never reach here.

pub mod types;

pub use types::RegistryError;

/// Result type used throughout the registry engine.
pub type Result<T> = std::result::Result<T, RegistryError>;
