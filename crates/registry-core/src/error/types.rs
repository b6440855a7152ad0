use thiserror::Error;

/// Errors returned by [`crate::registry::RegistryCore`] operations.
///
/// # Recovery
/// - [`RegistryError::Authentication`] and [`RegistryError::Validation`] mean
///   no state changed; the caller can retry with corrected input.
/// - [`RegistryError::Disposed`] means the engine was stopped via
///   [`crate::registry::RegistryCore::dispose`]; call
///   [`crate::registry::RegistryCore::init`] to resume.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("presented registration key does not match the configured secret")]
    Authentication,

    #[error("invalid registration request: {message}")]
    Validation { message: String },

    #[error("registry engine is disposed")]
    Disposed,
}
