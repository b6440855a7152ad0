//! `RegistryCore` (C1): the engine's public surface and lifecycle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::{RegistryError, Result};
use crate::events::{EventChannel, RegistryEvent};
use crate::index::DualIndex;
use crate::model::InstanceRecord;

/// Everything `register` needs from a caller beyond the registration key.
pub struct RegistrationRequest {
    pub service_type: String,
    pub host: String,
    pub port: String,
    pub meta: HashMap<String, serde_json::Value>,
}

/// The engine: owns the Dual Index, mints and checks credentials, and
/// reports state changes on its [`EventChannel`].
///
/// Lifecycle is `Initialized -> Running <-> Disposed`: constructed via
/// [`RegistryCore::new`] in `Initialized`, moved to `Running` by
/// [`RegistryCore::init`], and every mutating operation after
/// [`RegistryCore::dispose`] returns [`RegistryError::Disposed`] until
/// [`RegistryCore::init`] is called again.
pub struct RegistryCore {
    index: Arc<DualIndex>,
    credentials: Credentials,
    events: EventChannel,
    disposed: AtomicBool,
}

impl RegistryCore {
    pub fn new(registration_key: String) -> Arc<Self> {
        Arc::new(Self {
            index: Arc::new(DualIndex::new()),
            credentials: Credentials::new(registration_key),
            events: EventChannel::new(),
            disposed: AtomicBool::new(false),
        })
    }

    /// The engine's event channel, for wiring up subscribers (e.g. logging,
    /// or the health supervisor's own consumers) before or after `init`.
    pub fn events(&self) -> &EventChannel {
        &self.events
    }

    /// Move from `Disposed` (or the initial `Initialized` state) to `Running`.
    pub fn init(&self) {
        self.disposed.store(false, Ordering::SeqCst);
    }

    /// Stop accepting mutating calls and drop all registered instances.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        self.index.clear();
    }

    fn ensure_running(&self) -> Result<()> {
        if self.disposed.load(Ordering::SeqCst) {
            Err(RegistryError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Register a new instance. `presented_key` must match the configured
    /// registration key or this returns [`RegistryError::Authentication`].
    pub fn register(
        &self,
        presented_key: &str,
        request: RegistrationRequest,
    ) -> Result<InstanceRecord> {
        self.ensure_running()?;

        if !self.credentials.verify_registration_key(presented_key) {
            return Err(RegistryError::Authentication);
        }
        if request.service_type.trim().is_empty() {
            return Err(RegistryError::Validation {
                message: "service_type must not be empty".to_string(),
            });
        }
        if request.host.trim().is_empty() {
            return Err(RegistryError::Validation {
                message: "host must not be empty".to_string(),
            });
        }
        if request.port.trim().is_empty() {
            return Err(RegistryError::Validation {
                message: "port must not be empty".to_string(),
            });
        }

        let id = Credentials::mint_id();
        let token = Credentials::mint_token();
        let record = InstanceRecord::new(
            id,
            request.service_type,
            request.host,
            request.port,
            request.meta,
            token,
        );

        self.index.insert(record.clone());
        self.events.emit(RegistryEvent::Registered(record.clone()));
        Ok(record)
    }

    /// Remove an instance by id. Idempotent — no error if `id` is absent.
    /// Credential verification is the caller's responsibility (the HTTP
    /// layer authenticates via [`Self::validate_instance_auth`] before
    /// calling this); the engine itself trusts `id` once past that point.
    pub fn unregister(&self, id: Uuid) -> Result<()> {
        self.ensure_running()?;

        if let Some(record) = self.index.remove(id) {
            self.events.emit(RegistryEvent::Unregistered {
                id,
                service_type: record.service_type,
            });
        }
        Ok(())
    }

    /// Fetch an instance by id regardless of health. Unauthenticated —
    /// lookups never require the caller to present a credential.
    pub fn get_instance_by_id(&self, id: Uuid) -> Result<Option<InstanceRecord>> {
        self.ensure_running()?;
        Ok(self.index.get_by_id(id))
    }

    /// List every currently-healthy instance of a service type.
    pub fn get_instances_by_type(&self, service_type: &str) -> Result<Vec<InstanceRecord>> {
        self.ensure_running()?;
        Ok(self.index.list_by_type(service_type))
    }

    /// Snapshot of every registered instance, healthy or not.
    pub fn list_all(&self) -> Result<Vec<InstanceRecord>> {
        self.ensure_running()?;
        Ok(self.index.list_all())
    }

    /// Verify a presented instance id/token pair.
    pub fn validate_instance_auth(&self, id: Uuid, presented_token: &str) -> Result<bool> {
        self.ensure_running()?;
        Ok(match self.index.get_by_id(id) {
            Some(record) => Credentials::validate_token(&record.token, presented_token),
            None => false,
        })
    }

    /// A shared handle to the Dual Index, for wiring up a [`crate::health::HealthSupervisor`]
    /// against this same registry's state.
    pub fn index_handle(&self) -> Arc<DualIndex> {
        self.index.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<RegistryCore> {
        RegistryCore::new("secret".to_string())
    }

    fn request(service_type: &str) -> RegistrationRequest {
        RegistrationRequest {
            service_type: service_type.to_string(),
            host: "localhost".to_string(),
            port: "3000".to_string(),
            meta: HashMap::new(),
        }
    }

    #[test]
    fn register_with_wrong_key_fails_authentication() {
        let reg = registry();
        let result = reg.register("wrong", request("users"));
        assert!(matches!(result, Err(RegistryError::Authentication)));
    }

    #[test]
    fn register_with_empty_service_type_fails_validation() {
        let reg = registry();
        let result = reg.register("secret", request(""));
        assert!(matches!(result, Err(RegistryError::Validation { .. })));
    }

    #[test]
    fn register_then_lookup_round_trips() {
        let reg = registry();
        let record = reg.register("secret", request("users")).unwrap();
        let fetched = reg.get_instance_by_id(record.id).unwrap().unwrap();
        assert_eq!(fetched.id, record.id);
        assert_eq!(reg.get_instances_by_type("users").unwrap().len(), 1);
    }

    #[test]
    fn unregister_removes_the_instance() {
        let reg = registry();
        let record = reg.register("secret", request("users")).unwrap();
        assert!(reg.unregister(record.id).is_ok());
        assert!(reg.get_instance_by_id(record.id).unwrap().is_none());
    }

    #[test]
    fn unregister_on_an_absent_id_is_a_noop_not_an_error() {
        let reg = registry();
        assert!(reg.unregister(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn validate_instance_auth_matches_bound_token_only() {
        let reg = registry();
        let record = reg.register("secret", request("users")).unwrap();
        assert!(reg.validate_instance_auth(record.id, &record.token).unwrap());
        assert!(!reg.validate_instance_auth(record.id, "nope").unwrap());
        assert!(!reg.validate_instance_auth(Uuid::new_v4(), &record.token).unwrap());
    }

    #[test]
    fn disposed_registry_rejects_mutating_calls_until_reinitialized() {
        let reg = registry();
        reg.dispose();
        assert!(matches!(
            reg.register("secret", request("users")),
            Err(RegistryError::Disposed)
        ));
        reg.init();
        assert!(reg.register("secret", request("users")).is_ok());
    }

    #[test]
    fn dispose_clears_existing_instances() {
        let reg = registry();
        let record = reg.register("secret", request("users")).unwrap();
        reg.dispose();
        reg.init();
        assert!(reg.get_instance_by_id(record.id).unwrap().is_none());
    }

    #[test]
    fn register_emits_an_event() {
        let reg = registry();
        let events: Arc<std::sync::Mutex<Vec<String>>> = Arc::new(std::sync::Mutex::new(Vec::new()));
        let events_clone = events.clone();
        reg.events().subscribe(move |e| events_clone.lock().unwrap().push(format!("{e:?}")));
        reg.register("secret", request("users")).unwrap();
        assert_eq!(events.lock().unwrap().len(), 1);
    }
}
