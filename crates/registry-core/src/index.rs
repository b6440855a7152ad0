//! Dual Index (C2): `id -> InstanceRecord` and `serviceType -> {healthy ids}`
//! kept mutually consistent under concurrent access.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::model::InstanceRecord;

#[derive(Default)]
struct DualIndexState {
    instances: HashMap<Uuid, InstanceRecord>,
    services: HashMap<String, HashSet<Uuid>>,
}

/// The two coupled lookup structures behind the registry.
///
/// Every mutating method takes the single write lock for its whole
/// critical section, so invariants 1, 2 and 5 (spec.md §3) hold at every
/// point a reader can observe the state. Readers take the read lock and
/// return owned clones — no reference into the index ever escapes.
pub struct DualIndex {
    state: RwLock<DualIndexState>,
}

impl DualIndex {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DualIndexState::default()),
        }
    }

    /// Insert a brand-new record. Precondition: `rec.id` is not already present.
    pub fn insert(&self, rec: InstanceRecord) {
        let mut state = self.state.write().unwrap();
        if rec.healthy {
            state
                .services
                .entry(rec.service_type.clone())
                .or_default()
                .insert(rec.id);
        }
        state.instances.insert(rec.id, rec);
    }

    /// Remove a record by id. Idempotent — a no-op if `id` is absent.
    pub fn remove(&self, id: Uuid) -> Option<InstanceRecord> {
        let mut state = self.state.write().unwrap();
        let removed = state.instances.remove(&id)?;
        if let Some(ids) = state.services.get_mut(&removed.service_type) {
            ids.remove(&id);
            if ids.is_empty() {
                state.services.remove(&removed.service_type);
            }
        }
        Some(removed)
    }

    /// Flip a record to unhealthy and drop it from its service set.
    /// No-op if absent or already unhealthy.
    pub fn mark_unhealthy(&self, id: Uuid) -> Option<InstanceRecord> {
        let mut state = self.state.write().unwrap();
        let service_type = {
            let rec = state.instances.get(&id)?;
            if !rec.healthy {
                return None;
            }
            rec.service_type.clone()
        };
        if let Some(ids) = state.services.get_mut(&service_type) {
            ids.remove(&id);
            if ids.is_empty() {
                state.services.remove(&service_type);
            }
        }
        let rec = state.instances.get_mut(&id).unwrap();
        rec.healthy = false;
        rec.last_updated = Utc::now();
        Some(rec.clone())
    }

    /// Flip a record to healthy and re-add it to its service set.
    /// No-op if absent or already healthy.
    pub fn mark_healthy(&self, id: Uuid) -> Option<InstanceRecord> {
        let mut state = self.state.write().unwrap();
        let service_type = {
            let rec = state.instances.get(&id)?;
            if rec.healthy {
                return None;
            }
            rec.service_type.clone()
        };
        state.services.entry(service_type).or_default().insert(id);
        let rec = state.instances.get_mut(&id).unwrap();
        rec.healthy = true;
        rec.last_updated = Utc::now();
        Some(rec.clone())
    }

    /// Fetch a record regardless of health. Returns `None` if absent.
    pub fn get_by_id(&self, id: Uuid) -> Option<InstanceRecord> {
        self.state.read().unwrap().instances.get(&id).cloned()
    }

    /// Snapshot of currently-healthy records for a service type.
    /// Empty if the type has no healthy instances.
    pub fn list_by_type(&self, service_type: &str) -> Vec<InstanceRecord> {
        let state = self.state.read().unwrap();
        state
            .services
            .get(service_type)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.instances.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of every registered instance, healthy or not. Used by the
    /// Health Supervisor to enumerate probe targets.
    pub fn list_all(&self) -> Vec<InstanceRecord> {
        self.state.read().unwrap().instances.values().cloned().collect()
    }

    /// Number of registered instances (healthy and unhealthy).
    pub fn instance_count(&self) -> usize {
        self.state.read().unwrap().instances.len()
    }

    /// Number of distinct service types with at least one healthy instance.
    pub fn service_count(&self) -> usize {
        self.state.read().unwrap().services.len()
    }

    /// Drop every record. Used by `RegistryCore::dispose`.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        state.instances.clear();
        state.services.clear();
    }
}

impl Default for DualIndex {
    fn default() -> Self {
        Self::new()
    }
}
