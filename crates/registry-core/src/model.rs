//! The registry's core value type: a single registered service instance.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single registered instance of a service type.
///
/// Created once by `register`; afterwards only `healthy` and `last_updated`
/// ever change, and only in response to Health Supervisor outcomes. The
/// record is destroyed only by an explicit `unregister`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: Uuid,
    pub service_type: String,
    pub host: String,
    pub port: String,
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub healthy: bool,
    #[serde(default)]
    pub meta: HashMap<String, serde_json::Value>,
    /// Bound credential for this instance. Never serialized or logged.
    #[serde(skip)]
    pub token: String,
}

impl InstanceRecord {
    pub(crate) fn new(
        id: Uuid,
        service_type: String,
        host: String,
        port: String,
        meta: HashMap<String, serde_json::Value>,
        token: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            service_type,
            host,
            port,
            created: now,
            last_updated: now,
            healthy: true,
            meta,
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_healthy_with_matching_timestamps() {
        let rec = InstanceRecord::new(
            Uuid::new_v4(),
            "users".to_string(),
            "localhost".to_string(),
            "3000".to_string(),
            HashMap::new(),
            "tok".to_string(),
        );
        assert!(rec.healthy);
        assert_eq!(rec.created, rec.last_updated);
    }

    #[test]
    fn token_is_not_serialized() {
        let rec = InstanceRecord::new(
            Uuid::new_v4(),
            "users".to_string(),
            "localhost".to_string(),
            "3000".to_string(),
            HashMap::new(),
            "super-secret-token".to_string(),
        );
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("super-secret-token"));
        assert!(!json.contains("\"token\""));
    }
}
