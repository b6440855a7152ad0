//! Mock implementations for tests that need a [`HealthProbe`] double with
//! call expectations, as opposed to the simple fakes defined inline in
//! `health::supervisor`'s own test module.

use mockall::mock;

use crate::health::HealthProbe;
use crate::model::InstanceRecord;

mock! {
    pub Probe {}

    #[async_trait::async_trait]
    impl HealthProbe for Probe {
        async fn check(&self, instance: &InstanceRecord) -> bool;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[tokio::test]
    async fn mock_probe_honors_configured_expectations() {
        let mut probe = MockProbe::new();
        probe.expect_check().times(1).returning(|_| true);

        let instance = InstanceRecord::new(
            Uuid::new_v4(),
            "users".to_string(),
            "localhost".to_string(),
            "3000".to_string(),
            HashMap::new(),
            "tok".to_string(),
        );
        assert!(probe.check(&instance).await);
    }
}
