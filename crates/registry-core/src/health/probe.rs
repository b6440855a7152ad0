//! The probe abstraction the Health Supervisor drives.

use std::time::Duration;

use async_trait::async_trait;

use crate::model::InstanceRecord;

/// Checks whether a single instance is alive.
///
/// Abstracted behind a trait so the supervisor's batching/concurrency logic
/// can be tested against a fake without opening real sockets.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self, instance: &InstanceRecord) -> bool;
}

/// Probes an instance by requesting `https://{host}:{port}/health`.
///
/// A probe passes iff the response status is 2xx *and* the body parses as a
/// JSON object; a transport error, timeout, or any other status or body
/// shape counts as a failure. The scheme is hard-coded to `https` to match
/// the upstream system this engine was modeled on, even though that makes
/// probing a plain-HTTP local instance fail closed.
pub struct ReqwestHealthProbe {
    client: reqwest::Client,
    scheme: &'static str,
}

impl ReqwestHealthProbe {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client with a fixed timeout never fails to build");
        Self { client, scheme: "https" }
    }

    /// Test-only constructor that probes over plain HTTP, so unit tests can
    /// point it at an in-process mock server without a TLS handshake.
    #[cfg(test)]
    fn new_with_scheme(timeout: Duration, scheme: &'static str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client with a fixed timeout never fails to build");
        Self { client, scheme }
    }
}

#[async_trait]
impl HealthProbe for ReqwestHealthProbe {
    async fn check(&self, instance: &InstanceRecord) -> bool {
        let url = format!("{}://{}:{}/health", self.scheme, instance.host, instance.port);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(instance = %instance.id, %url, error = %err, "health probe failed");
                return false;
            }
        };
        if !response.status().is_success() {
            return false;
        }
        matches!(
            response.json::<serde_json::Value>().await,
            Ok(serde_json::Value::Object(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn instance_for(host: String, port: String) -> InstanceRecord {
        InstanceRecord::new(
            Uuid::new_v4(),
            "users".to_string(),
            host,
            port,
            HashMap::new(),
            "tok".to_string(),
        )
    }

    #[tokio::test]
    async fn a_2xx_response_with_a_json_object_body_is_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
            .mount(&server)
            .await;

        let uri = server.uri();
        let without_scheme = uri.trim_start_matches("http://");
        let (host, port) = without_scheme.split_once(':').unwrap();

        let probe = ReqwestHealthProbe::new_with_scheme(Duration::from_secs(2), "http");
        let instance = instance_for(host.to_string(), port.to_string());
        assert!(probe.check(&instance).await);
    }

    #[tokio::test]
    async fn a_2xx_response_with_a_non_object_body_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let uri = server.uri();
        let without_scheme = uri.trim_start_matches("http://");
        let (host, port) = without_scheme.split_once(':').unwrap();

        let probe = ReqwestHealthProbe::new_with_scheme(Duration::from_secs(2), "http");
        let instance = instance_for(host.to_string(), port.to_string());
        assert!(!probe.check(&instance).await);
    }

    #[tokio::test]
    async fn a_5xx_response_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let uri = server.uri();
        let without_scheme = uri.trim_start_matches("http://");
        let (host, port) = without_scheme.split_once(':').unwrap();

        let probe = ReqwestHealthProbe::new_with_scheme(Duration::from_secs(2), "http");
        let instance = instance_for(host.to_string(), port.to_string());
        assert!(!probe.check(&instance).await);
    }

    #[tokio::test]
    async fn an_unreachable_host_is_unhealthy() {
        let probe = ReqwestHealthProbe::new(Duration::from_millis(200));
        let instance = instance_for("127.0.0.1".to_string(), "1".to_string());
        assert!(!probe.check(&instance).await);
    }
}
