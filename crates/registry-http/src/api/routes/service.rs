//! `/service` and `/services/:type` handlers (spec.md §6).

use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use registry_core::registry::RegistrationRequest;
use registry_core::InstanceRecord;

use crate::api::middleware::auth::{RegistrationKey, ServiceCredentials};
use crate::envelope::{ApiError, ApiResponse};
use crate::state::AppState;

/// Request body for `POST /service`. Port accepts either a number or a
/// string on the wire; host is never taken from the body, only derived
/// from the connection.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(rename = "serviceType")]
    pub service_type: String,
    pub port: PortValue,
    #[serde(default)]
    pub meta: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(u64),
    Text(String),
}

impl PortValue {
    fn into_string(self) -> String {
        match self {
            PortValue::Number(n) => n.to_string(),
            PortValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    #[serde(rename = "serviceId")]
    pub service_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UnregisterResponse {
    #[serde(rename = "serviceId")]
    pub service_id: Uuid,
}

fn derive_host(req: &HttpRequest) -> String {
    req.connection_info().peer_addr().unwrap_or("unknown").to_string()
}

pub async fn register_service(
    req: HttpRequest,
    key: RegistrationKey,
    body: web::Json<RegisterBody>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let host = derive_host(&req);
    let body = body.into_inner();
    let record = state
        .registry
        .register(
            &key.0,
            RegistrationRequest {
                service_type: body.service_type,
                host,
                port: body.port.into_string(),
                meta: body.meta.unwrap_or_default(),
            },
        )
        .map_err(ApiError::from)?;

    Ok(ApiResponse::created(RegisterResponse {
        service_id: record.id,
        token: record.token.clone(),
    }))
}

pub async fn list_by_type(
    path: web::Path<String>,
    creds: ServiceCredentials,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    authenticate_caller(&creds, &state)?;
    let instances = state
        .registry
        .get_instances_by_type(&path.into_inner())
        .map_err(ApiError::from)?;
    Ok(ApiResponse::ok(strip_tokens(instances)))
}

pub async fn get_by_id(
    path: web::Path<Uuid>,
    creds: ServiceCredentials,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    authenticate_caller(&creds, &state)?;
    let instance = state
        .registry
        .get_instance_by_id(path.into_inner())
        .map_err(ApiError::from)?;
    Ok(ApiResponse::ok(instance.map(strip_token)))
}

pub async fn unregister(
    path: web::Path<Uuid>,
    creds: ServiceCredentials,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    authenticate_caller(&creds, &state)?;
    let id = path.into_inner();
    state.registry.unregister(id).map_err(ApiError::from)?;
    Ok(ApiResponse::ok(UnregisterResponse { service_id: id }))
}

/// Confirms the caller is presenting valid credentials for a registered
/// instance before honoring its request. Every authenticated route (lookup
/// or deregister) requires this, independent of which instance the request
/// ultimately targets.
fn authenticate_caller(creds: &ServiceCredentials, state: &AppState) -> Result<(), ApiError> {
    match state.registry.validate_instance_auth(creds.id, &creds.token) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::unauthorized("invalid service credentials")),
        Err(err) => Err(ApiError::from(err)),
    }
}

fn strip_token(mut record: InstanceRecord) -> InstanceRecord {
    record.token = String::new();
    record
}

fn strip_tokens(records: Vec<InstanceRecord>) -> Vec<InstanceRecord> {
    records.into_iter().map(strip_token).collect()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/service").route(web::post().to(register_service)))
        .service(web::resource("/services/{type}").route(web::get().to(list_by_type)))
        .service(
            web::resource("/service/{id}")
                .route(web::get().to(get_by_id))
                .route(web::delete().to(unregister)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(registry_core::RegistryCore::new("secret".to_string()), "admin".to_string()))
    }

    #[actix_web::test]
    async fn register_with_valid_key_returns_201_with_id_and_token() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/service")
            .insert_header(("Authorization", "Bearer secret"))
            .set_json(serde_json::json!({"serviceType": "users", "port": 3000}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["success"].as_bool().unwrap());
        assert!(body["data"]["serviceId"].is_string());
        assert!(body["data"]["token"].is_string());
    }

    #[actix_web::test]
    async fn register_with_wrong_key_returns_401() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/service")
            .insert_header(("Authorization", "Bearer wrong"))
            .set_json(serde_json::json!({"serviceType": "users", "port": 3000}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn register_with_blank_service_type_returns_400() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/service")
            .insert_header(("Authorization", "Bearer secret"))
            .set_json(serde_json::json!({"serviceType": "", "port": 3000}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn full_lifecycle_register_lookup_delete() {
        let app_state = state();
        let app = test::init_service(App::new().app_data(app_state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/service")
            .insert_header(("Authorization", "Bearer secret"))
            .set_json(serde_json::json!({"serviceType": "users", "port": 3000}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        let id = body["data"]["serviceId"].as_str().unwrap().to_string();
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/services/users")
            .insert_header(("x-service-id", id.clone()))
            .insert_header(("x-service-token", token.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let req = test::TestRequest::delete()
            .uri(&format!("/service/{id}"))
            .insert_header(("x-service-id", id.clone()))
            .insert_header(("x-service-token", token.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get()
            .uri(&format!("/service/{id}"))
            .insert_header(("x-service-id", id))
            .insert_header(("x-service-token", token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
