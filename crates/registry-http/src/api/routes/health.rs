//! `GET /` and `GET /admin/health` (spec.md §6).

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::api::middleware::auth::AdminKey;
use crate::envelope::{ApiError, ApiResponse};
use crate::state::AppState;

/// Unauthenticated liveness probe for the process itself, not any
/// registered instance.
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("OK")
}

#[derive(Debug, Serialize)]
pub struct AdminHealthResponse {
    status: &'static str,
    timestamp: i64,
    #[serde(rename = "instanceCount")]
    instance_count: usize,
    #[serde(rename = "serviceCount")]
    service_count: usize,
}

pub async fn admin_health(key: AdminKey, state: web::Data<AppState>) -> Result<HttpResponse> {
    if key.0 != state.admin_key {
        return Err(ApiError::unauthorized("invalid admin key").into());
    }

    let instances = state.registry.list_all().map_err(ApiError::from)?;
    let instance_count = instances.len();
    let service_count = instances
        .iter()
        .filter(|i| i.healthy)
        .map(|i| i.service_type.clone())
        .collect::<std::collections::HashSet<_>>()
        .len();

    Ok(ApiResponse::ok(AdminHealthResponse {
        status: "UP",
        timestamp: chrono::Utc::now().timestamp_millis(),
        instance_count,
        service_count,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(root)))
        .service(web::resource("/admin/health").route(web::get().to(admin_health)));
}
