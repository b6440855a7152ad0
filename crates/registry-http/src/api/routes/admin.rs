//! `POST /admin/shutdown` (spec.md §6).

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::api::middleware::auth::AdminKey;
use crate::envelope::{ApiError, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShutdownResponse {
    message: &'static str,
}

/// Disposes the registry and wakes `registry-app`'s shutdown sequence, which
/// stops accepting connections and force-exits after 10 seconds if the
/// server hasn't drained by then.
pub async fn shutdown(key: AdminKey, state: web::Data<AppState>) -> Result<HttpResponse> {
    if key.0 != state.admin_key {
        return Err(ApiError::unauthorized("invalid admin key").into());
    }

    state.registry.dispose();
    state.shutdown.notify_waiters();

    Ok(ApiResponse::ok(ShutdownResponse {
        message: "shutdown initiated",
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin/shutdown").route(web::post().to(shutdown)));
}
