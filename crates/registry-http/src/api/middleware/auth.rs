//! Header-based credential extractors (spec.md §6).
//!
//! Each extractor pulls its credential out of the request and fails fast
//! with a 401 envelope if it is missing or malformed; verifying the
//! credential against the engine or the admin secret is the handler's job,
//! since that's where the relevant state (`RegistryCore`, `ADMIN_API_KEY`)
//! lives.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::envelope::ApiError;

/// `Authorization: Bearer <key>` extracted for `POST /service`.
pub struct RegistrationKey(pub String);

impl FromRequest for RegistrationKey {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|key| RegistrationKey(key.to_string()))
            .ok_or_else(|| ApiError::unauthorized("missing or malformed Authorization header"));
        ready(result)
    }
}

/// `x-service-id` / `x-service-token` pair extracted for the authenticated
/// lookup and deregistration routes.
pub struct ServiceCredentials {
    pub id: Uuid,
    pub token: String,
}

impl FromRequest for ServiceCredentials {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let headers = req.headers();
        let id = headers
            .get("x-service-id")
            .and_then(|h| h.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok());
        let token = headers
            .get("x-service-token")
            .and_then(|h| h.to_str().ok())
            .map(|v| v.to_string());

        let result = match (id, token) {
            (Some(id), Some(token)) => Ok(ServiceCredentials { id, token }),
            _ => Err(ApiError::unauthorized("missing or malformed x-service-id/x-service-token headers")),
        };
        ready(result)
    }
}

/// `x-admin-key` extracted for the `/admin/*` routes.
pub struct AdminKey(pub String);

impl FromRequest for AdminKey {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .headers()
            .get("x-admin-key")
            .and_then(|h| h.to_str().ok())
            .map(|v| AdminKey(v.to_string()))
            .ok_or_else(|| ApiError::unauthorized("missing x-admin-key header"));
        ready(result)
    }
}
