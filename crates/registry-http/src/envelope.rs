//! Uniform JSON response envelope (spec.md §6): every route, success or
//! failure, answers with `{success, data?, error?, timestamp}`.

use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// Wraps a handler's payload in the response envelope.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> HttpResponse
    where
        T: 'static,
    {
        HttpResponse::Ok().json(Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }

    pub fn created(data: T) -> HttpResponse
    where
        T: 'static,
    {
        HttpResponse::Created().json(Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}

/// An envelope-shaped error, carrying the HTTP status it should be rendered with.
#[derive(Debug)]
pub struct ApiError {
    pub status: actix_web::http::StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: actix_web::http::StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(actix_web::http::StatusCode::UNAUTHORIZED, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(actix_web::http::StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message.clone()),
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}

impl From<registry_core::RegistryError> for ApiError {
    fn from(err: registry_core::RegistryError) -> Self {
        use registry_core::RegistryError::*;
        match err {
            Authentication => ApiError::unauthorized(err.to_string()),
            Validation { .. } => ApiError::bad_request(err.to_string()),
            Disposed => ApiError::internal(err.to_string()),
        }
    }
}
