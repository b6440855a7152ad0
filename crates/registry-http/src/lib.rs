//! # Registry HTTP
//!
//! The actix-web transport layer in front of [`registry_core`]: route
//! handlers for the table in spec.md §6, header-based auth extraction, and
//! the `{success, data, error, timestamp}` response envelope.
//!
//! `registry-app` owns the `HttpServer`/binding; this crate only supplies
//! [`api::init_routes`] to configure it and [`state::AppState`] to carry
//! into it.

pub mod api;
pub mod envelope;
pub mod state;

pub use api::init_routes;
pub use state::AppState;

/// Current version of the HTTP transport crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use crate::envelope::{ApiError, ApiResponse};
    pub use crate::state::AppState;
    pub use crate::{init_routes, VERSION};
    pub use actix_web::{web, App, HttpServer, Result as ActixResult};
}
