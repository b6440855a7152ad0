pub mod admin;
pub mod health;
pub mod service;

use actix_web::web;

/// Wire every route from spec.md §6 onto a `ServiceConfig`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::configure(cfg);
    service::configure(cfg);
    admin::configure(cfg);
}
