//! HTTP transport: route handlers, auth extractors, and the response envelope.

use actix_web::web;

pub mod middleware;
pub mod routes;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    routes::configure(cfg);
}
