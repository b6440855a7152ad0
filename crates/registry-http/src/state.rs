//! Shared state handed to every route handler via `web::Data`.

use std::sync::Arc;

use registry_core::RegistryCore;
use tokio::sync::Notify;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RegistryCore>,
    pub admin_key: String,
    /// Notified once by `POST /admin/shutdown`; `registry-app`'s main loop
    /// waits on this to begin its graceful-then-forced shutdown sequence.
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(registry: Arc<RegistryCore>, admin_key: String) -> Self {
        Self {
            registry,
            admin_key,
            shutdown: Arc::new(Notify::new()),
        }
    }
}
