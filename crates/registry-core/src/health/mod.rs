//! Health Supervisor (C5): batched, bounded-concurrency liveness probing.

pub mod probe;
pub mod supervisor;

pub use probe::{HealthProbe, ReqwestHealthProbe};
pub use supervisor::{HealthSupervisor, HealthSupervisorConfig};
