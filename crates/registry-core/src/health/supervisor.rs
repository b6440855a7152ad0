//! Batched, bounded-concurrency health check cycle (spec.md §4.4).

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::events::{EventChannel, RegistryEvent};
use crate::index::DualIndex;

use super::probe::HealthProbe;

/// Tuning parameters for the [`HealthSupervisor`]. Loaded from the
/// environment as part of [`crate::config::RegistryConfig`].
#[derive(Debug, Clone, Copy)]
pub struct HealthSupervisorConfig {
    /// When `false`, `RegistryCore::init` does not spawn the supervisor at all.
    pub enabled: bool,
    /// Delay between the end of one cycle and the start of the next.
    pub interval_ms: u64,
    /// Instances probed per batch (spec.md calls this the "batch").
    pub batch_size: usize,
    /// Probes in flight at once within a batch.
    pub max_concurrent: usize,
    /// Per-probe timeout, passed to [`super::probe::ReqwestHealthProbe`].
    pub ttl_ms: u64,
}

impl Default for HealthSupervisorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 5_000,
            batch_size: 100,
            max_concurrent: 10,
            ttl_ms: 2_000,
        }
    }
}

/// Drives periodic health checks over every registered instance.
///
/// Each cycle walks the full instance list in chunks of `batch_size`,
/// probing each chunk with at most `max_concurrent` probes in flight, then
/// sleeps `interval_ms` before starting the next cycle. A probe outcome that
/// disagrees with the index's current health flips it and emits the
/// matching [`RegistryEvent`]; an outcome that agrees is a no-op, so a
/// steady-state healthy instance produces no event traffic.
pub struct HealthSupervisor {
    index: Arc<DualIndex>,
    events: EventChannel,
    probe: Arc<dyn HealthProbe>,
    config: HealthSupervisorConfig,
    shutdown: Arc<Notify>,
}

impl HealthSupervisor {
    pub fn new(
        index: Arc<DualIndex>,
        events: EventChannel,
        probe: Arc<dyn HealthProbe>,
        config: HealthSupervisorConfig,
    ) -> Self {
        Self {
            index,
            events,
            probe,
            config,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Spawn the supervisor's background loop. The returned handle finishes
    /// once [`Self::stop`] is called (or its companion `Arc<Notify>` is
    /// notified directly); dropping the handle without stopping leaks the task.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = self.run_cycle() => {}
                    _ = self.shutdown.notified() => break,
                }

                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_millis(self.config.interval_ms)) => {}
                    _ = self.shutdown.notified() => break,
                }
            }
        })
    }

    /// Signal the background loop to exit after its current step.
    pub fn stop(&self) {
        self.shutdown.notify_waiters();
    }

    async fn run_cycle(&self) {
        let instances = self.index.list_all();
        for batch in instances.chunks(self.config.batch_size.max(1)) {
            for chunk in batch.chunks(self.config.max_concurrent.max(1)) {
                let results = join_all(chunk.iter().map(|instance| {
                    let probe = self.probe.clone();
                    async move { (instance.id, instance.service_type.clone(), probe.check(instance).await) }
                }))
                .await;

                for (id, service_type, is_healthy) in results {
                    if is_healthy {
                        if self.index.mark_healthy(id).is_some() {
                            self.events.emit(RegistryEvent::MarkedHealthy { id, service_type });
                        }
                    } else if self.index.mark_unhealthy(id).is_some() {
                        self.events.emit(RegistryEvent::MarkedUnhealthy { id, service_type });
                    }
                }
            }
        }
    }
}
