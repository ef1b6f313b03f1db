//! `SchedulerObserver` — progress reporting and test instrumentation hooks
//! around the master scheduler's main loop (§4.4 ADDED), the same
//! no-op-by-default observer shape the teacher crate uses around its own run
//! loop.

use tickit_core::SimTime;

pub trait SchedulerObserver: Send + Sync {
    fn on_tick_start(&self, _time: SimTime) {}
    fn on_tick_end(&self, _time: SimTime) {}
    fn on_shutdown(&self) {}
}

/// The default observer: every hook is a no-op.
#[derive(Default)]
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}

/// Logs every hook at `tracing::debug!`/`info!` — a reasonable default for
/// anything other than a tight test loop.
#[derive(Default)]
pub struct TracingObserver;

impl SchedulerObserver for TracingObserver {
    fn on_tick_start(&self, time: SimTime) {
        tracing::debug!(%time, "tick start");
    }

    fn on_tick_end(&self, time: SimTime) {
        tracing::debug!(%time, "tick end");
    }

    fn on_shutdown(&self) {
        tracing::info!("scheduler shut down");
    }
}
