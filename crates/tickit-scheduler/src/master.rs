//! `MasterScheduler` — the top-level owner of simulated time and the wake
//! queue (§4.4).

use std::collections::HashSet;
use std::sync::Arc;

use tickit_core::{ComponentId, SimTime};
use tickit_router::EventRouter;
use tickit_ticker::{ComponentLinks, InputsBuffer, Ticker};
use tickit_transport::{topics, BusMessage, StateInterface};
use tokio::sync::watch;

use crate::error::SchedulerResult;
use crate::observer::SchedulerObserver;
use crate::wake_queue::WakeQueue;

/// Owns the event router, the wake queue, the persistent top-level inputs
/// buffer, and (through [`ComponentLinks`], built once in [`Self::run`]) the
/// state-interface subscriptions Input/Output messages travel across (§4.4).
pub struct MasterScheduler {
    pub(crate) router: EventRouter,
    pub(crate) wake_queue: WakeQueue,
    pub(crate) inputs: InputsBuffer,
    pub(crate) ticker: Ticker,
    pub(crate) transport: Arc<dyn StateInterface>,
    pub(crate) observer: Box<dyn SchedulerObserver>,
    pub(crate) shutdown_rx: watch::Receiver<bool>,
    pub(crate) now: SimTime,
    pub(crate) components: Vec<ComponentId>,
}

impl MasterScheduler {
    /// Run to completion (§4.4 Main loop): startup tick at time 0, then loop
    /// popping the earliest due wake-queue bucket and ticking it, until
    /// either the wake queue is exhausted or an external shutdown signal
    /// arrives. Broadcasts a terminal [`BusMessage::Shutdown`] on
    /// [`topics::CONTROL_TOPIC`] before returning either way, including when
    /// the drive loop itself returns an error (§7: a fatal ordering/config
    /// error or an exhausted transport backoff still shuts the scheduler
    /// down) — shutdown is idempotent, so a missing subscriber on that topic
    /// is not an error.
    pub async fn run(&mut self) -> SchedulerResult<()> {
        let transport = self.transport.clone();
        let links = ComponentLinks::build(transport, self.components.iter().cloned()).await?;

        let run_result = self.drive(&links).await;

        let shutdown_result = self.broadcast_shutdown().await;
        self.observer.on_shutdown();

        run_result?;
        shutdown_result?;
        Ok(())
    }

    /// The startup tick plus the main pop-due-and-tick loop (§4.4), split out
    /// of [`Self::run`] so shutdown is always broadcast on the way out,
    /// whether this returns `Ok` or an error.
    async fn drive(&mut self, links: &ComponentLinks) -> SchedulerResult<()> {
        // Startup (§4.4): every component is issued its initial Input at
        // time 0 (carrying its configured initial inputs, already seeded into
        // `self.inputs` by the builder) and is expected to return its
        // initial Output.
        let initial_wake: HashSet<ComponentId> = self.components.iter().cloned().collect();
        self.run_one_tick(initial_wake, links).await?;

        loop {
            if *self.shutdown_rx.borrow() {
                break;
            }
            let Some((time, wake_set)) = self.wake_queue.pop_due_earliest() else {
                break; // natural termination: nothing left to wake
            };
            self.now = time;
            self.run_one_tick(wake_set, links).await?;
        }

        Ok(())
    }

    async fn run_one_tick(
        &mut self,
        wake: HashSet<ComponentId>,
        links: &ComponentLinks,
    ) -> SchedulerResult<()> {
        self.observer.on_tick_start(self.now);
        let outcome =
            self.ticker.run_tick(&self.router, wake, self.now, &mut self.inputs, links).await?;
        for (component, call_at) in outcome.wake_requests {
            self.wake_queue.push(component, call_at);
        }
        self.observer.on_tick_end(self.now);
        Ok(())
    }

    async fn broadcast_shutdown(&self) -> SchedulerResult<()> {
        use tickit_transport::TransportError;
        match self.transport.publish(topics::CONTROL_TOPIC, BusMessage::Shutdown).await {
            Ok(()) | Err(TransportError::NoSubscriber(_)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// The persistent per-component inputs buffer, for tests and
    /// diagnostics to inspect final wire state after a run (§3 "Inputs
    /// buffer").
    pub fn inputs(&self) -> &InputsBuffer {
        &self.inputs
    }
}
