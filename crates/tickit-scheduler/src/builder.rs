//! `SchedulerBuilder` — fluent construction of a [`MasterScheduler`], the
//! same builder shape the teacher crate uses for its own simulation entry
//! point: required inputs go to `new`, everything else defaults and is
//! overridden with `with_*`.

use std::sync::Arc;
use std::time::Duration;

use tickit_core::SimTime;
use tickit_ticker::{InputsBuffer, Ticker, DEFAULT_TICK_TIMEOUT};
use tickit_transport::StateInterface;
use tokio::sync::watch;

use crate::config::SchedulerConfig;
use crate::error::SchedulerResult;
use crate::master::MasterScheduler;
use crate::observer::{NoopObserver, SchedulerObserver};
use crate::wake_queue::WakeQueue;

pub struct SchedulerBuilder {
    config: SchedulerConfig,
    transport: Arc<dyn StateInterface>,
    observer: Box<dyn SchedulerObserver>,
    tick_timeout: Duration,
    shutdown_rx: Option<watch::Receiver<bool>>,
}

impl SchedulerBuilder {
    pub fn new(config: SchedulerConfig, transport: Arc<dyn StateInterface>) -> Self {
        Self {
            config,
            transport,
            observer: Box::new(NoopObserver),
            tick_timeout: DEFAULT_TICK_TIMEOUT,
            shutdown_rx: None,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn SchedulerObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_tick_timeout(mut self, timeout: Duration) -> Self {
        self.tick_timeout = timeout;
        self
    }

    /// Wire an external shutdown signal in. Without one, the scheduler only
    /// ever stops by wake-queue exhaustion.
    pub fn with_shutdown(mut self, shutdown_rx: watch::Receiver<bool>) -> Self {
        self.shutdown_rx = Some(shutdown_rx);
        self
    }

    pub fn build(self) -> SchedulerResult<MasterScheduler> {
        let router = self.config.validate()?;
        let components = router.order().to_vec();
        let shutdown_rx = self.shutdown_rx.unwrap_or_else(|| watch::channel(false).1);

        // Seed the persistent inputs buffer from each declaration's
        // configured initial inputs (§6 configuration surface) so the
        // startup tick's Input carries them (§4.4 Startup), instead of every
        // component seeing an empty `inputs` map at time 0.
        let mut inputs = InputsBuffer::new();
        for decl in &self.config.components {
            if !decl.initial_inputs.is_empty() {
                inputs.insert(decl.id.clone(), decl.initial_inputs.clone());
            }
        }

        Ok(MasterScheduler {
            router,
            wake_queue: WakeQueue::new(),
            inputs,
            ticker: Ticker::new(self.tick_timeout),
            transport: self.transport,
            observer: self.observer,
            shutdown_rx,
            now: SimTime::ZERO,
            components,
        })
    }
}
