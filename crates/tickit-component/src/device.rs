//! `DeviceSimulation` — the runtime loop that drives a user [`Component`]
//! against a [`StateInterface`] (§4.3 "handles to send an Input to a
//! component and to receive its Output", from the component's own side of
//! that handle; §5 "components run as cooperative tasks that suspend only
//! while awaiting an Input message or while performing their own internal
//! I/O").
//!
//! This is the "device-simulation adapter" row of §2.1's crate table: the
//! out-of-scope device-behavior library (pumps, shutters, trampolines)
//! implements [`Component`] and hands an instance to [`DeviceSimulation::run`]
//! rather than hand-rolling the subscribe/publish loop itself.

use std::sync::Arc;

use tickit_core::ComponentId;
use tickit_transport::{topics, BusMessage, StateInterface};
use tokio::sync::watch;

use crate::component::Component;
use crate::error::ComponentResult;

/// Wraps one [`Component`] and the identifier it is addressed by on the
/// transport.
pub struct DeviceSimulation<C: Component> {
    id: ComponentId,
    behavior: C,
}

impl<C: Component> DeviceSimulation<C> {
    pub fn new(id: impl Into<ComponentId>, behavior: C) -> Self {
        Self { id: id.into(), behavior }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Run to completion: subscribe to this component's input topic, and for
    /// every Input received, call [`Component::handle_input`] and publish the
    /// resulting Output. Terminates when the input channel closes (the
    /// scheduler side has gone away) or when `shutdown` reports `true` (§5
    /// "Shutdown cancels all outstanding per-component Output awaits;
    /// components must interpret a cancellation as a request to terminate").
    ///
    /// A stray non-`Input` message on the input topic (there should never be
    /// one, by construction of [`topics::input_topic`]) is logged and
    /// skipped rather than treated as fatal.
    pub async fn run(
        mut self,
        transport: Arc<dyn StateInterface>,
        mut shutdown: watch::Receiver<bool>,
    ) -> ComponentResult<()> {
        let mut sub = transport.subscribe(&topics::input_topic(&self.id)).await?;
        let out_topic = topics::output_topic(&self.id);

        loop {
            let input = tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!(component = %self.id, "shutdown signal received, terminating device loop");
                        break;
                    }
                    continue;
                }
                message = sub.recv() => match message {
                    Some(BusMessage::Input(input)) => input,
                    Some(_) => {
                        tracing::warn!(component = %self.id, "ignoring unexpected message on input topic");
                        continue;
                    }
                    None => {
                        tracing::debug!(component = %self.id, "input channel closed, terminating device loop");
                        break;
                    }
                },
            };

            let output = self.behavior.handle_input(input).await?;
            transport.publish(&out_topic, BusMessage::Output(output)).await?;
        }

        Ok(())
    }

    /// Run with no external shutdown signal — the loop only ever terminates
    /// when the input channel closes. Convenient for tests and for
    /// fire-and-forget `tokio::spawn`ed components in a one-shot scenario.
    pub async fn run_until_closed(self, transport: Arc<dyn StateInterface>) -> ComponentResult<()> {
        let (_tx, rx) = watch::channel(false);
        self.run(transport, rx).await
    }
}
