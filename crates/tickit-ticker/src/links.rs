//! `ComponentLinks` — the per-component send-Input/receive-Output handles the
//! ticker is given as input (§4.3): "handles to send an Input to a component
//! and to receive its Output."
//!
//! Built once, at scheduler startup, over whichever [`StateInterface`] the
//! scheduler was configured with; the ticker itself never touches the
//! transport directly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tickit_core::{ComponentId, Input, Output};
use tickit_transport::{topics, with_backoff, BusMessage, RetryPolicy, StateInterface, Subscription};
use tokio::sync::Mutex;

use crate::error::{TickerError, TickerResult};

pub struct ComponentLinks {
    transport: Arc<dyn StateInterface>,
    output_subs: HashMap<ComponentId, Mutex<Subscription>>,
    retry: RetryPolicy,
}

impl ComponentLinks {
    /// Subscribe to every component's output topic up front, retrying a
    /// transient transport failure with the default [`RetryPolicy`] (§7
    /// "TransportError … retried with exponential backoff up to a bound").
    /// Panics are never used here: a subscription that never recovers is
    /// surfaced as a `TickerError` the caller can decide how to treat
    /// (typically fatal at startup).
    pub async fn build(
        transport: Arc<dyn StateInterface>,
        components: impl IntoIterator<Item = ComponentId>,
    ) -> TickerResult<Self> {
        Self::build_with_retry(transport, components, RetryPolicy::default()).await
    }

    /// Same as [`Self::build`], but with an explicit [`RetryPolicy`] — used
    /// by callers that need a tighter or looser backoff budget than the
    /// default (e.g. tests exercising exhaustion).
    pub async fn build_with_retry(
        transport: Arc<dyn StateInterface>,
        components: impl IntoIterator<Item = ComponentId>,
        retry: RetryPolicy,
    ) -> TickerResult<Self> {
        let mut output_subs = HashMap::new();
        for component in components {
            let topic = topics::output_topic(&component);
            let sub = with_backoff(retry, &component, || transport.subscribe(&topic)).await?;
            output_subs.insert(component, Mutex::new(sub));
        }
        Ok(Self { transport, output_subs, retry })
    }

    /// Publish `input` on `component`'s input topic, retrying a transient
    /// publish failure with this links' [`RetryPolicy`] before surfacing a
    /// [`TickerError::Transport`] (§4.6, §7).
    pub async fn send_input(&self, component: &ComponentId, input: Input) -> TickerResult<()> {
        let topic = topics::input_topic(component);
        with_backoff(self.retry, component, || {
            self.transport.publish(&topic, BusMessage::Input(input.clone()))
        })
        .await
        .map_err(TickerError::from)
    }

    pub async fn recv_output(
        &self,
        component: &ComponentId,
        timeout: Duration,
    ) -> TickerResult<Output> {
        let lock = self
            .output_subs
            .get(component)
            .ok_or_else(|| TickerError::UnknownComponent(component.clone()))?;
        let mut sub = lock.lock().await;

        let message = tokio::time::timeout(timeout, sub.recv())
            .await
            .map_err(|_| TickerError::ComponentTimeout(component.clone()))?
            .ok_or_else(|| TickerError::ComponentTimeout(component.clone()))?;

        match message {
            BusMessage::Output(output) => Ok(output),
            _ => Err(TickerError::UnexpectedMessage(component.clone())),
        }
    }
}
