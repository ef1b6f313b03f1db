//! External-bus `StateInterface` backend over `async-nats` (§4.6), compiled
//! in only under the `nats` feature so the default build pulls in no network
//! client at all.
//!
//! Wire encoding is plain JSON of the kernel's own `Input`/`Output` envelopes.
//! Since `Value` is type-erased, only values constructed from a
//! `serde_json::Value` payload (see `tickit_core::Value`'s `Serialize` impl)
//! survive the trip; a device that wants to talk to a remote component over
//! this transport builds its published values that way from the start.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use crate::error::{TransportError, TransportResult};
use crate::interface::{StateInterface, Subscription};
use crate::message::BusMessage;

const CHANNEL_CAPACITY: usize = 256;

/// Publishes/subscribes to NATS subjects named after the topic strings
/// produced by [`crate::topics`]. One `async_nats::Client` is shared across
/// every topic; each `subscribe` spawns a forwarding task that deserializes
/// incoming bytes into [`BusMessage`] and feeds them into a local channel so
/// [`Subscription::recv`] has the same shape regardless of backend.
pub struct NatsBus {
    client: async_nats::Client,
}

impl NatsBus {
    pub async fn connect(url: &str) -> TransportResult<Self> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| TransportError::SubscribeFailed(url.to_string(), e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl StateInterface for NatsBus {
    async fn publish(&self, topic: &str, message: BusMessage) -> TransportResult<()> {
        let payload = serde_json::to_vec(&message)
            .map_err(|e| TransportError::PublishFailed(topic.to_string(), e.to_string()))?;
        self.client
            .publish(topic.to_string(), payload.into())
            .await
            .map_err(|e| TransportError::PublishFailed(topic.to_string(), e.to_string()))
    }

    async fn subscribe(&self, topic: &str) -> TransportResult<Subscription> {
        let mut subscriber = self
            .client
            .subscribe(topic.to_string())
            .await
            .map_err(|e| TransportError::SubscribeFailed(topic.to_string(), e.to_string()))?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let topic_owned = topic.to_string();
        tokio::spawn(async move {
            while let Some(msg) = subscriber.next().await {
                match serde_json::from_slice::<BusMessage>(&msg.payload) {
                    Ok(decoded) => {
                        if tx.send(decoded).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(topic = %topic_owned, error = %err, "dropping malformed bus message");
                    }
                }
            }
        });

        Ok(Subscription::new(rx))
    }

    async fn close(&self) -> TransportResult<()> {
        self.client
            .flush()
            .await
            .map_err(|_| TransportError::Disconnected)
    }
}
