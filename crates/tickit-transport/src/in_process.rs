//! In-process `StateInterface` backend: one `tokio::mpsc` channel per topic,
//! held in a registry populated at startup and read thereafter (§4.6) — the
//! same "single owner, populated once, read afterwards" shape the teacher
//! crate uses for its component-type registry.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{TransportError, TransportResult};
use crate::interface::{StateInterface, Subscription};
use crate::message::BusMessage;

const CHANNEL_CAPACITY: usize = 256;

/// Default in-process transport. `subscribe` creates the topic's channel on
/// first use; `publish` to a topic with no subscriber yet fails with
/// [`TransportError::NoSubscriber`] rather than buffering silently forever —
/// callers that expect a subscriber to exist before publishing (the normal
/// startup order: subscribe, then publish) get an immediate, diagnosable
/// error instead of a message vanishing into an unread channel.
#[derive(Default)]
pub struct InProcessBus {
    senders: Mutex<HashMap<String, mpsc::Sender<BusMessage>>>,
    closed: Mutex<bool>,
}

impl InProcessBus {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateInterface for InProcessBus {
    async fn publish(&self, topic: &str, message: BusMessage) -> TransportResult<()> {
        if *self.closed.lock().unwrap() {
            return Err(TransportError::Disconnected);
        }
        let sender = {
            let senders = self.senders.lock().unwrap();
            senders.get(topic).cloned()
        };
        match sender {
            Some(sender) => sender
                .send(message)
                .await
                .map_err(|e| TransportError::PublishFailed(topic.to_string(), e.to_string())),
            None => Err(TransportError::NoSubscriber(topic.to_string())),
        }
    }

    async fn subscribe(&self, topic: &str) -> TransportResult<Subscription> {
        let mut senders = self.senders.lock().unwrap();
        if senders.contains_key(topic) {
            return Err(TransportError::AlreadySubscribed(topic.to_string()));
        }
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        senders.insert(topic.to_string(), tx);
        Ok(Subscription::new(rx))
    }

    async fn close(&self) -> TransportResult<()> {
        *self.closed.lock().unwrap() = true;
        self.senders.lock().unwrap().clear();
        Ok(())
    }
}
