//! `StateInterface` — the publish/subscribe contract the kernel drives both
//! the in-process and external-bus transports through (§4.6).

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::TransportResult;
use crate::message::BusMessage;

/// A single subscriber's receiving end. Concrete, not a boxed `Stream`,
/// matching the teacher crate's preference for naming the shape of a thing
/// rather than reaching for a generic trait object where a concrete struct
/// reads just as well.
pub struct Subscription {
    receiver: mpsc::Receiver<BusMessage>,
}

impl Subscription {
    pub fn new(receiver: mpsc::Receiver<BusMessage>) -> Self {
        Self { receiver }
    }

    /// Await the next message in publication order, or `None` once the
    /// publisher side has been dropped/closed.
    pub async fn recv(&mut self) -> Option<BusMessage> {
        self.receiver.recv().await
    }
}

/// Transport abstraction between a scheduler and its components (§4.6).
///
/// Both the in-process and external-bus backends implement this one trait;
/// the kernel never branches on which variant is in use.
#[async_trait]
pub trait StateInterface: Send + Sync {
    /// Deliver `message` on `topic`. Ordering is preserved per topic.
    async fn publish(&self, topic: &str, message: BusMessage) -> TransportResult<()>;

    /// Register interest in `topic`, returning the receiving end. A topic may
    /// have at most one subscriber at a time.
    async fn subscribe(&self, topic: &str) -> TransportResult<Subscription>;

    /// Release any resources held by this transport. Idempotent.
    async fn close(&self) -> TransportResult<()>;
}
