//! `TransportError` — state-interface disconnects and publish failures (§7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no subscriber registered for topic {0:?}")]
    NoSubscriber(String),

    #[error("topic {0:?} already has a subscriber")]
    AlreadySubscribed(String),

    #[error("publish to topic {0:?} failed: {1}")]
    PublishFailed(String, String),

    #[error("subscribe to topic {0:?} failed: {1}")]
    SubscribeFailed(String, String),

    #[error("transport disconnected")]
    Disconnected,

    #[error("retry budget exhausted after {attempts} attempts: {source}")]
    BackoffExhausted { attempts: u32, #[source] source: Box<TransportError> },
}

pub type TransportResult<T> = Result<T, TransportError>;
