//! `ConfigError` — everything that can go wrong building a [`crate::EventRouter`].

use thiserror::Error;

use tickit_core::{ComponentId, Endpoint};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("wiring entry references unknown component {0}")]
    UnknownComponent(ComponentId),

    #[error("output port {0} is produced by more than one component")]
    DuplicateProducer(Endpoint),

    #[error("wiring contains a cycle through components: {}", render_cycle(.0))]
    Cycle(Vec<ComponentId>),

    #[error("type mismatch on wire {producer} -> {consumer}: {producer_type} vs {consumer_type}")]
    TypeMismatch {
        producer: Endpoint,
        consumer: Endpoint,
        producer_type: String,
        consumer_type: String,
    },
}

fn render_cycle(ids: &[ComponentId]) -> String {
    ids.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(" -> ")
}

pub type ConfigResult<T> = Result<T, ConfigError>;
