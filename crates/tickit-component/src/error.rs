//! `ComponentError` — failures raised by a [`crate::Component`] implementation
//! itself, distinct from the kernel's own `ConfigError`/`OrderingError`
//! (§7 `ComponentError`).

use thiserror::Error;
use tickit_core::ComponentId;
use tickit_transport::TransportError;

#[derive(Debug, Error)]
pub enum ComponentError {
    /// The component's own device logic failed to produce an Output (§7
    /// `ComponentError` — "the component itself reports an error"). `fatal`
    /// mirrors the out-of-band field §6 leaves unspecified in the envelope
    /// itself: the runtime surfaces it to the operator and, if `fatal`,
    /// treats it as terminal for this component's loop.
    #[error("component {component} reported an error: {message}")]
    Device { component: ComponentId, message: String, fatal: bool },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Ticker(#[from] tickit_ticker::TickerError),

    #[error(transparent)]
    Scheduler(#[from] tickit_scheduler::SchedulerError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;
