//! `TickerError` — the runtime ordering and liveness failures the ticker can
//! raise while propagating one tick (§4.3, §7).

use thiserror::Error;
use tickit_core::ComponentId;
use tickit_transport::TransportError;

#[derive(Debug, Error)]
pub enum TickerError {
    /// Invariant 2/3/5 violated at runtime: a well-formedness violation the
    /// router's construction-time checks should have ruled out already (a
    /// wiring edge pointing backward in topological order, or a second
    /// delivery to an already-visited component), or a component reporting a
    /// `call_at` strictly before the tick's own time (§9 open question:
    /// resolved as a runtime `OrderingError`, not a startup `ConfigError`,
    /// since it can only be observed once a component actually emits one).
    #[error("ordering violation: {0}")]
    Ordering(String),

    /// A component did not produce its Output within the configured per-tick
    /// budget.
    #[error("component {0} timed out waiting for its Output")]
    ComponentTimeout(ComponentId),

    /// The message received on a component's output channel was not an
    /// `Output` (e.g. a stray `Shutdown` arrived mid-tick).
    #[error("expected an Output from component {0}, got something else")]
    UnexpectedMessage(ComponentId),

    /// No output subscription is registered for this component — a
    /// programming error in how [`crate::links::ComponentLinks`] was built.
    #[error("no output channel registered for component {0}")]
    UnknownComponent(ComponentId),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type TickerResult<T> = Result<T, TickerError>;
