//! `SchedulerError` — the top-level aggregate every scheduler operation
//! returns, and the kernel's exit-code mapping (§6, §7).

use thiserror::Error;
use tickit_router::ConfigError;
use tickit_ticker::TickerError;
use tickit_transport::TransportError;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ticker(#[from] TickerError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A component reported an out-of-band error in its Output (§7
    /// `ComponentError`). The scheduler continues unless `fatal` is set.
    #[error("component {component} reported an error: {message}")]
    Component { component: String, message: String, fatal: bool },
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Map a fatal [`SchedulerError`] to a process exit code (§6): `0` is never
/// returned from here — by the time the (out-of-scope) CLI entry point calls
/// this, the run has already failed. Configuration errors abort startup,
/// ordering/timeout errors abort a run, transport exhaustion aborts a run,
/// and a `fatal` component error is treated the same as an ordering error.
pub fn exit_code(error: &SchedulerError) -> i32 {
    match error {
        SchedulerError::Config(_) => 2,
        SchedulerError::Ticker(TickerError::ComponentTimeout(_)) => 3,
        SchedulerError::Ticker(_) => 4,
        SchedulerError::Transport(_) => 5,
        SchedulerError::Component { fatal: true, .. } => 4,
        SchedulerError::Component { fatal: false, .. } => 0,
    }
}
