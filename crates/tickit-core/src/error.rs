//! Shared error primitives.
//!
//! `tickit-core` itself only raises one error kind (clock overflow, §4.1);
//! the richer `ConfigError`/`OrderingError`/`TransportError`/`ComponentError`
//! families (§7) live in the crates that actually detect those conditions
//! (`tickit-router`, `tickit-ticker`, `tickit-transport`, `tickit-component`)
//! and convert into `tickit_scheduler::SchedulerError` at the top.

use thiserror::Error;

/// Errors raised by `tickit-core`'s own primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("simulated time overflowed: {0} + {1} exceeds the representable range")]
    TimeOverflow(crate::SimTime, u64),
}

pub type CoreResult<T> = Result<T, CoreError>;
