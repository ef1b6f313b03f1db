//! `tickit-ticker` — the per-tick propagation engine (§4.3).
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|--------------------------------------------------------------|
//! | [`ticker`]| `Ticker`, `TickOutcome`, `InputsBuffer`                      |
//! | [`links`] | `ComponentLinks` — per-component send-Input/receive-Output    |
//! | [`error`] | `TickerError`, `TickerResult`                                |
//!
//! [`Ticker::run_tick`] computes the reachable closure of a woken component
//! set, visits the router's topological order, and enforces invariants 2, 3
//! and 5 at runtime (a component that would need a second delivery after its
//! position has already been visited is an [`error::TickerError::Ordering`]).

pub mod error;
pub mod links;
pub mod ticker;

#[cfg(test)]
mod property_tests;

pub use error::{TickerError, TickerResult};
pub use links::ComponentLinks;
pub use ticker::{InputsBuffer, TickOutcome, Ticker, DEFAULT_TICK_TIMEOUT};
