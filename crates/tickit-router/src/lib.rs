//! `tickit-router` — the static wiring graph and its derived queries (§4.2).
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|-------------------------------------------------------------|
//! | [`wiring`] | `WiringEntry`, `Wiring`                                    |
//! | [`topo`]   | `topological_order` (Kahn's algorithm)                     |
//! | [`router`] | `EventRouter` — `fanout`, `dependants`, `inverse_dependants`|
//! | [`error`]  | `ConfigError`, `ConfigResult<T>`                           |
//!
//! # Construction-time validation (invariants 4 & 5, §3)
//!
//! [`EventRouter::build`] validates every wiring entry against the declared
//! component set, rejects a second producer for any output port, rejects a
//! declared type mismatch between a wire's two ends, and rejects any cycle in
//! the induced component-level dependency graph — all before a single tick
//! runs (§4.2 Cycle policy; Scenario F, §8).

pub mod error;
pub mod router;
pub mod topo;
pub mod wiring;


pub use error::{ConfigError, ConfigResult};
pub use router::{Delivery, EventRouter};
pub use topo::topological_order;
pub use wiring::{Wiring, WiringEntry};
