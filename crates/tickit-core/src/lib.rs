//! `tickit-core` — foundational types for the Tickit simulation kernel.
//!
//! This crate is a dependency of every other `tickit-*` crate. It has no
//! `tickit-*` dependencies of its own and a minimal external footprint
//! (`thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|--------------------------------------------------------|
//! | [`time`]     | `SimTime`                                             |
//! | [`ids`]      | `ComponentId`, `PortId`, `Endpoint`                   |
//! | [`value`]    | `Value` — type-erased wire payload                    |
//! | [`envelope`] | `Input`, `Output`, `Changes`                          |
//! | [`error`]    | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. Needed |
//! |         | by the configuration surface (`tickit-scheduler::config`). |

pub mod envelope;
pub mod error;
pub mod ids;
pub mod time;
pub mod value;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use envelope::{Changes, Input, Output};
pub use error::{CoreError, CoreResult};
pub use ids::{ComponentId, Endpoint, PortId};
pub use time::SimTime;
pub use value::Value;
