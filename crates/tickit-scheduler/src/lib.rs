//! `tickit-scheduler` — the master and slave schedulers, the wake queue, and
//! the configuration surface they consume (§4.4, §4.5, §6).
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|-------------------------------------------------------|
//! | [`master`]   | `MasterScheduler` — top-level run loop                |
//! | [`slave`]    | `SlaveScheduler` — nested system-simulation bridge    |
//! | [`builder`]  | `SchedulerBuilder` — fluent construction               |
//! | [`wake_queue`]| `WakeQueue`                                           |
//! | [`observer`] | `SchedulerObserver`, `NoopObserver`, `TracingObserver` |
//! | [`config`]   | `ComponentDecl`, `ExposeMap`, `TransportSelector`, `SchedulerConfig` |
//! | [`error`]    | `SchedulerError`, `exit_code`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|---------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on the configuration surface types. |

pub mod builder;
pub mod config;
pub mod error;
pub mod master;
pub mod observer;
pub mod slave;
pub mod wake_queue;

#[cfg(test)]
mod tests;

pub use builder::SchedulerBuilder;
pub use config::{ComponentDecl, ComponentKind, ExposeMap, SchedulerConfig, TransportSelector};
pub use error::{exit_code, SchedulerError, SchedulerResult};
pub use master::MasterScheduler;
pub use observer::{NoopObserver, SchedulerObserver, TracingObserver};
pub use slave::{boundary_in_id, boundary_out_id, SlaveScheduler};
pub use wake_queue::WakeQueue;
