//! `tickit-component` — the component runtime contract (§2.1, §9): the
//! [`Component`] capability trait plus the two adapters that let either a
//! plain device or a nested system simulation be driven by the same runtime
//! loop.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|----------------------------------------------------------|
//! | [`component`]| `Component` — the `handle_input(Input) -> Output` trait  |
//! | [`device`]  | `DeviceSimulation` — runtime loop for a leaf device       |
//! | [`system`]  | `SystemSimulation` — `Component` adapter over a `SlaveScheduler` |
//! | [`error`]   | `ComponentError`, `ComponentResult`                       |

pub mod component;
pub mod device;
pub mod error;
pub mod system;

#[cfg(test)]
mod tests;

pub use component::Component;
pub use device::DeviceSimulation;
pub use error::{ComponentError, ComponentResult};
pub use system::SystemSimulation;
