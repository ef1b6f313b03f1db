//! The `Component` trait — the capability every device- and
//! system-simulation adapter implements (§9 Design Note "Dynamic dispatch
//! over components": a closed set of component variants plus one capability
//! interface, rather than runtime attribute lookup).

use async_trait::async_trait;
use tickit_core::{Input, Output};

use crate::error::ComponentResult;

/// Pluggable device/system simulation behavior.
///
/// Implement this trait to define how a component reacts to one Input and
/// produces one Output (§6 message envelopes). The kernel's ticker and
/// schedulers never call this trait directly — they only ever see Input/
/// Output envelopes crossing a [`tickit_transport::StateInterface`]; this
/// trait is the shape user code (the out-of-scope device-behavior library)
/// and [`crate::SystemSimulation`] both implement so a
/// [`crate::DeviceSimulation`] runtime loop can drive either uniformly.
///
/// # Thread safety
///
/// A `Component` runs inside its own cooperative task (§5), awoken by
/// [`crate::DeviceSimulation::run`] once per tick; nothing else touches its
/// state concurrently, so `&mut self` here never races with another call.
#[async_trait]
pub trait Component: Send {
    /// Produce this component's Output in reply to `input`.
    ///
    /// Implementations must set `Output.time` to `input.time` and must not
    /// request a `call_at` strictly before it (§6 invariant) — the ticker
    /// rejects a violation with `OrderingError`, but well-behaved components
    /// satisfy it by construction.
    async fn handle_input(&mut self, input: Input) -> ComponentResult<Output>;
}
