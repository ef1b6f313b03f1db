//! `BusMessage` — the envelope carried over a topic, wrapping the kernel's own
//! `Input`/`Output` plus a control variant for the shutdown broadcast (§6).

use tickit_core::{Input, Output};

/// Everything a topic can carry. `Input`/`Output` are the per-component
/// traffic; `Shutdown` is published once on the control topic
/// (`tickit-control`) and closes out every subscriber loop that sees it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "nats", derive(serde::Serialize, serde::Deserialize))]
pub enum BusMessage {
    Input(Input),
    Output(Output),
    Shutdown,
}

impl From<Input> for BusMessage {
    fn from(input: Input) -> Self {
        Self::Input(input)
    }
}

impl From<Output> for BusMessage {
    fn from(output: Output) -> Self {
        Self::Output(output)
    }
}
