//! `Input`/`Output` message envelopes and the `Changes` map (§3, §6).

use std::collections::{BTreeMap, BTreeSet};

use crate::{PortId, SimTime, Value};

/// An unordered mapping `PortId → Value` — the set of output ports whose
/// value changed this tick, attached to an [`Output`].
///
/// Implemented as a `BTreeMap` (rather than a `HashMap`) purely so that
/// iterating a `Changes` map — e.g. when logging a diagnostic, or building a
/// deterministic test fixture — always visits ports in the same order run to
/// run; the kernel places no ordering requirement on the map itself.
pub type Changes = BTreeMap<PortId, Value>;

/// Message delivered from the scheduler/ticker to a component.
///
/// Exactly one `Input` is sent to a component per tick in which it is woken
/// (invariant 2, §3).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Input {
    /// The simulated time of this tick.
    pub time: SimTime,

    /// The component's full input buffer: the persistent value on every
    /// input port, not just the ones that changed this tick.
    pub inputs: BTreeMap<PortId, Value>,

    /// Which of the ports in `inputs` actually changed this tick. Empty if
    /// the component was woken purely by a timer (§4.3).
    pub changes: BTreeSet<PortId>,
}

impl Input {
    /// `true` if no input port changed this tick (a pure timer wake-up).
    pub fn is_timer_only(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Message returned from a component to the scheduler/ticker.
///
/// Exactly one `Output` is produced by a component per tick in which it is
/// woken (invariant 3, §3). `Output.time` must equal the matching `Input.time`;
/// `call_at`, if present, must be `>= time` (§6) — enforced by the ticker, not
/// by this type, since detecting the violation requires knowing "now".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    /// Must equal the `time` of the `Input` this is a reply to.
    pub time: SimTime,

    /// Output ports whose value changed this tick. May be empty (§8 boundary
    /// behavior: a timer-only wake may still produce no changes).
    pub changes: Changes,

    /// If present, the component asks to be woken again at this time.
    pub call_at: Option<SimTime>,
}

impl Output {
    /// An output with no port changes and no further wake request.
    pub fn empty(time: SimTime) -> Self {
        Self { time, changes: Changes::new(), call_at: None }
    }
}
