//! Configuration surface the scheduler consumes from an external loader
//! (§6). The kernel depends on none of these types coming from any
//! particular file format — only that whatever does the parsing (out of
//! scope) hands back these shapes.

use std::collections::{BTreeMap, HashSet};

use tickit_core::{ComponentId, PortId, Value};
use tickit_router::{ConfigError, ConfigResult, EventRouter, WiringEntry};

/// Input-port -> boundary-in output-port name, and output-port -> boundary-out
/// input-port name, for a system-simulation component's nested sub-graph
/// (§4.5 ADDED).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposeMap {
    pub inputs: BTreeMap<PortId, PortId>,
    pub outputs: BTreeMap<PortId, PortId>,
}

/// What a declared component is: an ordinary device, or a system simulation
/// embedding its own nested wiring (§9 Design Note "Dynamic dispatch over
/// components" — a closed set of variants rather than runtime attribute
/// lookup).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentKind {
    Device,
    System { components: Vec<ComponentDecl>, wiring: Vec<WiringEntry>, expose_map: ExposeMap },
}

/// One component declaration: `{id, kind, initial inputs, expose-map}` (§6).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentDecl {
    pub id: ComponentId,
    pub kind: ComponentKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_inputs: BTreeMap<PortId, Value>,
}

impl ComponentDecl {
    pub fn device(id: impl Into<ComponentId>) -> Self {
        Self { id: id.into(), kind: ComponentKind::Device, initial_inputs: BTreeMap::new() }
    }
}

/// Which transport backend a scheduler level uses (§6).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportSelector {
    InProcess,
    /// External message bus. Only usable when `tickit-transport` is built
    /// with its `nats` feature; selecting this otherwise is a configuration
    /// error the (out-of-scope) loader should catch before the scheduler
    /// ever sees it.
    ExternalBus { url: String },
}

impl Default for TransportSelector {
    fn default() -> Self {
        Self::InProcess
    }
}

/// A fully assembled, validated scheduler configuration: the component
/// declarations, the wiring list connecting them, and the transport choice.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    pub components: Vec<ComponentDecl>,
    pub wiring: Vec<WiringEntry>,
    pub transport: TransportSelector,
}

impl SchedulerConfig {
    pub fn from_parts(
        components: Vec<ComponentDecl>,
        wiring: Vec<WiringEntry>,
        transport: TransportSelector,
    ) -> Self {
        Self { components, wiring, transport }
    }

    /// Validate the top-level wiring against the declared component set by
    /// delegating to [`EventRouter::build`] — the same construction-time
    /// checks (unknown component, duplicate producer, type mismatch, cycle)
    /// apply uniformly whether the router ends up owned by a master or a
    /// slave scheduler.
    pub fn validate(&self) -> ConfigResult<EventRouter> {
        let known: HashSet<ComponentId> = self.components.iter().map(|c| c.id.clone()).collect();
        if known.len() != self.components.len() {
            let mut seen = HashSet::new();
            for decl in &self.components {
                if !seen.insert(decl.id.clone()) {
                    return Err(ConfigError::UnknownComponent(decl.id.clone()));
                }
            }
        }
        EventRouter::build(&self.wiring, &known)
    }
}
