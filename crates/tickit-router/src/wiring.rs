//! `WiringEntry` — one producer→consumer connection as it arrives from
//! configuration, and `Wiring` — the validated static graph built from a list
//! of entries.

use std::collections::{HashMap, HashSet};

use tickit_core::{ComponentId, Endpoint, PortId};

use crate::error::{ConfigError, ConfigResult};

/// One `{producer, output-port, consumer, input-port}` entry from the
/// configuration surface's wiring list (§6).
///
/// `producer_type`/`consumer_type` are optional type tags an external config
/// loader may attach to a port declaration; when both sides of a wire supply
/// one and they disagree, construction fails with
/// [`ConfigError::TypeMismatch`]. Leaving either (or both) `None` skips the
/// check — the kernel does not require type tags to function, only to
/// optionally catch mistakes earlier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WiringEntry {
    pub producer: ComponentId,
    pub output_port: PortId,
    pub consumer: ComponentId,
    pub input_port: PortId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub producer_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumer_type: Option<String>,
}

impl WiringEntry {
    /// Build a minimal entry with no type tags — convenient for tests.
    pub fn new(
        producer: impl Into<ComponentId>,
        output_port: impl Into<PortId>,
        consumer: impl Into<ComponentId>,
        input_port: impl Into<PortId>,
    ) -> Self {
        Self {
            producer: producer.into(),
            output_port: output_port.into(),
            consumer: consumer.into(),
            input_port: input_port.into(),
            producer_type: None,
            consumer_type: None,
        }
    }
}

/// The static wiring graph: every output endpoint's subscriber list.
///
/// `Wiring` only models connectivity; ordering and cycle rejection are
/// computed on top of it by [`crate::EventRouter`]. Keeping the two concerns
/// separate mirrors the teacher crate's habit of building a raw structure
/// first (e.g. `ActivityPlan`'s sorted `Vec`) and layering derived queries
/// (`next_wake_tick`) on top rather than entangling both in one pass.
#[derive(Debug, Default)]
pub struct Wiring {
    /// Output endpoint -> subscriber input endpoints, in configuration order.
    subscribers: HashMap<Endpoint, Vec<Endpoint>>,
    /// Every producer endpoint that appears in the wiring (used to check
    /// invariant 4 — no port produced by more than one component — is not
    /// itself violated by this structure; violation is checked while building).
    producers: HashSet<Endpoint>,
}

impl Wiring {
    /// Validate and build a `Wiring` from a flat entry list plus the set of
    /// component ids known to exist at this nesting level.
    ///
    /// Validates (a) every referenced component is declared, and (b) no
    /// output port is claimed by more than one producing component — i.e. the
    /// same `(component, port)` endpoint never appears as the producer side
    /// of two entries with a *different* producer component. (A single
    /// component fanning its own one output to many consumers is fine and
    /// expected; that's ordinary fan-out, not a duplicate producer.)
    pub fn build(
        entries: &[WiringEntry],
        known_components: &HashSet<ComponentId>,
    ) -> ConfigResult<Self> {
        let mut subscribers: HashMap<Endpoint, Vec<Endpoint>> = HashMap::new();
        let mut producers: HashSet<Endpoint> = HashSet::new();
        // port -> the single component allowed to produce it.
        let mut owning_producer: HashMap<(ComponentId, PortId), ComponentId> = HashMap::new();

        for entry in entries {
            if !known_components.contains(&entry.producer) {
                return Err(ConfigError::UnknownComponent(entry.producer.clone()));
            }
            if !known_components.contains(&entry.consumer) {
                return Err(ConfigError::UnknownComponent(entry.consumer.clone()));
            }

            let out_ep = Endpoint::new(entry.producer.clone(), entry.output_port.clone());
            let in_ep = Endpoint::new(entry.consumer.clone(), entry.input_port.clone());

            let key = (entry.producer.clone(), entry.output_port.clone());
            match owning_producer.get(&key) {
                Some(existing) if *existing != entry.producer => {
                    return Err(ConfigError::DuplicateProducer(out_ep));
                }
                _ => {
                    owning_producer.insert(key, entry.producer.clone());
                }
            }

            if let (Some(pt), Some(ct)) = (&entry.producer_type, &entry.consumer_type) {
                if pt != ct {
                    return Err(ConfigError::TypeMismatch {
                        producer: out_ep.clone(),
                        consumer: in_ep.clone(),
                        producer_type: pt.clone(),
                        consumer_type: ct.clone(),
                    });
                }
            }

            producers.insert(out_ep.clone());
            subscribers.entry(out_ep).or_default().push(in_ep);
        }

        Ok(Self { subscribers, producers })
    }

    /// Subscribers of one output endpoint, in configuration order.
    pub fn subscribers_of(&self, endpoint: &Endpoint) -> &[Endpoint] {
        self.subscribers.get(endpoint).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All output endpoints that have at least one subscriber.
    pub fn producer_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.producers.iter()
    }

    /// Component-level edges implied by the wiring: `(producer, consumer)`
    /// pairs, deduplicated, used to build the dependency DAG.
    pub fn component_edges(&self) -> HashSet<(ComponentId, ComponentId)> {
        let mut edges = HashSet::new();
        for (out_ep, subs) in &self.subscribers {
            for in_ep in subs {
                if out_ep.component != in_ep.component {
                    edges.insert((out_ep.component.clone(), in_ep.component.clone()));
                }
            }
        }
        edges
    }
}
