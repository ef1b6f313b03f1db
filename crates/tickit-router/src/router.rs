//! `EventRouter` — the validated wiring graph plus its derived queries (§4.2).

use std::collections::{BTreeMap, HashMap, HashSet};

use tickit_core::{Changes, ComponentId, Endpoint, PortId, Value};

use crate::error::ConfigResult;
use crate::topo::topological_order;
use crate::wiring::{Wiring, WiringEntry};

/// Deliveries destined for one downstream component: the subset of its input
/// ports that received a new value this tick, and the values themselves.
pub type Delivery = BTreeMap<PortId, Value>;

/// Encapsulates the static wiring and the two queries the ticker needs:
/// fan-out of changed outputs, and the topological order updates must follow.
pub struct EventRouter {
    wiring: Wiring,
    /// Total order consistent with the dependency DAG; index = position.
    order: Vec<ComponentId>,
    position: HashMap<ComponentId, usize>,
    /// Precomputed downstream/upstream component sets, keyed by component.
    dependants: HashMap<ComponentId, HashSet<ComponentId>>,
    inverse_dependants: HashMap<ComponentId, HashSet<ComponentId>>,
}

impl EventRouter {
    /// Validate `entries` against `known_components` and build the router.
    ///
    /// Fails with [`crate::ConfigError`] if any entry references an unknown
    /// component, if invariant 4 (one producer per port) is violated, if a
    /// type mismatch is declared, or if the induced component-level graph has
    /// a cycle (invariant 5).
    pub fn build(
        entries: &[WiringEntry],
        known_components: &HashSet<ComponentId>,
    ) -> ConfigResult<Self> {
        let wiring = Wiring::build(entries, known_components)?;
        let edges = wiring.component_edges();
        let order = topological_order(known_components, &edges)?;

        let position: HashMap<ComponentId, usize> =
            order.iter().enumerate().map(|(i, c)| (c.clone(), i)).collect();

        let mut dependants: HashMap<ComponentId, HashSet<ComponentId>> =
            known_components.iter().map(|c| (c.clone(), HashSet::new())).collect();
        let mut inverse_dependants: HashMap<ComponentId, HashSet<ComponentId>> =
            known_components.iter().map(|c| (c.clone(), HashSet::new())).collect();

        for (producer, consumer) in &edges {
            dependants.entry(producer.clone()).or_default().insert(consumer.clone());
            inverse_dependants.entry(consumer.clone()).or_default().insert(producer.clone());
        }

        Ok(Self { wiring, order, position, dependants, inverse_dependants })
    }

    /// The total order over components, consistent with the dependency DAG:
    /// every producer appears before every one of its consumers.
    pub fn order(&self) -> &[ComponentId] {
        &self.order
    }

    /// `component`'s position in [`EventRouter::order`], or `None` if it is
    /// not part of this router (should not happen for any component declared
    /// at construction time).
    pub fn position(&self, component: &ComponentId) -> Option<usize> {
        self.position.get(component).copied()
    }

    /// Downstream components that may need updating if `component` changes
    /// any output — i.e. components with a direct wire from `component`.
    pub fn dependants(&self, component: &ComponentId) -> &HashSet<ComponentId> {
        static EMPTY: std::sync::OnceLock<HashSet<ComponentId>> = std::sync::OnceLock::new();
        self.dependants
            .get(component)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// Upstream components `component` directly depends on — used by
    /// schedulers to walk dependencies at a nesting boundary.
    pub fn inverse_dependants(&self, component: &ComponentId) -> &HashSet<ComponentId> {
        static EMPTY: std::sync::OnceLock<HashSet<ComponentId>> = std::sync::OnceLock::new();
        self.inverse_dependants
            .get(component)
            .unwrap_or_else(|| EMPTY.get_or_init(HashSet::new))
    }

    /// For each changed output port of `component`, resolve subscribers and
    /// group the resulting input deliveries by destination component.
    ///
    /// Ports absent from `changes` are not fanned out at all — this is what
    /// makes the value-equality short-circuit (§4.3) effective: a caller that
    /// omits an unchanged port from `changes` before calling `fanout` gets no
    /// delivery to that port's subscribers.
    pub fn fanout(
        &self,
        component: &ComponentId,
        changes: &Changes,
    ) -> BTreeMap<ComponentId, Delivery> {
        let mut out: BTreeMap<ComponentId, Delivery> = BTreeMap::new();
        for (port, value) in changes {
            let endpoint = Endpoint::new(component.clone(), port.clone());
            for subscriber in self.wiring.subscribers_of(&endpoint) {
                out.entry(subscriber.component.clone())
                    .or_default()
                    .insert(subscriber.port.clone(), value.clone());
            }
        }
        out
    }
}
