//! Topological ordering of the component-level dependency DAG (§4.2, invariant 5).

use std::collections::{HashMap, HashSet, VecDeque};

use tickit_core::ComponentId;

use crate::error::{ConfigError, ConfigResult};

/// Compute a total order over `components` consistent with the dependency
/// edges `(producer, consumer)`, using Kahn's algorithm — the same
/// queue-draining style of incremental graph processing the teacher crate
/// favors elsewhere (its wake queue drains exactly the due bucket each tick
/// rather than rescanning everything).
///
/// On success, every producer precedes every one of its consumers in the
/// returned order. On a cycle, returns [`ConfigError::Cycle`] naming the
/// components that could not be ordered (the strongly-connected remainder).
pub fn topological_order(
    components: &HashSet<ComponentId>,
    edges: &HashSet<(ComponentId, ComponentId)>,
) -> ConfigResult<Vec<ComponentId>> {
    let mut in_degree: HashMap<ComponentId, usize> =
        components.iter().map(|c| (c.clone(), 0)).collect();
    let mut adjacency: HashMap<ComponentId, Vec<ComponentId>> = HashMap::new();

    for (producer, consumer) in edges {
        adjacency.entry(producer.clone()).or_default().push(consumer.clone());
        *in_degree.entry(consumer.clone()).or_insert(0) += 1;
    }

    // Ready queue seeded with all zero-in-degree components, in a stable
    // order (sorted) so the resulting total order is deterministic given the
    // same component set and edges.
    let mut ready: VecDeque<ComponentId> = {
        let mut zero: Vec<ComponentId> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(c, _)| c.clone())
            .collect();
        zero.sort();
        zero.into_iter().collect()
    };

    let mut order = Vec::with_capacity(components.len());
    while let Some(c) = ready.pop_front() {
        order.push(c.clone());
        if let Some(consumers) = adjacency.get(&c) {
            let mut newly_ready = Vec::new();
            for consumer in consumers {
                let deg = in_degree.get_mut(consumer).expect("consumer declared");
                *deg -= 1;
                if *deg == 0 {
                    newly_ready.push(consumer.clone());
                }
            }
            newly_ready.sort();
            for c in newly_ready {
                ready.push_back(c);
            }
        }
    }

    if order.len() != components.len() {
        let mut remaining: Vec<ComponentId> = components
            .iter()
            .filter(|c| !order.contains(c))
            .cloned()
            .collect();
        remaining.sort();
        return Err(ConfigError::Cycle(remaining));
    }

    Ok(order)
}
