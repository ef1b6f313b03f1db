//! `Ticker` — the per-tick propagation engine (§4.3).

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

use tickit_core::{ComponentId, Input, PortId, SimTime, Value};
use tickit_router::{Delivery, EventRouter};

use crate::error::{TickerError, TickerResult};
use crate::links::ComponentLinks;

/// Default per-tick timeout: generous enough for a pure computation,
/// overridable per scheduler instance (§4.3 ADDED).
pub const DEFAULT_TICK_TIMEOUT: Duration = Duration::from_secs(5);

/// Persistent per-component input buffer — `PortId -> Value`, surviving
/// across ticks (§3 "Inputs buffer").
pub type InputsBuffer = HashMap<ComponentId, Delivery>;

/// What a completed tick produced beyond the side effects already applied to
/// the inputs buffer: every `call_at` request raised by a component this
/// tick, for the scheduler to fold into its wake queue.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickOutcome {
    pub wake_requests: Vec<(ComponentId, SimTime)>,
}

/// Executes one simulated instant over a fixed [`EventRouter`] (§4.3).
pub struct Ticker {
    timeout: Duration,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_TIMEOUT)
    }
}

impl Ticker {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run one tick: visit `router`'s topological order, sending exactly one
    /// Input and awaiting exactly one Output for every component in the
    /// reachable closure of `wake` (§4.3 algorithm, steps 1-6).
    pub async fn run_tick(
        &self,
        router: &EventRouter,
        wake: HashSet<ComponentId>,
        now: SimTime,
        inputs: &mut InputsBuffer,
        links: &ComponentLinks,
    ) -> TickerResult<TickOutcome> {
        let order = router.order();

        // R₀ = wake; grows as outputs fan out to new consumers (step 1).
        let mut reachable: HashSet<ComponentId> = wake;
        // Deliveries accumulated for a component not yet visited this tick.
        let mut pending: HashMap<ComponentId, Delivery> = HashMap::new();
        let mut wake_requests = Vec::new();

        for (idx, component) in order.iter().enumerate() {
            if !reachable.contains(component) {
                continue;
            }

            let delivery = pending.remove(component).unwrap_or_default();
            let changed_ports: BTreeSet<PortId> = delivery.keys().cloned().collect();

            let buffer = inputs.entry(component.clone()).or_default();
            for (port, value) in &delivery {
                buffer.insert(port.clone(), value.clone());
            }
            let input = Input { time: now, inputs: buffer.clone(), changes: changed_ports };

            links.send_input(component, input).await?;
            let output = links.recv_output(component, self.timeout).await?;

            if output.time != now {
                return Err(TickerError::Ordering(format!(
                    "component {component} replied with time {} for a tick at {now}",
                    output.time
                )));
            }

            if let Some(call_at) = output.call_at {
                if call_at < now {
                    return Err(TickerError::Ordering(format!(
                        "component {component} requested call_at {call_at} before now {now}"
                    )));
                }
                wake_requests.push((component.clone(), call_at));
            }

            if output.changes.is_empty() {
                continue;
            }

            for (dest, delivery_for_dest) in router.fanout(component, &output.changes) {
                let persisted = inputs.entry(dest.clone()).or_default();

                // Value-equality short-circuit (§4.3 tie-breaks): drop ports
                // whose new value already matches what's persisted.
                let effective: Delivery = delivery_for_dest
                    .into_iter()
                    .filter(|(port, value)| persisted.get(port) != Some(value))
                    .collect();
                if effective.is_empty() {
                    continue;
                }

                let dest_pos = router
                    .position(&dest)
                    .expect("fanout only names components declared to the router");
                if dest_pos <= idx {
                    return Err(TickerError::Ordering(format!(
                        "component {dest} would need a second delivery this tick after its \
                         topological position ({dest_pos}) was already visited (producer {component} at {idx})"
                    )));
                }
                reachable.insert(dest.clone());
                pending.entry(dest).or_default().extend(effective);
            }
        }

        Ok(TickOutcome { wake_requests })
    }
}
