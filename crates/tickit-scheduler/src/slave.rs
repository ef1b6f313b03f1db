//! `SlaveScheduler` — the inner scheduler of a system-simulation component
//! (§4.5): from outside it looks like a single component; inside it runs its
//! own ticker over its own sub-graph, bridged through two synthetic
//! components.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tickit_core::{Changes, ComponentId, Input, Output, SimTime};
use tickit_router::{EventRouter, WiringEntry};
use tickit_ticker::{ComponentLinks, InputsBuffer, Ticker};
use tickit_transport::{topics, BusMessage, StateInterface};

use crate::config::ExposeMap;
use crate::error::SchedulerResult;
use crate::wake_queue::WakeQueue;

/// Fixed id of the synthetic component whose outputs mirror the system
/// component's input ports (§4.5 step 2). Inner wiring configured for a
/// system simulation wires consumers directly to this id.
pub fn boundary_in_id() -> ComponentId {
    ComponentId::new("boundary_in")
}

/// Fixed id of the synthetic component whose inputs mirror the system
/// component's exposed output ports (§4.5 step 4).
pub fn boundary_out_id() -> ComponentId {
    ComponentId::new("boundary_out")
}

/// An inner scheduler embedded inside a system-simulation component.
pub struct SlaveScheduler {
    router: EventRouter,
    wake_queue: WakeQueue,
    inputs: InputsBuffer,
    ticker: Ticker,
    expose_map: ExposeMap,
    boundary_in: ComponentId,
    boundary_out: ComponentId,
    pending_boundary_changes: Arc<Mutex<Changes>>,
    now: SimTime,
}

impl SlaveScheduler {
    /// Build a slave over `known_components` plus the two boundary
    /// components, validate `wiring` (expected to reference
    /// [`boundary_in_id`]/[`boundary_out_id`] directly, per the inner
    /// configuration's own convention), and spawn the boundary components'
    /// trivial echo tasks against `transport` (which may be a different
    /// [`StateInterface`] instance than the enclosing scheduler's, §4.6).
    pub async fn build(
        known_components: HashSet<ComponentId>,
        wiring: &[WiringEntry],
        expose_map: ExposeMap,
        transport: Arc<dyn StateInterface>,
        tick_timeout: Duration,
    ) -> SchedulerResult<Self> {
        let boundary_in = boundary_in_id();
        let boundary_out = boundary_out_id();

        let mut known = known_components;
        known.insert(boundary_in.clone());
        known.insert(boundary_out.clone());

        let router = EventRouter::build(wiring, &known)?;

        let pending_boundary_changes = Arc::new(Mutex::new(Changes::new()));
        spawn_boundary_in_echo(transport.clone(), boundary_in.clone(), pending_boundary_changes.clone())
            .await?;
        spawn_boundary_out_echo(transport.clone(), boundary_out.clone()).await?;

        let mut inputs = InputsBuffer::new();
        inputs.insert(boundary_out.clone(), Default::default());

        Ok(Self {
            router,
            wake_queue: WakeQueue::new(),
            inputs,
            ticker: Ticker::new(tick_timeout),
            expose_map,
            boundary_in,
            boundary_out,
            pending_boundary_changes,
            now: SimTime::ZERO,
        })
    }

    /// Handle one Input at the parent's boundary (§4.5 steps 1-4): set `now`,
    /// deliver the system's changed input ports onto the boundary-in
    /// component, run one internal tick over the boundary-in plus anything
    /// due internally at this time, and return the collected boundary-out
    /// state as this slave's Output — including the earliest internal wake
    /// request, if any, so the parent only ever needs to know "call again at
    /// t'" without re-deriving which children are due (§4.5 "Wake propagation").
    pub async fn handle_input(
        &mut self,
        input: Input,
        links: &ComponentLinks,
    ) -> SchedulerResult<Output> {
        self.now = input.time;

        let mut boundary_changes = Changes::new();
        for port in &input.changes {
            if let (Some(internal_port), Some(value)) =
                (self.expose_map.inputs.get(port), input.inputs.get(port))
            {
                boundary_changes.insert(internal_port.clone(), value.clone());
            }
        }
        *self.pending_boundary_changes.lock().unwrap() = boundary_changes;

        let mut wake_set: HashSet<ComponentId> = HashSet::new();
        wake_set.insert(self.boundary_in.clone());
        while matches!(self.wake_queue.peek_next_time(), Some(t) if t == self.now) {
            if let Some((_, due)) = self.wake_queue.pop_due_earliest() {
                wake_set.extend(due);
            }
        }

        let outcome =
            self.ticker.run_tick(&self.router, wake_set, self.now, &mut self.inputs, links).await?;
        for (component, call_at) in outcome.wake_requests {
            self.wake_queue.push(component, call_at);
        }

        let boundary_out_inputs = self.inputs.entry(self.boundary_out.clone()).or_default();
        let mut changes = Changes::new();
        for (system_port, internal_port) in &self.expose_map.outputs {
            if let Some(value) = boundary_out_inputs.get(internal_port) {
                changes.insert(system_port.clone(), value.clone());
            }
        }

        Ok(Output { time: self.now, changes, call_at: self.wake_queue.peek_next_time() })
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }
}

/// boundary-in has no real device logic: whenever it is sent an Input, it
/// immediately replies with whatever changes [`SlaveScheduler::handle_input`]
/// staged for this tick, taking the role of the "outputs correspond to the
/// system's input ports" synthetic component (§4.5).
async fn spawn_boundary_in_echo(
    transport: Arc<dyn StateInterface>,
    boundary_in: ComponentId,
    pending: Arc<Mutex<Changes>>,
) -> SchedulerResult<()> {
    let mut sub = transport.subscribe(&topics::input_topic(&boundary_in)).await?;
    let out_topic = topics::output_topic(&boundary_in);
    tokio::spawn(async move {
        while let Some(BusMessage::Input(input)) = sub.recv().await {
            let changes = std::mem::take(&mut *pending.lock().unwrap());
            let output = Output { time: input.time, changes, call_at: None };
            if transport.publish(&out_topic, BusMessage::Output(output)).await.is_err() {
                break;
            }
        }
    });
    Ok(())
}

/// boundary-out has no device logic either: it only ever needs to
/// acknowledge an Input with an empty Output, since its persisted inputs
/// buffer — not its reply — is what [`SlaveScheduler::handle_input`] reads
/// to assemble the exposed outputs (§4.5 step 4).
async fn spawn_boundary_out_echo(
    transport: Arc<dyn StateInterface>,
    boundary_out: ComponentId,
) -> SchedulerResult<()> {
    let mut sub = transport.subscribe(&topics::input_topic(&boundary_out)).await?;
    let out_topic = topics::output_topic(&boundary_out);
    tokio::spawn(async move {
        while let Some(BusMessage::Input(input)) = sub.recv().await {
            let output = Output::empty(input.time);
            if transport.publish(&out_topic, BusMessage::Output(output)).await.is_err() {
                break;
            }
        }
    });
    Ok(())
}
