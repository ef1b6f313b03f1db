//! Integration tests for the two [`crate::Component`] adapters, over the
//! in-process [`InProcessBus`] only.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use tickit_core::{Changes, ComponentId, Input, Output, PortId, SimTime, Value};
use tickit_router::WiringEntry;
use tickit_scheduler::ExposeMap;
use tickit_transport::{topics, BusMessage, InProcessBus, StateInterface};
use tokio::sync::watch;

use crate::component::Component;
use crate::device::DeviceSimulation;
use crate::error::ComponentResult;
use crate::system::SystemSimulation;

/// A component that echoes whatever arrives on `in` straight to `out`,
/// requesting no further wake-up of its own.
struct Echo;

#[async_trait]
impl Component for Echo {
    async fn handle_input(&mut self, input: Input) -> ComponentResult<Output> {
        let mut changes = Changes::new();
        if let Some(v) = input.inputs.get(&PortId::new("in")) {
            changes.insert(PortId::new("out"), v.clone());
        }
        Ok(Output { time: input.time, changes, call_at: None })
    }
}

#[tokio::test]
async fn device_simulation_runs_one_component_against_the_bus() {
    let transport: std::sync::Arc<dyn StateInterface> = std::sync::Arc::new(InProcessBus::new());
    let id = ComponentId::new("Echo");
    let device = DeviceSimulation::new(id.clone(), Echo);
    assert_eq!(device.id(), &id);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = tokio::spawn(device.run(transport.clone(), shutdown_rx));

    let mut out_sub = transport.subscribe(&topics::output_topic(&id)).await.unwrap();

    let mut inputs = std::collections::BTreeMap::new();
    inputs.insert(PortId::new("in"), Value::new(5i64));
    let input = Input {
        time: SimTime::ZERO,
        inputs,
        changes: BTreeSet::from([PortId::new("in")]),
    };
    transport.publish(&topics::input_topic(&id), BusMessage::Input(input)).await.unwrap();

    let BusMessage::Output(output) = out_sub.recv().await.unwrap() else {
        panic!("expected an Output message");
    };
    assert_eq!(output.changes[&PortId::new("out")], Value::new(5i64));

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn system_simulation_drives_its_inner_graph_in_one_call() {
    let transport: std::sync::Arc<dyn StateInterface> = std::sync::Arc::new(InProcessBus::new());

    let x = ComponentId::new("X");
    let y = ComponentId::new("Y");
    for id in [x.clone(), y.clone()] {
        let mut sub = transport.subscribe(&topics::input_topic(&id)).await.unwrap();
        let out_topic = topics::output_topic(&id);
        let transport = transport.clone();
        tokio::spawn(async move {
            while let Some(BusMessage::Input(input)) = sub.recv().await {
                let mut changes = Changes::new();
                if let Some(v) = input.inputs.get(&PortId::new("in")) {
                    changes.insert(PortId::new("out"), v.clone());
                }
                let output = Output { time: input.time, changes, call_at: None };
                if transport.publish(&out_topic, BusMessage::Output(output)).await.is_err() {
                    break;
                }
            }
        });
    }

    let known: HashSet<ComponentId> = [x.clone(), y.clone()].into_iter().collect();
    let wiring = vec![
        WiringEntry::new(tickit_scheduler::boundary_in_id(), "exposed_in", "X", "in"),
        WiringEntry::new("X", "out", "Y", "in"),
        WiringEntry::new("Y", "out", tickit_scheduler::boundary_out_id(), "exposed_out"),
    ];
    let mut expose_map = ExposeMap::default();
    expose_map.inputs.insert(PortId::new("sys_in"), PortId::new("exposed_in"));
    expose_map.outputs.insert(PortId::new("sys_out"), PortId::new("exposed_out"));

    let mut system = SystemSimulation::build(
        "Nested",
        known,
        &wiring,
        expose_map,
        transport.clone(),
        Duration::from_secs(2),
    )
    .await
    .unwrap();
    assert_eq!(system.id(), &ComponentId::new("Nested"));

    let mut inputs = std::collections::BTreeMap::new();
    inputs.insert(PortId::new("sys_in"), Value::new(9i64));
    let input = Input {
        time: SimTime::ZERO.offset(3),
        inputs,
        changes: BTreeSet::from([PortId::new("sys_in")]),
    };

    let output = system.handle_input(input).await.unwrap();

    assert_eq!(output.time, SimTime::ZERO.offset(3));
    assert_eq!(output.changes[&PortId::new("sys_out")], Value::new(9i64));
}
