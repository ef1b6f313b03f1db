//! `SystemSimulation` — wraps a [`SlaveScheduler`] so a nested system
//! component can be driven by a [`crate::DeviceSimulation`] runtime loop
//! exactly like a plain device (§4.5 "from outside a system-simulation
//! component looks like any other component"; §9 "slaves may themselves
//! contain slaves recursively, the protocol is identical at every level").

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tickit_core::{ComponentId, Input, Output};
use tickit_router::WiringEntry;
use tickit_scheduler::{ExposeMap, SlaveScheduler};
use tickit_ticker::ComponentLinks;
use tickit_transport::StateInterface;

use crate::component::Component;
use crate::error::ComponentResult;

/// A system-simulation component: an inner [`SlaveScheduler`] plus the
/// [`ComponentLinks`] it needs to drive its own sub-graph, bundled behind
/// the same [`Component`] capability a plain device implements.
pub struct SystemSimulation {
    id: ComponentId,
    slave: SlaveScheduler,
    links: ComponentLinks,
}

impl SystemSimulation {
    /// Build the inner scheduler over `known_components` (not including the
    /// boundary components — [`SlaveScheduler::build`] adds those) and wire
    /// up its own [`ComponentLinks`] over the resulting router order, so that
    /// [`Component::handle_input`] never needs the caller to supply one.
    ///
    /// `transport` may be the same [`StateInterface`] the enclosing scheduler
    /// uses, or a different instance entirely (§4.6) — nothing here assumes
    /// either way.
    pub async fn build(
        id: impl Into<ComponentId>,
        known_components: HashSet<ComponentId>,
        wiring: &[WiringEntry],
        expose_map: ExposeMap,
        transport: Arc<dyn StateInterface>,
        tick_timeout: Duration,
    ) -> ComponentResult<Self> {
        let slave =
            SlaveScheduler::build(known_components, wiring, expose_map, transport.clone(), tick_timeout)
                .await?;
        let links = ComponentLinks::build(transport, slave.router().order().iter().cloned()).await?;
        Ok(Self { id: id.into(), slave, links })
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }
}

#[async_trait]
impl Component for SystemSimulation {
    /// Delegates straight to [`SlaveScheduler::handle_input`] against the
    /// links built at construction time (§4.5 steps 1-4).
    async fn handle_input(&mut self, input: Input) -> ComponentResult<Output> {
        Ok(self.slave.handle_input(input, &self.links).await?)
    }
}
