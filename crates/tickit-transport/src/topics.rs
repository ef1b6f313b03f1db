//! Conventional topic names for the external-bus variant (§6).

use tickit_core::ComponentId;

/// `tickit-<component>-in` — the topic a scheduler publishes `Input` to.
pub fn input_topic(component: &ComponentId) -> String {
    format!("tickit-{}-in", component.as_str())
}

/// `tickit-<component>-out` — the topic a component publishes `Output` to.
pub fn output_topic(component: &ComponentId) -> String {
    format!("tickit-{}-out", component.as_str())
}

/// `tickit-control` — shutdown and other control-plane broadcasts.
pub const CONTROL_TOPIC: &str = "tickit-control";
