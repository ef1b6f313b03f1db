//! `ComponentId` and `PortId` — name-based endpoint identifiers.
//!
//! Unlike a fixed-population agent simulation, a Tickit component graph is
//! small and built once from configuration; components and ports are
//! addressed by name everywhere an external interface touches them (topic
//! names, configuration entries, diagnostics). Both wrappers hold an `Arc<str>`
//! so cloning a component/port identifier into a channel message, a wake-queue
//! entry, or a log line is a refcount bump, not an allocation.

use std::fmt;
use std::sync::Arc;

/// Generate a cheap-to-clone, string-backed identifier wrapper.
macro_rules! string_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(Arc<str>);

        impl $name {
            /// Build an identifier from any string-like value.
            pub fn new(name: impl Into<Arc<str>>) -> Self {
                Self(name.into())
            }

            /// Borrow the identifier as a plain string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Identifies a component uniquely within one simulation nesting level.
    pub struct ComponentId;
}

string_id! {
    /// Names an input or output port of one component.
    pub struct PortId;
}

/// A fully-qualified wire endpoint: one port of one component.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    pub component: ComponentId,
    pub port: PortId,
}

impl Endpoint {
    pub fn new(component: impl Into<ComponentId>, port: impl Into<PortId>) -> Self {
        Self { component: component.into(), port: port.into() }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.port)
    }
}
