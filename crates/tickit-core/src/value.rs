//! `Value` — an opaque, typed payload flowing on wires.
//!
//! # Design
//!
//! The kernel never interprets a `Value`; it only needs to clone it cheaply
//! (to hand the same value to multiple fan-out destinations) and compare two
//! values for equality (the value-equality short-circuit in §4.3). Both
//! requirements are met by type-erasing the payload behind `Arc<dyn AnyValue>`
//! and implementing equality as "same concrete type, and that type's `PartialEq`
//! agrees" — the same type-erasure idiom the teacher crate uses for its
//! per-agent component arrays (`ComponentVec`/`TypedComponentVec`), applied
//! here to a single value instead of a parallel `Vec<T>`.
//!
//! Device/system-simulation code (out of scope for the kernel, but a
//! consumer of this type) recovers the concrete type with
//! [`Value::downcast_ref`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Object-safe supertrait every `Value` payload must satisfy.
///
/// Sealed so only [`Value::new`] can produce a conforming trait object —
/// external crates build values through the constructor, not by implementing
/// this trait directly.
trait AnyValue: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn AnyValue) -> bool;
}

impl<T> AnyValue for T
where
    T: Any + Send + Sync + fmt::Debug + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn AnyValue) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self == other,
            None => false,
        }
    }
}

/// A cheaply-cloned, type-erased value carried on a wire.
///
/// Two `Value`s are equal iff they wrap the same concrete type `T` and that
/// type's `PartialEq` says the payloads are equal. Values of different
/// concrete types are always unequal, never a type error — the kernel is not
/// in the business of rejecting "apples vs. oranges" comparisons at this
/// layer (that is the router's job, via `ConfigError::TypeMismatch` at wiring
/// construction time).
#[derive(Clone)]
pub struct Value(Arc<dyn AnyValue>);

impl Value {
    /// Wrap `payload` as a new `Value`.
    pub fn new<T>(payload: T) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + PartialEq,
    {
        Value(Arc::new(payload))
    }

    /// Recover a reference to the concrete payload, or `None` if `T` is not
    /// the type this `Value` was constructed with.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// `true` if this value currently holds a payload of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Wire encoding of a `Value`, used only by the external-bus transport (§4.6).
///
/// A type-erased payload cannot be serialized generically without knowing its
/// concrete type, and cannot be deserialized into anything *but* a generic
/// representation (the receiving process is the one that knows, from its own
/// port configuration, what concrete type a `Value` is supposed to carry).
/// `serde_json::Value` is that generic representation: values crossing the
/// external bus must be constructed with [`Value::new`] over a
/// `serde_json::Value` payload (device code talking to a remote component
/// does so naturally, since it is speaking JSON on the wire either way);
/// in-process-only values built over native Rust types never need this impl.
#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error;
        match self.downcast_ref::<serde_json::Value>() {
            Some(json) => json.serialize(serializer),
            None => Err(S::Error::custom(
                "Value does not hold a serde_json::Value payload; values crossing the \
                 external bus must be constructed from JSON (see tickit_core::Value docs)",
            )),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::new)
    }
}
