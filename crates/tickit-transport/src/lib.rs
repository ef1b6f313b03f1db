//! `tickit-transport` — the state interface: the publish/subscribe transport
//! abstraction used by schedulers and components (§4.6).
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|-----------------------------------------------------------|
//! | [`interface`] | `StateInterface` trait, `Subscription`                   |
//! | [`message`]   | `BusMessage` — the `Input`/`Output`/`Shutdown` envelope   |
//! | [`in_process`]| `InProcessBus` — default, `tokio::mpsc`-backed            |
//! | `nats`        | `NatsBus` — `async-nats`-backed, behind the `nats` feature|
//! | [`topics`]    | Conventional topic-name helpers                          |
//! | [`retry`]     | Bounded exponential backoff around transport calls        |
//! | [`error`]     | `TransportError`, `TransportResult`                       |
//!
//! Both backends implement one [`StateInterface`] trait; callers (the ticker
//! and schedulers) never branch on which is in use (§4.6).

pub mod error;
pub mod in_process;
pub mod interface;
pub mod message;
pub mod retry;
pub mod topics;

#[cfg(feature = "nats")]
pub mod nats;

pub use error::{TransportError, TransportResult};
pub use in_process::InProcessBus;
pub use interface::{StateInterface, Subscription};
pub use message::BusMessage;
pub use retry::{with_backoff, RetryPolicy};

#[cfg(feature = "nats")]
pub use nats::NatsBus;
