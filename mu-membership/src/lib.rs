//! Gossip-style membership protocol core.
//!
//! Each process periodically reports itself alive to every known peer and
//! infers peer liveness from the recency of those reports, tolerating
//! message loss and arbitrary node crashes without a central registry
//! beyond a single well-known introducer.
//!
//! This crate is the *core* only: the network emulator, the tick/clock
//! driver, and the event-log scoring harness are external collaborators,
//! reached exclusively through the [`Network`] and [`EventSink`] traits.

pub mod address;
pub mod config;
pub mod error;
pub mod event;
pub mod failure;
pub mod node;
pub mod table;
pub mod wire;

pub use address::Address;
pub use config::NodeConfig;
pub use error::{NodeError, WireError};
pub use event::{EventSink, Network, NullEventSink};
pub use node::{MembershipNode, Phase};
pub use table::{MemberEntry, MemberTable};
pub use wire::{Frame, JoinRepEntry};
