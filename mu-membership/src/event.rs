//! The two external collaborator seams a [`crate::MembershipNode`] is
//! driven through besides `tick`/`deliver`: outbound network traffic and
//! the harness's structured event log.
//!
//! Both are injected as trait objects at construction time, the same
//! pattern this codebase uses at its other collaborator boundaries
//! (`Box<dyn DbClient>`, `Box<dyn Membership>`, `Box<dyn Gossip>`).

use crate::address::Address;

/// The emulated network's `send` half. `recv`/the tick loop are out of
/// scope for the core and live entirely in the harness.
pub trait Network {
    fn send(&mut self, from: Address, to: Address, frame: Vec<u8>);
}

/// The harness's structured event sink. The core calls these on every
/// insert/evict transition in its member table; it never maintains its
/// own event log.
pub trait EventSink {
    fn node_added(&mut self, observer: Address, added: Address);
    fn node_removed(&mut self, observer: Address, removed: Address);
}

/// An [`EventSink`] that discards everything, for tests and contexts that
/// don't care about the structured log.
#[derive(Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn node_added(&mut self, _observer: Address, _added: Address) {}
    fn node_removed(&mut self, _observer: Address, _removed: Address) {}
}
