//! The set of known peers and their last-heard metadata.

use crate::address::Address;

/// `(id, port, heartbeat, timestamp)`. `heartbeat` is the highest heartbeat
/// counter ever reported by this peer; `timestamp` is the local
/// `timeout_counter` value at which that heartbeat was observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberEntry {
    pub id: u32,
    pub port: u16,
    pub heartbeat: i64,
    pub timestamp: i64,
}

impl MemberEntry {
    pub fn address(&self) -> Address {
        Address::new(self.id, self.port)
    }
}

/// A sequence of [`MemberEntry`] with `id` unique across the table.
/// Iteration order is stable between mutations, so traversal-with-erase
/// elsewhere in the crate is well-defined.
#[derive(Default, Clone, Debug)]
pub struct MemberTable {
    entries: Vec<MemberEntry>,
}

impl MemberTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: u32) -> Option<&MemberEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// No-op if `id` is already present; otherwise appends a new entry.
    pub fn insert(&mut self, id: u32, port: u16, heartbeat: i64, timestamp: i64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.entries.push(MemberEntry {
            id,
            port,
            heartbeat,
            timestamp,
        });
        true
    }

    /// Sets `heartbeat`/`timestamp` on the existing entry with this id.
    /// No-op if absent.
    pub fn update(&mut self, id: u32, heartbeat: i64, timestamp: i64) {
        if let Some(e) = self.entries.iter_mut().find(|e| e.id == id) {
            e.heartbeat = heartbeat;
            e.timestamp = timestamp;
        }
    }

    /// Removes the entry with the given id. No-op if absent.
    pub fn evict(&mut self, id: u32) -> Option<MemberEntry> {
        let idx = self.index_of(id)?;
        Some(self.entries.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
