//! The membership state machine: join procedure, heartbeat gossip,
//! membership-list maintenance, and timeout-based failure detection.

use std::collections::VecDeque;

use log::{debug, trace, warn};

use crate::{
    address::Address,
    config::NodeConfig,
    error::NodeError,
    event::{EventSink, Network},
    failure,
    table::MemberTable,
    wire::{Frame, JoinRepEntry},
};

/// `UNINITIALIZED -> JOINING -> IN_GROUP -> TORN_DOWN`.
/// `failed` is tracked separately: it's an orthogonal latch, not a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Joining,
    InGroup,
    TornDown,
}

/// A single process's view of the cluster. Owns its table, inbox, and
/// counters exclusively; the only things it shares with the outside world
/// are the injected [`Network`] and [`EventSink`].
pub struct MembershipNode {
    config: NodeConfig,
    addr: Address,
    phase: Phase,
    failed: bool,
    heartbeat: i64,
    timeout_counter: i64,
    ping_counter: i64,
    table: MemberTable,
    inbox: VecDeque<Vec<u8>>,
    network: Box<dyn Network>,
    events: Box<dyn EventSink>,
}

impl MembershipNode {
    pub fn new(
        config: NodeConfig,
        addr: Address,
        network: Box<dyn Network>,
        events: Box<dyn EventSink>,
    ) -> Self {
        Self {
            ping_counter: config.tfail,
            config,
            addr,
            phase: Phase::Uninitialized,
            failed: false,
            heartbeat: 0,
            timeout_counter: -1,
            table: MemberTable::new(),
            inbox: VecDeque::new(),
            network,
            events,
        }
    }

    pub fn addr(&self) -> Address {
        self.addr
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn in_group(&self) -> bool {
        self.phase == Phase::InGroup
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn heartbeat(&self) -> i64 {
        self.heartbeat
    }

    pub fn timeout_counter(&self) -> i64 {
        self.timeout_counter
    }

    pub fn table(&self) -> &MemberTable {
        &self.table
    }

    /// Marks the node as crashed. `tick` becomes a no-op until a fresh
    /// `start`; this is a test/harness hook for scenario 4 (silent
    /// failure), not part of the wire protocol.
    pub fn set_failed(&mut self, failed: bool) {
        self.failed = failed;
    }

    /// Initializes state and either bootstraps alone (if this node *is*
    /// the introducer) or sends a JOINREQ to it.
    pub fn start(&mut self) -> Result<(), NodeError> {
        self.reset_counters();

        if self.addr == self.config.introducer {
            debug!("{}: bootstrapping as introducer", self.addr);
            self.phase = Phase::InGroup;
        } else {
            debug!("{}: joining via introducer {}", self.addr, self.config.introducer);
            self.phase = Phase::Joining;
            let frame = Frame::JoinReq {
                sender: self.addr,
                heartbeat: self.heartbeat,
            }
            .encode();
            self.network.send(self.addr, self.config.introducer, frame);
        }

        Ok(())
    }

    /// Tears the node down. Idempotent: calling it again just resets the
    /// same fields a second time.
    pub fn finish_up(&mut self) {
        self.reset_counters();
        self.phase = Phase::TornDown;
    }

    /// Pushes a raw frame into the inbox. Called by the network callback;
    /// never blocks, never inspects the frame.
    pub fn deliver(&mut self, frame: Vec<u8>) {
        self.inbox.push_back(frame);
    }

    /// Runs one logical period: a no-op if `failed`, otherwise drains the
    /// inbox and then, only if in-group, runs the periodic loop.
    pub fn tick(&mut self) {
        if self.failed {
            return;
        }

        self.process_inbox();

        if self.phase == Phase::InGroup {
            self.loop_ops();
        }
    }

    fn reset_counters(&mut self) {
        self.heartbeat = 0;
        self.timeout_counter = -1;
        self.ping_counter = self.config.tfail;
        self.table = MemberTable::new();
        self.inbox.clear();
    }

    fn process_inbox(&mut self) {
        while let Some(bytes) = self.inbox.pop_front() {
            match Frame::decode(&bytes) {
                Ok(frame) => self.handle_frame(frame),
                Err(e) => warn!("{}: dropping malformed frame: {e}", self.addr),
            }
        }
    }

    fn handle_frame(&mut self, frame: Frame) {
        match frame {
            Frame::JoinReq { sender, heartbeat } => self.handle_joinreq(sender, heartbeat),
            Frame::JoinRep { entries } => self.handle_joinrep(entries),
            Frame::Heartbeat { sender, heartbeat } => self.handle_heartbeat(sender, heartbeat),
        }
    }

    fn handle_joinreq(&mut self, sender: Address, heartbeat: i64) {
        trace!("{}: JOINREQ from {sender}", self.addr);
        self.insert_peer(sender, heartbeat);

        let entries = self
            .table
            .iter()
            .map(|e| JoinRepEntry {
                id: e.id,
                port: e.port,
                heartbeat: e.heartbeat,
                timestamp: e.timestamp,
            })
            .collect();

        let frame = Frame::JoinRep { entries }.encode();
        self.network.send(self.addr, sender, frame);
    }

    fn handle_joinrep(&mut self, entries: Vec<JoinRepEntry>) {
        trace!("{}: JOINREP with {} entries", self.addr, entries.len());
        self.phase = Phase::InGroup;

        for e in entries {
            if e.id == self.addr.id {
                // Defensive against a malformed introducer.
                continue;
            }
            if self.table.insert(e.id, e.port, e.heartbeat, e.timestamp) {
                self.events
                    .node_added(self.addr, Address::new(e.id, e.port));
            }
        }
    }

    fn handle_heartbeat(&mut self, sender: Address, heartbeat: i64) {
        match self.table.get(sender.id) {
            Some(existing) => {
                // max-wins: never rewind a stored heartbeat.
                if heartbeat > existing.heartbeat {
                    self.table.update(sender.id, heartbeat, self.timeout_counter);
                }
            }
            None => self.insert_peer(sender, heartbeat),
        }
    }

    fn insert_peer(&mut self, sender: Address, heartbeat: i64) {
        if self
            .table
            .insert(sender.id, sender.port, heartbeat, self.timeout_counter)
        {
            self.events.node_added(self.addr, sender);
        }
    }

    fn loop_ops(&mut self) {
        if self.ping_counter == 0 {
            self.heartbeat += 1;
            let frame = Frame::Heartbeat {
                sender: self.addr,
                heartbeat: self.heartbeat,
            }
            .encode();

            let peers: Vec<Address> = self
                .table
                .iter()
                .map(|e| e.address())
                .filter(|a| *a != self.addr)
                .collect();
            for peer in peers {
                self.network.send(self.addr, peer, frame.clone());
            }

            self.ping_counter = self.config.tfail;
        } else {
            self.ping_counter -= 1;
        }

        let evicted = failure::evict_expired(&mut self.table, self.timeout_counter, self.config.tremove);
        for entry in evicted {
            debug!("{}: evicting {}", self.addr, entry.address());
            self.events.node_removed(self.addr, entry.address());
        }

        self.timeout_counter += 1;
    }
}
