use serde::{Deserialize, Serialize};

use crate::address::Address;

/// `TFAIL`, `TREMOVE` and `INTRODUCER` are passed into the node constructor
/// rather than compiled in, so tests (and eventually a config-file-driven
/// harness, loaded the way `executor`'s `GossipConfig`/`MembershipConfig`
/// are) can vary them.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeConfig {
    /// Ticks between self-heartbeat broadcasts.
    pub tfail: i64,
    /// Grace period, in ticks, after last-heard before a peer is evicted.
    pub tremove: i64,
    /// The well-known bootstrap address every joiner contacts first.
    pub introducer: Address,
}

impl NodeConfig {
    /// Reference tunables: `TFAIL = 5`, `TREMOVE = 20`, `INTRODUCER =
    /// (id=1, port=0)`.
    pub fn reference(introducer: Address) -> Self {
        Self {
            tfail: 5,
            tremove: 20,
            introducer,
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::reference(Address::new(1, 0))
    }
}
