use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A 6-byte opaque peer identifier: `(id, port)` little-endian on the wire.
///
/// Two addresses are equal iff their 6 bytes are equal.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    pub id: u32,
    pub port: u16,
}

impl Address {
    pub const NULL: Address = Address { id: 0, port: 0 };

    pub const fn new(id: u32, port: u16) -> Self {
        Self { id, port }
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Encodes as the little-endian concatenation `id (4) ‖ port (2)`.
    pub fn encode(&self) -> [u8; 6] {
        let mut buf = [0u8; 6];
        buf[0..4].copy_from_slice(&self.id.to_le_bytes());
        buf[4..6].copy_from_slice(&self.port.to_le_bytes());
        buf
    }

    pub fn decode(buf: &[u8; 6]) -> Self {
        let id = u32::from_le_bytes(buf[0..4].try_into().unwrap());
        let port = u16::from_le_bytes(buf[4..6].try_into().unwrap());
        Self { id, port }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id, self.port)
    }
}
