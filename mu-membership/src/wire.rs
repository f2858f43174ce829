//! Framing of the three wire messages into/out of byte buffers.
//!
//! Each frame is a 1-byte tag followed by a fixed-shape payload. All
//! multi-byte integers are little-endian; a single encode/decode pair
//! keeps sender and receiver permanently in agreement on the layout.

use crate::{address::Address, error::WireError};

const TAG_JOINREQ: u8 = 0;
const TAG_JOINREP: u8 = 1;
const TAG_HEARTBEAT: u8 = 2;

/// `sender addr (6) ‖ sender heartbeat (8) ‖ pad (1)`, shared by JOINREQ
/// and HEARTBEAT.
const HELLO_PAYLOAD_LEN: usize = 6 + 8 + 1;

/// `id (4) ‖ port (2) ‖ heartbeat (8) ‖ timestamp (8)`.
const JOINREP_ENTRY_LEN: usize = 4 + 2 + 8 + 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinRepEntry {
    pub id: u32,
    pub port: u16,
    pub heartbeat: i64,
    pub timestamp: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    JoinReq { sender: Address, heartbeat: i64 },
    JoinRep { entries: Vec<JoinRepEntry> },
    Heartbeat { sender: Address, heartbeat: i64 },
}

impl Frame {
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Frame::JoinReq { sender, heartbeat } => {
                encode_hello(TAG_JOINREQ, sender, *heartbeat)
            }
            Frame::Heartbeat { sender, heartbeat } => {
                encode_hello(TAG_HEARTBEAT, sender, *heartbeat)
            }
            Frame::JoinRep { entries } => {
                let mut buf = Vec::with_capacity(1 + 4 + entries.len() * JOINREP_ENTRY_LEN);
                buf.push(TAG_JOINREP);
                buf.extend_from_slice(&(entries.len() as u32).to_le_bytes());
                for e in entries {
                    buf.extend_from_slice(&e.id.to_le_bytes());
                    buf.extend_from_slice(&e.port.to_le_bytes());
                    buf.extend_from_slice(&e.heartbeat.to_le_bytes());
                    buf.extend_from_slice(&e.timestamp.to_le_bytes());
                }
                buf
            }
        }
    }

    pub fn decode(buf: &[u8]) -> Result<Self, WireError> {
        let tag = *buf.first().ok_or(WireError::MalformedFrame {
            need: 1,
            have: buf.len(),
        })?;
        let payload = &buf[1..];

        match tag {
            TAG_JOINREQ | TAG_HEARTBEAT => {
                let (sender, heartbeat) = decode_hello(payload)?;
                Ok(if tag == TAG_JOINREQ {
                    Frame::JoinReq { sender, heartbeat }
                } else {
                    Frame::Heartbeat { sender, heartbeat }
                })
            }

            TAG_JOINREP => {
                if payload.len() < 4 {
                    return Err(WireError::MalformedFrame {
                        need: 1 + 4,
                        have: buf.len(),
                    });
                }
                let count = u32::from_le_bytes(payload[0..4].try_into().unwrap()) as usize;
                let need = 1 + 4 + count * JOINREP_ENTRY_LEN;
                if buf.len() < need {
                    return Err(WireError::MalformedFrame {
                        need,
                        have: buf.len(),
                    });
                }

                let mut entries = Vec::with_capacity(count);
                let mut rest = &payload[4..];
                for _ in 0..count {
                    let id = u32::from_le_bytes(rest[0..4].try_into().unwrap());
                    let port = u16::from_le_bytes(rest[4..6].try_into().unwrap());
                    let heartbeat = i64::from_le_bytes(rest[6..14].try_into().unwrap());
                    let timestamp = i64::from_le_bytes(rest[14..22].try_into().unwrap());
                    entries.push(JoinRepEntry {
                        id,
                        port,
                        heartbeat,
                        timestamp,
                    });
                    rest = &rest[JOINREP_ENTRY_LEN..];
                }

                Ok(Frame::JoinRep { entries })
            }

            other => Err(WireError::UnknownTag(other)),
        }
    }
}

fn encode_hello(tag: u8, sender: &Address, heartbeat: i64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + HELLO_PAYLOAD_LEN);
    buf.push(tag);
    buf.extend_from_slice(&sender.encode());
    buf.extend_from_slice(&heartbeat.to_le_bytes());
    buf.push(0); // trailing pad byte, preserved for buffer-length compatibility
    buf
}

fn decode_hello(payload: &[u8]) -> Result<(Address, i64), WireError> {
    if payload.len() < HELLO_PAYLOAD_LEN {
        return Err(WireError::MalformedFrame {
            need: 1 + HELLO_PAYLOAD_LEN,
            have: 1 + payload.len(),
        });
    }
    let addr_bytes: [u8; 6] = payload[0..6].try_into().unwrap();
    let sender = Address::decode(&addr_bytes);
    let heartbeat = i64::from_le_bytes(payload[6..14].try_into().unwrap());
    Ok((sender, heartbeat))
}
