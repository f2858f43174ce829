use thiserror::Error;

/// Raised by the wire codec; always handled locally by dropping the
/// offending frame, never surfaced out of [`crate::MembershipNode`].
#[derive(Debug, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("frame shorter than tag + declared payload (need {need}, have {have})")]
    MalformedFrame { need: usize, have: usize },

    #[error("unknown message tag {0}")]
    UnknownTag(u8),
}

/// Reserved for unrecoverable startup errors. The reference design never
/// raises this; it exists so the public API has somewhere to put one.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node failed to initialize")]
    Init,
}

pub type WireResult<T> = std::result::Result<T, WireError>;
