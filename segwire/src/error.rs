//! Error taxonomy for the sender core.
//!
//! Every fatal condition ends the current message send and is returned
//! to the caller; nothing in this crate terminates the process.

use thiserror::Error;

/// Errors surfaced by segmentation, classification, and transmission.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying datagram channel failed to send or receive.
    #[error("transport I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A response datagram was too short to carry the classification
    /// offsets. Distinct from a malformed-but-classifiable response.
    #[error("response too short to classify: {len} bytes, need at least {min}")]
    ResponseTooShort {
        /// Length of the received datagram.
        len: usize,
        /// Minimum length required for classification.
        min: usize,
    },

    /// The logical message exceeds the protocol's maximum length.
    /// Oversized input is rejected outright, never truncated.
    #[error("message of {len} bytes exceeds the {max}-byte maximum")]
    MessageTooLong {
        /// Logical length of the offered message.
        len: usize,
        /// The protocol maximum.
        max: usize,
    },

    /// Segmentation would produce more segments than the one-byte
    /// sequence field can number.
    #[error("message would need {count} segments, sequence field allows 255")]
    TooManySegments {
        /// Number of segments the message would require.
        count: usize,
    },

    /// The resend budget for one segment ran out without an ACK.
    /// Terminal for the entire message, not just the segment.
    #[error("no ACK for segment {sequence} after {attempts} attempts")]
    RetriesExhausted {
        /// Sequence number of the undelivered segment.
        sequence: u8,
        /// Total send attempts made.
        attempts: u8,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
