//! Frame definition, encoding, and response classification.
//!
//! A frame is the unit of transmission: one segment of the message
//! wrapped in the fixed binary envelope the peer expects.
//!
//! # Frame Format
//!
//! ```text
//! Offset  Field                    Width
//! ------  -----------------------  -----
//! 0       start marker (0xFF)      1
//! 1       client identifier        1
//! 2       packet type (DATA)       1
//! 3       sequence number          1     1-based
//! 4       declared payload length  1     <= MAX_PAYLOAD_LEN
//! 5..260  payload slot             255   zero-padded past declared length
//! 260     end marker (0xFF)        1
//! ```
//!
//! # Response Format
//!
//! Responses are classified from two fixed offsets: bytes 3 and 4 carry
//! an *unordered* tag pair ({DATA-type marker, 0xFF} in either order)
//! identifying ACK vs REJECT, and for REJECT the bytes at offsets 5 and 6
//! encode the reason as `buf[5] + buf[6] + 1`. This offset-pair scheme is
//! a fixed quirk of the peer's wire format and is preserved exactly.

use crate::error::{Error, Result};
use crate::{END_MARKER, MAX_PAYLOAD_LEN, START_MARKER};
use core::fmt;

/// Total encoded frame size: 5 header bytes, the payload slot, 1 end marker.
pub const FRAME_LEN: usize = 5 + MAX_PAYLOAD_LEN + 1;

/// Minimum response length needed to read the classification offsets.
pub const MIN_RESPONSE_LEN: usize = 7;

/// Packet type tag for data frames.
pub const TYPE_DATA: u8 = 0xF1;

/// Tag byte identifying an acknowledgment response.
pub const TYPE_ACK: u8 = 0xF2;

/// Tag byte identifying a rejection response.
pub const TYPE_REJECT: u8 = 0xF3;

/// Reason the peer gave for rejecting a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RejectReason {
    /// Sequence number did not match the peer's expected position.
    OutOfSequence = 0xF4,

    /// Declared payload length disagreed with the payload carried.
    LengthMismatch = 0xF5,

    /// The end marker was absent from its fixed offset.
    EndMarkerMissing = 0xF6,

    /// Sequence number repeated an already-accepted segment.
    Duplicate = 0xF7,
}

impl RejectReason {
    /// Maps a derived reject code to a reason.
    ///
    /// The code arrives as `buf[5] + buf[6] + 1`, computed in u16 so the
    /// byte sum cannot wrap.
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0xF4 => Some(Self::OutOfSequence),
            0xF5 => Some(Self::LengthMismatch),
            0xF6 => Some(Self::EndMarkerMissing),
            0xF7 => Some(Self::Duplicate),
            _ => None,
        }
    }

    /// The wire code for this reason.
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSequence => write!(f, "packet out of sequence"),
            Self::LengthMismatch => write!(f, "payload length mismatch"),
            Self::EndMarkerMissing => write!(f, "end of packet missing"),
            Self::Duplicate => write!(f, "duplicate packet"),
        }
    }
}

/// Why a response failed classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// The tag pair at offsets 3/4 matched neither ACK nor REJECT.
    UnknownTag,

    /// A REJECT carried a code outside the four known reasons.
    UnknownRejectCode,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTag => write!(f, "deserialize failed"),
            Self::UnknownRejectCode => write!(f, "incorrect reject code"),
        }
    }
}

/// Classification of one response datagram.
///
/// Ephemeral: constructed for exactly one received buffer, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// The peer accepted the segment.
    Ack,

    /// The peer rejected the segment for the given reason.
    Reject(RejectReason),

    /// The bytes at the classification offsets matched no known signature.
    Malformed(MalformedKind),
}

/// A data frame ready for encoding.
///
/// The declared length is carried separately from the payload so that
/// diagnostic fixtures can state a length that disagrees with the
/// payload actually present; [`Frame::new_data`] always sets them
/// consistently.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// Client identifier carried at offset 1.
    pub client_id: u8,

    /// 1-based sequence number of this segment within the message.
    pub sequence: u8,

    /// Declared payload length at offset 4.
    pub declared_len: u8,

    /// The meaningful payload bytes, at most [`MAX_PAYLOAD_LEN`].
    pub payload: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Creates a data frame with a declared length matching the payload.
    ///
    /// The payload must fit the slot; segments produced by
    /// [`crate::segment::split`] always do.
    pub fn new_data(client_id: u8, sequence: u8, payload: &'a [u8]) -> Self {
        debug_assert!(payload.len() <= MAX_PAYLOAD_LEN);
        Self {
            client_id,
            sequence,
            declared_len: payload.len() as u8,
            payload,
        }
    }

    /// Encodes the frame into its fixed wire layout.
    ///
    /// Slot bytes past the payload are zero-filled. Encoding is total:
    /// the constrained fields cannot fail to fit.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut buf = [0u8; FRAME_LEN];
        buf[0] = START_MARKER;
        buf[1] = self.client_id;
        buf[2] = TYPE_DATA;
        buf[3] = self.sequence;
        buf[4] = self.declared_len;
        buf[5..5 + self.payload.len()].copy_from_slice(self.payload);
        buf[FRAME_LEN - 1] = END_MARKER;
        buf
    }
}

/// Returns true if the unordered byte pair `(a, b)` is `{tag, 0xFF}`.
const fn tag_pair(a: u8, b: u8, tag: u8) -> bool {
    (a == tag && b == 0xFF) || (a == 0xFF && b == tag)
}

/// Classifies a response datagram.
///
/// Total over buffers of at least [`MIN_RESPONSE_LEN`] bytes: every such
/// buffer maps to exactly one [`Response`]. Shorter buffers are a
/// distinct [`Error::ResponseTooShort`], never a panic.
pub fn classify(buf: &[u8]) -> Result<Response> {
    if buf.len() < MIN_RESPONSE_LEN {
        return Err(Error::ResponseTooShort {
            len: buf.len(),
            min: MIN_RESPONSE_LEN,
        });
    }

    if tag_pair(buf[3], buf[4], TYPE_ACK) {
        return Ok(Response::Ack);
    }

    if tag_pair(buf[3], buf[4], TYPE_REJECT) {
        let code = buf[5] as u16 + buf[6] as u16 + 1;
        return Ok(match RejectReason::from_code(code) {
            Some(reason) => Response::Reject(reason),
            None => Response::Malformed(MalformedKind::UnknownRejectCode),
        });
    }

    Ok(Response::Malformed(MalformedKind::UnknownTag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_tags(b3: u8, b4: u8, b5: u8, b6: u8) -> [u8; MIN_RESPONSE_LEN] {
        [START_MARKER, 0x01, 0x00, b3, b4, b5, b6]
    }

    #[test]
    fn test_encode_markers_at_fixed_offsets() {
        let frame = Frame::new_data(0x01, 1, b"hello");
        let buf = frame.encode();

        assert_eq!(buf.len(), FRAME_LEN);
        assert_eq!(buf[0], START_MARKER);
        assert_eq!(buf[FRAME_LEN - 1], END_MARKER);
        assert_eq!(buf[1], 0x01);
        assert_eq!(buf[2], TYPE_DATA);
        assert_eq!(buf[3], 1);
        assert_eq!(buf[4], 5);
        assert_eq!(&buf[5..10], b"hello");
    }

    #[test]
    fn test_encode_zero_fills_slot() {
        let frame = Frame::new_data(0x01, 2, b"ab");
        let buf = frame.encode();

        assert!(buf[7..5 + MAX_PAYLOAD_LEN].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_full_slot() {
        let payload = [0x41u8; MAX_PAYLOAD_LEN];
        let frame = Frame::new_data(0x01, 1, &payload);
        let buf = frame.encode();

        assert_eq!(buf[4], MAX_PAYLOAD_LEN as u8);
        assert_eq!(&buf[5..5 + MAX_PAYLOAD_LEN], &payload[..]);
        assert_eq!(buf[FRAME_LEN - 1], END_MARKER);
    }

    #[test]
    fn test_classify_ack_both_orders() {
        let buf = response_with_tags(TYPE_ACK, 0xFF, 0, 0);
        assert_eq!(classify(&buf).unwrap(), Response::Ack);

        let buf = response_with_tags(0xFF, TYPE_ACK, 0, 0);
        assert_eq!(classify(&buf).unwrap(), Response::Ack);
    }

    #[test]
    fn test_classify_reject_reasons() {
        for reason in [
            RejectReason::OutOfSequence,
            RejectReason::LengthMismatch,
            RejectReason::EndMarkerMissing,
            RejectReason::Duplicate,
        ] {
            // Split the code across the two bytes; the classifier sums them.
            let buf = response_with_tags(TYPE_REJECT, 0xFF, reason.code() - 1, 0);
            assert_eq!(classify(&buf).unwrap(), Response::Reject(reason));

            let buf = response_with_tags(0xFF, TYPE_REJECT, 0x10, reason.code() - 0x11);
            assert_eq!(classify(&buf).unwrap(), Response::Reject(reason));
        }
    }

    #[test]
    fn test_classify_unknown_reject_code() {
        let buf = response_with_tags(TYPE_REJECT, 0xFF, 0x00, 0x00);
        assert_eq!(
            classify(&buf).unwrap(),
            Response::Malformed(MalformedKind::UnknownRejectCode)
        );
    }

    #[test]
    fn test_classify_unknown_tag() {
        let buf = response_with_tags(0x12, 0x34, 0, 0);
        assert_eq!(
            classify(&buf).unwrap(),
            Response::Malformed(MalformedKind::UnknownTag)
        );
    }

    #[test]
    fn test_classify_short_buffer_is_error() {
        let result = classify(&[0u8; MIN_RESPONSE_LEN - 1]);
        assert!(matches!(
            result,
            Err(Error::ResponseTooShort { len: 6, min: MIN_RESPONSE_LEN })
        ));
    }

    #[test]
    fn test_classify_is_total_over_tag_space() {
        // Every tag pair lands in exactly one bucket.
        let mut buf = response_with_tags(0, 0, 0, 0);
        for b3 in [0x00, 0xF1, TYPE_ACK, TYPE_REJECT, 0xFF] {
            for b4 in [0x00, 0xF1, TYPE_ACK, TYPE_REJECT, 0xFF] {
                buf[3] = b3;
                buf[4] = b4;
                classify(&buf).unwrap();
            }
        }
    }
}
