//! Message segmentation.
//!
//! Splits one input buffer into the ordered, bounded chunks that the
//! frame codec wraps for transmission. The logical message ends at the
//! first NUL byte when one is present (file and interactive sources
//! both terminate this way); input without a terminator is taken whole.

use crate::error::{Error, Result};
use crate::{MAX_MESSAGE_LEN, MAX_PAYLOAD_LEN};

/// One unit of the message to transmit.
///
/// Immutable once constructed; sequence numbers are contiguous and
/// 1-based within a message. The declared wire length is always the
/// payload length, so all segments but the last are full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based position of this segment within the message.
    pub sequence: u8,

    /// The meaningful payload bytes (1..=max_payload, never empty).
    pub payload: Vec<u8>,
}

impl Segment {
    /// Declared payload length for the wire header.
    pub fn declared_len(&self) -> u8 {
        self.payload.len() as u8
    }
}

/// Returns the logical length of the input: bytes before the first NUL
/// terminator, or the whole buffer when no terminator is present.
pub fn logical_len(input: &[u8]) -> usize {
    input.iter().position(|&b| b == 0).unwrap_or(input.len())
}

/// Splits a message into ordered segments of at most `max_payload` bytes.
///
/// Produces exactly `ceil(L / max_payload)` segments for a logical
/// length of `L`, sequences 1..=N. Zero logical length yields zero
/// segments: the send completes trivially. Oversized input is an error,
/// never a silent truncation.
pub fn split(input: &[u8], max_payload: usize) -> Result<Vec<Segment>> {
    debug_assert!(max_payload >= 1 && max_payload <= MAX_PAYLOAD_LEN);

    let len = logical_len(input);
    if len > MAX_MESSAGE_LEN {
        return Err(Error::MessageTooLong {
            len,
            max: MAX_MESSAGE_LEN,
        });
    }

    let count = len.div_ceil(max_payload);
    if count > u8::MAX as usize {
        return Err(Error::TooManySegments { count });
    }

    let segments = input[..len]
        .chunks(max_payload)
        .enumerate()
        .map(|(i, chunk)| Segment {
            sequence: (i + 1) as u8,
            payload: chunk.to_vec(),
        })
        .collect();

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_exact_multiple() {
        let input = vec![0xAB; MAX_PAYLOAD_LEN * 2];
        let segments = split(&input, MAX_PAYLOAD_LEN).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].sequence, 1);
        assert_eq!(segments[1].sequence, 2);
        assert_eq!(segments[0].payload.len(), MAX_PAYLOAD_LEN);
        assert_eq!(segments[1].payload.len(), MAX_PAYLOAD_LEN);
    }

    #[test]
    fn test_split_short_last_segment() {
        let input = vec![0x42; MAX_PAYLOAD_LEN + 7];
        let segments = split(&input, MAX_PAYLOAD_LEN).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].payload.len(), MAX_PAYLOAD_LEN);
        assert_eq!(segments[1].payload.len(), 7);
        assert_eq!(segments[1].declared_len(), 7);
    }

    #[test]
    fn test_split_stops_at_terminator() {
        let input = b"hello\0trailing garbage";
        let segments = split(input, MAX_PAYLOAD_LEN).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].payload, b"hello");
    }

    #[test]
    fn test_split_two_byte_message_payload_one() {
        let segments = split(b"AB", 1).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].sequence, 1);
        assert_eq!(segments[1].sequence, 2);
        assert_eq!(segments[0].payload, b"A");
        assert_eq!(segments[1].payload, b"B");
        assert_eq!(segments[0].declared_len(), 1);
        assert_eq!(segments[1].declared_len(), 1);
    }

    #[test]
    fn test_split_zero_length_yields_no_segments() {
        assert!(split(b"", MAX_PAYLOAD_LEN).unwrap().is_empty());
        assert!(split(b"\0ignored", MAX_PAYLOAD_LEN).unwrap().is_empty());
    }

    #[test]
    fn test_split_oversized_input_rejected() {
        let input = vec![0x55; MAX_MESSAGE_LEN + 1];
        let result = split(&input, MAX_PAYLOAD_LEN);

        assert!(matches!(result, Err(Error::MessageTooLong { .. })));
    }

    #[test]
    fn test_round_trip_reconstruction() {
        // Concatenating declared-length payloads reproduces the input.
        for len in [1, 7, MAX_PAYLOAD_LEN - 1, MAX_PAYLOAD_LEN, MAX_PAYLOAD_LEN + 1, 1000] {
            let input: Vec<u8> = (0..len).map(|i| (i % 251 + 1) as u8).collect();
            let segments = split(&input, MAX_PAYLOAD_LEN).unwrap();

            assert_eq!(segments.len(), len.div_ceil(MAX_PAYLOAD_LEN));
            let rebuilt: Vec<u8> = segments
                .iter()
                .flat_map(|s| s.payload[..s.declared_len() as usize].iter().copied())
                .collect();
            assert_eq!(rebuilt, input);

            for (i, seg) in segments.iter().enumerate() {
                assert_eq!(seg.sequence as usize, i + 1);
            }
        }
    }
}
