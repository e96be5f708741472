//! Diagnostic fixture for protocol conformance testing.
//!
//! Builds a fixed battery of five encoded frames: one well-formed, and
//! one for each rejection category a conforming peer must detect. Pure
//! construction — nothing here touches a channel. The client binary can
//! transmit the battery in place of a real message to probe a peer, and
//! the tests below run it against [`judge`], the reference verdict.

use crate::frame::{Frame, RejectReason, FRAME_LEN};
use crate::END_MARKER;

/// One battery entry: an encoded frame and the verdict a conforming
/// peer must reach for it, in battery order.
#[derive(Debug, Clone)]
pub struct ConformanceCase {
    /// Short human-readable description of the exercised condition.
    pub label: &'static str,

    /// The encoded frame, defect included.
    pub frame: Vec<u8>,

    /// Expected peer verdict; `None` means the frame must be accepted.
    pub expected: Option<RejectReason>,
}

/// Builds the five-frame conformance battery.
///
/// In order: a correct frame, an out-of-sequence frame (sequence 4 in
/// position 2), a length-mismatch frame (declared 40, shorter payload),
/// a frame whose end marker was overwritten, and a duplicate of the
/// earlier sequence 4.
pub fn conformance_batch(client_id: u8) -> Vec<ConformanceCase> {
    let correct = Frame::new_data(client_id, 1, b"This packet is correct.").encode();

    let out_of_sequence =
        Frame::new_data(client_id, 4, b"This packet is out of sequence.").encode();

    let mismatched = Frame {
        declared_len: 40,
        ..Frame::new_data(client_id, 3, b"This packet has a mismatched length.")
    }
    .encode();

    let mut end_missing = Frame::new_data(client_id, 4, b"This packet is missing its end.").encode();
    end_missing[FRAME_LEN - 1] = 0xF2;

    let duplicate = Frame::new_data(client_id, 4, b"This packet is a duplicate.").encode();

    vec![
        ConformanceCase {
            label: "correct",
            frame: correct.to_vec(),
            expected: None,
        },
        ConformanceCase {
            label: "out of sequence",
            frame: out_of_sequence.to_vec(),
            expected: Some(RejectReason::OutOfSequence),
        },
        ConformanceCase {
            label: "length mismatch",
            frame: mismatched.to_vec(),
            expected: Some(RejectReason::LengthMismatch),
        },
        ConformanceCase {
            label: "end marker missing",
            frame: end_missing.to_vec(),
            expected: Some(RejectReason::EndMarkerMissing),
        },
        ConformanceCase {
            label: "duplicate",
            frame: duplicate.to_vec(),
            expected: Some(RejectReason::Duplicate),
        },
    ]
}

/// Reference verdict a conforming peer reaches for one data frame.
///
/// `expected_sequence` is the 1-based position the peer is waiting for;
/// `seen` holds every sequence number observed so far, accepted or not.
/// Checks run in defect-provenance order: envelope first, then declared
/// length against the NUL-scanned payload (the battery's payloads are
/// text), then duplication, then ordering.
pub fn judge(frame: &[u8], expected_sequence: u8, seen: &[u8]) -> Option<RejectReason> {
    debug_assert_eq!(frame.len(), FRAME_LEN);

    if frame[FRAME_LEN - 1] != END_MARKER {
        return Some(RejectReason::EndMarkerMissing);
    }

    let slot = &frame[5..FRAME_LEN - 1];
    let actual_len = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    if frame[4] as usize != actual_len {
        return Some(RejectReason::LengthMismatch);
    }

    let sequence = frame[3];
    if seen.contains(&sequence) {
        return Some(RejectReason::Duplicate);
    }

    if sequence != expected_sequence {
        return Some(RejectReason::OutOfSequence);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::TYPE_DATA;
    use crate::{DEFAULT_CLIENT_ID, START_MARKER};

    #[test]
    fn test_batch_has_five_cases() {
        let batch = conformance_batch(DEFAULT_CLIENT_ID);
        assert_eq!(batch.len(), 5);
        assert!(batch.iter().all(|c| c.frame.len() == FRAME_LEN));
    }

    #[test]
    fn test_batch_headers() {
        let batch = conformance_batch(0x2A);
        for case in &batch {
            assert_eq!(case.frame[0], START_MARKER);
            assert_eq!(case.frame[1], 0x2A);
            assert_eq!(case.frame[2], TYPE_DATA);
        }
        // Only the end-marker case lacks the sentinel.
        assert_eq!(batch[3].frame[FRAME_LEN - 1], 0xF2);
        assert_eq!(batch[0].frame[FRAME_LEN - 1], END_MARKER);
    }

    #[test]
    fn test_judge_matches_expected_verdicts() {
        let batch = conformance_batch(DEFAULT_CLIENT_ID);
        let mut seen = Vec::new();

        for (i, case) in batch.iter().enumerate() {
            let verdict = judge(&case.frame, (i + 1) as u8, &seen);
            assert_eq!(verdict, case.expected, "case `{}`", case.label);
            seen.push(case.frame[3]);
        }
    }

    #[test]
    fn test_judge_accepts_contiguous_sequence() {
        let mut seen = Vec::new();
        for seq in 1..=3u8 {
            let frame = Frame::new_data(DEFAULT_CLIENT_ID, seq, b"payload").encode();
            assert_eq!(judge(&frame, seq, &seen), None);
            seen.push(seq);
        }
    }
}
