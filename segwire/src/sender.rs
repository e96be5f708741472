//! Transmission controller.
//!
//! Drives the per-segment send/wait/retry/advance state machine:
//! strict order, one segment in flight, a fixed attempt budget per
//! segment, and a bounded wait for every response. Exhausting the
//! budget for any segment aborts the whole message.
//!
//! Rejections and malformed responses are retryable: each consumes one
//! attempt exactly like a timeout. The peer's verdict is logged either
//! way, so a persistent rejection surfaces as an exhausted budget with
//! the reasons in the log.

use crate::channel::DatagramChannel;
use crate::config::SenderConfig;
use crate::error::{Error, Result};
use crate::frame::{classify, Frame, Response};
use crate::segment::{self, Segment};
use log::{debug, info, warn};

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    /// No message in progress.
    #[default]
    Idle,

    /// A segment is being framed and transmitted.
    Sending,

    /// Waiting on the bounded receive for the segment in flight.
    AwaitingResponse,

    /// The last message completed; every segment was acknowledged.
    Complete,

    /// The last message aborted before all segments were acknowledged.
    Aborted,
}

/// Counters describing one message send.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SendReport {
    /// Segments acknowledged by the peer.
    pub segments_delivered: usize,

    /// Frames put on the wire, retransmissions included.
    pub frames_sent: u64,

    /// Frames sent beyond the first attempt for their segment.
    pub retransmissions: u64,

    /// Receive windows that elapsed without a datagram.
    pub timeouts: u64,

    /// REJECT responses observed.
    pub rejects: u64,

    /// Malformed or too-short responses observed.
    pub malformed: u64,
}

/// Drives message sends over a [`DatagramChannel`].
///
/// One transmitter handles one message at a time; a future multi-peer
/// extension would run one transmitter per session, sharing nothing.
#[derive(Debug)]
pub struct Transmitter {
    /// Configuration, fixed for the transmitter's lifetime.
    config: SenderConfig,

    /// Current state, observable between calls.
    state: SendState,
}

impl Transmitter {
    /// Creates a transmitter with the given configuration.
    pub fn new(config: SenderConfig) -> Self {
        Self {
            config,
            state: SendState::Idle,
        }
    }

    /// Returns the current controller state.
    pub fn state(&self) -> SendState {
        self.state
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &SenderConfig {
        &self.config
    }

    /// Sends one message, segment by segment, resolving every segment to
    /// an ACK before advancing.
    ///
    /// A zero-length message completes trivially with an empty report.
    /// Any terminal condition (transport failure, oversized input,
    /// exhausted attempt budget) aborts the remainder of the message.
    pub async fn send_message<C: DatagramChannel>(
        &mut self,
        channel: &mut C,
        input: &[u8],
    ) -> Result<SendReport> {
        let segments = match segment::split(input, self.config.max_payload) {
            Ok(segments) => segments,
            Err(e) => {
                self.state = SendState::Aborted;
                return Err(e);
            }
        };

        let mut report = SendReport::default();
        info!("sending message as {} segment(s)", segments.len());

        for seg in &segments {
            if let Err(e) = self.deliver_segment(channel, seg, &mut report).await {
                self.state = SendState::Aborted;
                return Err(e);
            }
            report.segments_delivered += 1;
        }

        self.state = SendState::Complete;
        info!(
            "message complete: {} segment(s), {} frame(s) sent, {} retransmission(s)",
            report.segments_delivered, report.frames_sent, report.retransmissions
        );
        Ok(report)
    }

    /// Resolves one segment: send, await, classify, retry within budget.
    async fn deliver_segment<C: DatagramChannel>(
        &mut self,
        channel: &mut C,
        seg: &Segment,
        report: &mut SendReport,
    ) -> Result<()> {
        let frame = Frame::new_data(self.config.client_id, seg.sequence, &seg.payload);
        let encoded = frame.encode();

        for attempt in 0..self.config.max_resend_attempts {
            self.state = SendState::Sending;
            channel.send(&encoded).await?;
            report.frames_sent += 1;
            if attempt > 0 {
                report.retransmissions += 1;
                debug!("segment {}: resend attempt {}", seg.sequence, attempt);
            } else {
                debug!(
                    "segment {}: sent {} payload byte(s)",
                    seg.sequence,
                    seg.declared_len()
                );
            }

            self.state = SendState::AwaitingResponse;
            let received = channel.recv_timeout(self.config.response_timeout).await?;

            let Some(bytes) = received else {
                report.timeouts += 1;
                warn!("segment {}: no response within timeout", seg.sequence);
                continue;
            };

            match classify(&bytes) {
                Ok(Response::Ack) => {
                    debug!("segment {}: ACK received", seg.sequence);
                    return Ok(());
                }
                Ok(Response::Reject(reason)) => {
                    report.rejects += 1;
                    warn!(
                        "segment {}: rejected ({}), error {:#04x}",
                        seg.sequence,
                        reason,
                        reason.code()
                    );
                }
                Ok(Response::Malformed(kind)) => {
                    report.malformed += 1;
                    warn!("segment {}: {}", seg.sequence, kind);
                }
                Err(Error::ResponseTooShort { len, min }) => {
                    report.malformed += 1;
                    warn!(
                        "segment {}: response too short to classify ({} < {})",
                        seg.sequence, len, min
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::RetriesExhausted {
            sequence: seg.sequence,
            attempts: self.config.max_resend_attempts,
        })
    }
}
