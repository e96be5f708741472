//! Sender configuration.

use crate::{DEFAULT_CLIENT_ID, DEFAULT_RESPONSE_TIMEOUT_MS, MAX_PAYLOAD_LEN, MAX_RESEND_ATTEMPTS};
use std::time::Duration;

/// Tunable parameters for one [`crate::Transmitter`].
///
/// The client identifier is injected here rather than compiled in, so
/// several transmitters with distinct identities can coexist.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// Client identifier carried in every frame header.
    pub client_id: u8,

    /// Bounded wait for a peer response, per attempt.
    pub response_timeout: Duration,

    /// Total send attempts allowed per segment.
    pub max_resend_attempts: u8,

    /// Segment payload bound; at most [`MAX_PAYLOAD_LEN`].
    pub max_payload: usize,
}

impl SenderConfig {
    /// Creates a configuration with the protocol defaults.
    pub fn new() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID,
            response_timeout: Duration::from_millis(DEFAULT_RESPONSE_TIMEOUT_MS),
            max_resend_attempts: MAX_RESEND_ATTEMPTS,
            max_payload: MAX_PAYLOAD_LEN,
        }
    }

    /// Sets the client identifier.
    pub fn with_client_id(mut self, client_id: u8) -> Self {
        self.client_id = client_id;
        self
    }

    /// Sets the per-attempt response timeout.
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Sets the per-segment attempt budget.
    pub fn with_max_resend_attempts(mut self, attempts: u8) -> Self {
        self.max_resend_attempts = attempts;
        self
    }

    /// Sets the segment payload bound (clamped to the slot width).
    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload.clamp(1, MAX_PAYLOAD_LEN);
        self
    }
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self::new()
    }
}
