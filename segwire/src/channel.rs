//! Datagram channel abstraction.
//!
//! This is the seam between the transmission controller and the socket
//! layer. The controller owns no socket; it drives whatever implements
//! [`DatagramChannel`] — a UDP socket in the client binary, a scripted
//! in-memory channel in tests.

use crate::error::Result;
use std::time::Duration;

/// One unreliable, unordered datagram channel to a single fixed peer.
///
/// `recv_timeout` is the sole suspension point in the protocol: it must
/// resolve within the given duration, returning `Ok(None)` when no
/// datagram arrived in time. It must never block indefinitely.
#[allow(async_fn_in_trait)]
pub trait DatagramChannel {
    /// Sends one datagram to the peer.
    async fn send(&mut self, buf: &[u8]) -> Result<()>;

    /// Waits up to `timeout` for one datagram from the peer.
    ///
    /// Returns `Ok(Some(bytes))` on arrival, `Ok(None)` on timeout, and
    /// an error only for a genuine transport failure.
    async fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Vec<u8>>>;
}

/// A scripted channel for exercising the controller without a socket.
///
/// Each send is recorded; each receive pops the next scripted reply
/// (`Some(bytes)` for a datagram, `None` for a simulated timeout). Once
/// the script runs dry every receive times out.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    /// Frames sent, in order.
    pub sent: Vec<Vec<u8>>,

    /// Replies to hand out, in order.
    replies: std::collections::VecDeque<Option<Vec<u8>>>,

    /// Number of receive calls made.
    pub recv_calls: usize,
}

impl ScriptedChannel {
    /// Creates a channel with no scripted replies (every receive times out).
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply datagram for the next unanswered receive.
    pub fn push_reply(&mut self, bytes: Vec<u8>) {
        self.replies.push_back(Some(bytes));
    }

    /// Queues a simulated timeout for the next unanswered receive.
    pub fn push_timeout(&mut self) {
        self.replies.push_back(None);
    }
}

impl DatagramChannel for ScriptedChannel {
    async fn send(&mut self, buf: &[u8]) -> Result<()> {
        self.sent.push(buf.to_vec());
        Ok(())
    }

    async fn recv_timeout(&mut self, _timeout: Duration) -> Result<Option<Vec<u8>>> {
        self.recv_calls += 1;
        Ok(self.replies.pop_front().flatten())
    }
}
