//! # Segwire - Stop-and-Wait Segmented Delivery
//!
//! Segwire is the sender side of a simple reliable-delivery protocol
//! layered over an unreliable datagram transport. It provides:
//!
//! - **Message segmentation**: Arbitrary-length input is split into bounded chunks
//! - **Fixed binary framing**: Each chunk is wrapped in a marker-delimited envelope
//! - **Response classification**: Peer datagrams resolve to ACK / REJECT / malformed
//! - **Bounded retransmission**: Timeouts and rejections are retried against a fixed budget
//! - **Custom channel support**: Works with any datagram transport implementing one trait
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Application Layer                     │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Sender Layer                          │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────┐   │
//! │  │  Segmenter  │ │ Transmitter │ │  Retry Budget   │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────┘   │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Frame Layer                           │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────┐   │
//! │  │   Framing   │ │ Classifying │ │   Sequencing    │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────┘   │
//! ├─────────────────────────────────────────────────────────┤
//! │                    Channel Layer                         │
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │        DatagramChannel (UDP, loopback, ...)      │   │
//! │  └─────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use segwire::{SenderConfig, Transmitter};
//!
//! let mut transmitter = Transmitter::new(SenderConfig::default());
//! let report = transmitter.send_message(&mut channel, b"Hello, World!").await?;
//! assert_eq!(report.segments_delivered, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod channel;
pub mod config;
pub mod error;
pub mod fixture;
pub mod frame;
pub mod segment;
pub mod sender;

// Re-export commonly used types
pub use channel::DatagramChannel;
pub use config::SenderConfig;
pub use error::{Error, Result};
pub use frame::{Frame, MalformedKind, RejectReason, Response, FRAME_LEN};
pub use segment::Segment;
pub use sender::{SendReport, SendState, Transmitter};

/// Frame start sentinel, first byte of every request frame.
pub const START_MARKER: u8 = 0xFF;

/// Frame end sentinel, last byte of every request frame.
pub const END_MARKER: u8 = 0xFF;

/// Payload slot width in bytes. Every frame carries a slot of exactly
/// this size; only the first `declared length` bytes are meaningful.
pub const MAX_PAYLOAD_LEN: usize = 255;

/// Maximum logical message length in bytes (five full payload slots).
pub const MAX_MESSAGE_LEN: usize = 5 * MAX_PAYLOAD_LEN;

/// Total send attempts allowed per segment before the whole message
/// send is abandoned.
pub const MAX_RESEND_ATTEMPTS: u8 = 3;

/// Default bounded wait for a peer response, per attempt, in milliseconds.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 3000;

/// Default client identifier carried in the frame header.
pub const DEFAULT_CLIENT_ID: u8 = 0x01;
