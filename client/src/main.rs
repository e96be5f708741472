//! UDP sender client.
//!
//! Reads a message file, segments and frames it, and transmits it to
//! the fixed peer, resolving every segment against the peer's ACK or
//! rejection. With `--conformance` it instead sends the five-frame
//! diagnostic battery and reports the peer's verdict for each.

mod udp_channel;

use log::{error, info, warn};
use segwire::frame::{classify, Response};
use segwire::{fixture, SenderConfig, Transmitter};
use std::net::SocketAddr;
use std::process::ExitCode;
use udp_channel::UdpChannel;

const DEFAULT_MESSAGE_FILE: &str = "message.txt";
const SERVER_ADDR: &str = "127.0.0.1:5150";
const CLIENT_ADDR: &str = "0.0.0.0:5151";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let arg = std::env::args().nth(1);
    let conformance = arg.as_deref() == Some("--conformance");
    let message_file = match arg {
        Some(path) if !conformance => path,
        _ => DEFAULT_MESSAGE_FILE.to_string(),
    };

    let local: SocketAddr = CLIENT_ADDR.parse().expect("invalid client address");
    let peer: SocketAddr = SERVER_ADDR.parse().expect("invalid server address");

    info!("Connecting to server at {peer}...");
    let mut channel = match UdpChannel::connect(local, peer).await {
        Ok(channel) => channel,
        Err(e) => {
            error!("Failed to open UDP socket: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("Ready to transmit data.");

    let config = SenderConfig::default();

    if conformance {
        return run_conformance(&mut channel, &config).await;
    }

    info!("Reading input file {message_file}.");
    let input = match tokio::fs::read(&message_file).await {
        Ok(input) => input,
        Err(e) => {
            error!("Could not read {message_file}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut transmitter = Transmitter::new(config);
    match transmitter.send_message(&mut channel, &input).await {
        Ok(report) => {
            info!("=== Send Complete ===");
            info!("Segments delivered: {}", report.segments_delivered);
            info!("Frames sent: {}", report.frames_sent);
            info!("Retransmissions: {}", report.retransmissions);
            info!("Timeouts: {}", report.timeouts);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Send failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Sends the diagnostic battery and logs each peer verdict against the
/// expected one. The peer should accept the first frame and reject the
/// other four, each for its specific reason.
async fn run_conformance(channel: &mut UdpChannel, config: &SenderConfig) -> ExitCode {
    use segwire::DatagramChannel;

    info!("Sending conformance battery.");
    let mut failures = 0u32;

    for case in fixture::conformance_batch(config.client_id) {
        if let Err(e) = channel.send(&case.frame).await {
            error!("Failed to send `{}` frame: {e}", case.label);
            return ExitCode::FAILURE;
        }

        let verdict = match channel.recv_timeout(config.response_timeout).await {
            Ok(Some(bytes)) => classify(&bytes).ok(),
            Ok(None) => {
                warn!("`{}`: no response within timeout", case.label);
                failures += 1;
                continue;
            }
            Err(e) => {
                error!("Failed to receive response: {e}");
                return ExitCode::FAILURE;
            }
        };

        let matched = match (verdict, case.expected) {
            (Some(Response::Ack), None) => true,
            (Some(Response::Reject(reason)), Some(expected)) => reason == expected,
            _ => false,
        };

        if matched {
            info!("`{}`: verdict as expected ({verdict:?})", case.label);
        } else {
            warn!(
                "`{}`: expected {:?}, peer answered {verdict:?}",
                case.label, case.expected
            );
            failures += 1;
        }
    }

    if failures == 0 {
        info!("Conformance battery passed.");
        ExitCode::SUCCESS
    } else {
        error!("Conformance battery: {failures} case(s) failed.");
        ExitCode::FAILURE
    }
}
