//! UDP implementation of the sender's datagram channel.

use segwire::{DatagramChannel, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;

/// Responses fit well inside one frame; size the receive buffer the same.
const RECV_BUF_LEN: usize = segwire::FRAME_LEN;

/// A UDP socket bound locally and connected to the fixed peer.
pub struct UdpChannel {
    socket: UdpSocket,
}

impl UdpChannel {
    /// Binds `local` and connects the socket to `peer`.
    pub async fn connect(local: SocketAddr, peer: SocketAddr) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;
        Ok(Self { socket })
    }
}

impl DatagramChannel for UdpChannel {
    async fn send(&mut self, buf: &[u8]) -> Result<()> {
        self.socket.send(buf).await?;
        Ok(())
    }

    async fn recv_timeout(&mut self, wait: Duration) -> Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; RECV_BUF_LEN];
        match timeout(wait, self.socket.recv(&mut buf)).await {
            Ok(Ok(n)) => {
                buf.truncate(n);
                Ok(Some(buf))
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Ok(None),
        }
    }
}
