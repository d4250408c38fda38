//! TCP connect prober.
//!
//! Completes a full handshake through the operating system's socket API.
//! Needs no privileges, and is easily logged by the target.

use crate::scanner::traits::Connector;
use async_trait::async_trait;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpStream;

/// Production connector backed by `tokio::net::TcpStream`.
///
/// The stream is dropped as soon as the handshake completes, which closes
/// the socket. If the engine abandons the attempt on timeout, dropping the
/// pending connect future releases the socket instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl TcpConnector {
    /// Create a new TCP connector.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        let stream = TcpStream::connect(addr).await?;
        drop(stream);
        Ok(())
    }
}
