//! Connector trait abstraction.
//!
//! The engine drives probes through a `Connector` so the network primitive
//! can be swapped out, most usefully for instrumented stubs in tests.

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Outcome of a single probe.
///
/// Only `Open` is ever reported to callers; the other variants exist so
/// trace logs can say why a port was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Handshake completed within the timeout.
    Open,
    /// Connection refused or failed with an error.
    Closed,
    /// No answer before the timeout expired.
    TimedOut,
}

impl ProbeOutcome {
    /// Check if the port accepted the connection.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// A single connection attempt against one socket address.
///
/// Implementations must release whatever handle they open before returning,
/// and must tolerate being dropped mid-attempt: the engine abandons the
/// future when the probe timeout fires.
///
/// # Example
///
/// ```ignore
/// use portscout::scanner::Connector;
///
/// async fn is_listening<C: Connector>(connector: &C, addr: SocketAddr) -> bool {
///     connector.connect(addr).await.is_ok()
/// }
/// ```
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt a full connection. `Ok` means the remote side accepted.
    async fn connect(&self, addr: SocketAddr) -> io::Result<()>;
}

#[async_trait]
impl<C: Connector + ?Sized> Connector for std::sync::Arc<C> {
    async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        (**self).connect(addr).await
    }
}
