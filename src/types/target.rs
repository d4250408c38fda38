//! Scan target: one host and the port range to probe on it.
//!
//! Host strings may be IP literals (IPv4 or IPv6) or hostnames. Hostnames
//! are resolved once, up front, and the first address returned is used.

use super::PortRange;
use crate::error::{ScanError, ScanResult};
use std::fmt;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// An immutable, resolved scan target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    host: String,
    ip: IpAddr,
    ports: PortRange,
}

impl Target {
    /// Create a target from an already-known address.
    pub fn new(host: impl Into<String>, ip: IpAddr, ports: PortRange) -> Self {
        Self {
            host: host.into(),
            ip,
            ports,
        }
    }

    /// Resolve `host` and pair it with `ports`.
    ///
    /// IP literals never touch the resolver.
    pub async fn resolve(host: &str, ports: PortRange) -> ScanResult<Self> {
        let host = host.trim();

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(Self::new(host, ip, ports));
        }

        if !is_valid_hostname(host) {
            return Err(ScanError::Resolution {
                host: host.to_string(),
                reason: "not an IP address or valid hostname".to_string(),
            });
        }

        let resolver =
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

        let response = resolver
            .lookup_ip(host)
            .await
            .map_err(|e| ScanError::Resolution {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        let ip = response.iter().next().ok_or_else(|| ScanError::Resolution {
            host: host.to_string(),
            reason: "no addresses found".to_string(),
        })?;

        tracing::debug!(%host, %ip, "resolved target");
        Ok(Self::new(host, ip, ports))
    }

    /// The host as the caller gave it.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The address probes connect to.
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    /// The inclusive range of ports to probe.
    pub fn ports(&self) -> PortRange {
        self.ports
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.host, self.ip)
        }
    }
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        // Must start and end with alphanumeric
        if !label.chars().next().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[tokio::test]
    async fn test_resolve_ipv4_literal() {
        let ports = PortRange::new(1, 100).unwrap();
        let target = Target::resolve("127.0.0.1", ports).await.unwrap();
        assert_eq!(target.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(target.host(), "127.0.0.1");
        assert_eq!(target.ports(), ports);
        assert_eq!(target.to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_resolve_ipv6_literal() {
        let target = Target::resolve("::1", PortRange::single(22)).await.unwrap();
        assert_eq!(target.ip(), IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_resolve_rejects_garbage() {
        let result = Target::resolve("not a host!", PortRange::single(80)).await;
        assert!(matches!(result, Err(ScanError::Resolution { .. })));
    }

    #[test]
    fn test_display_with_hostname() {
        let target = Target::new(
            "router.lan",
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)),
            PortRange::single(80),
        );
        assert_eq!(target.to_string(), "router.lan (192.168.1.1)");
    }

    #[test]
    fn test_valid_hostname() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("sub.example.com"));
        assert!(is_valid_hostname("my-server"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-invalid.com"));
    }
}
