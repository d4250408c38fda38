//! Port range type with validation.
//!
//! `PortRange` is the inclusive span of ports a scan covers. Construction
//! validates the bounds, so a range in hand is always scannable.

use std::fmt;

/// Highest valid TCP port number.
pub const MAX_PORT: u32 = u16::MAX as u32;

/// Error type for port range validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (0-65535)")]
    OutOfRange(u32),
    #[error("start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
}

/// An inclusive range of ports, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: u16, end: u16) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidRange(start, end))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Build a range from caller-supplied bounds that may not fit in a port.
    ///
    /// Both bounds are checked against 0-65535 before their ordering.
    pub fn from_bounds(start: u32, end: u32) -> Result<Self, PortError> {
        let start = u16::try_from(start).map_err(|_| PortError::OutOfRange(start))?;
        let end = u16::try_from(end).map_err(|_| PortError::OutOfRange(end))?;
        Self::new(start, end)
    }

    /// Create a range containing a single port.
    pub const fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// First port in the range.
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Last port in the range.
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end as usize) - (self.start as usize) + 1
    }

    /// Check if the range is empty (never true for valid ranges).
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Check whether `port` falls inside the range.
    pub const fn contains(&self, port: u16) -> bool {
        port >= self.start && port <= self.end
    }

    /// Iterate over all ports in this range, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_range() {
        let range = PortRange::new(1, 100).unwrap();
        assert_eq!(range.len(), 100);
        assert_eq!(range.iter().count(), 100);
        assert!(range.contains(1));
        assert!(range.contains(100));
        assert!(!range.contains(101));
    }

    #[test]
    fn test_single_port_range() {
        let range = PortRange::new(443, 443).unwrap();
        assert_eq!(range, PortRange::single(443));
        assert_eq!(range.len(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![443]);
        assert_eq!(range.to_string(), "443");
    }

    #[test]
    fn test_full_range_len() {
        let range = PortRange::new(0, 65535).unwrap();
        assert_eq!(range.len(), 65536);
        assert_eq!(range.to_string(), "0-65535");
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            PortRange::new(100, 50),
            Err(PortError::InvalidRange(100, 50))
        );
    }

    #[test]
    fn test_from_bounds_out_of_range() {
        assert_eq!(
            PortRange::from_bounds(1, 70000),
            Err(PortError::OutOfRange(70000))
        );
        assert_eq!(
            PortRange::from_bounds(65536, 65536),
            Err(PortError::OutOfRange(65536))
        );
        assert!(PortRange::from_bounds(0, MAX_PORT).is_ok());
    }
}
