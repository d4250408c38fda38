//! Core type definitions.
//!
//! Validation happens at construction, so a `PortRange` or `Target` in hand
//! is always safe to scan.

mod port;
mod target;

pub use port::{PortError, PortRange, MAX_PORT};
pub use target::Target;
