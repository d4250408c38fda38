//! # portscout - A Concurrent TCP Connect Scanner
//!
//! portscout probes every port in an inclusive range on a single host,
//! with a bounded number of connection attempts in flight, and reports
//! which ports completed a TCP handshake.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portscout::scanner::{ScanConfig, Scanner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let scanner = Scanner::new(ScanConfig::new().with_concurrency(100));
//!     let open = scanner.scan("127.0.0.1", 1, 1024).await.unwrap();
//!
//!     for port in open {
//!         println!("Port {} is open.", port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated port ranges and scan targets
//! - [`scanner`] - The bounded-concurrency engine and the `Connector` seam
//! - [`report`] - Plain-text report rendering and writing
//! - [`config`] - Settings file and defaults
//! - [`cli`] - Argument parsing and the end-to-end scan flow
//! - [`output`] - Console formatting
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError};
pub use report::ScanReport;
pub use scanner::{scan, Connector, ProbeOutcome, ScanConfig, ScanResults, Scanner, TcpConnector};
pub use types::{PortRange, Target};
