//! Plain-text scan report.
//!
//! The report is written once, after the scan completes:
//!
//! ```text
//! Port Scan Report for <host>
//! Scan started at: <timestamp>
//!
//! Open Ports:
//! Port <N> is open.
//!
//! Scan completed at: <timestamp>
//! ```
//!
//! When nothing is open, the `Open Ports:` block is replaced by a single
//! `No open ports found.` line.

use crate::error::{ReportError, ReportResult};
use crate::scanner::ScanResults;
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Default report location, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "scan_report.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Everything a report needs, detached from the live scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub host: String,
    pub open_ports: BTreeSet<u16>,
    pub started_at: DateTime<Local>,
    pub completed_at: DateTime<Local>,
}

impl ScanReport {
    /// Build a report from finished scan results.
    pub fn from_results(results: &ScanResults) -> Self {
        Self {
            host: results.target.host().to_string(),
            open_ports: results.open_ports.clone(),
            started_at: results.started_at,
            completed_at: results.completed_at,
        }
    }

    /// Render the report text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "Port Scan Report for {}", self.host);
        let _ = writeln!(
            out,
            "Scan started at: {}",
            self.started_at.format(TIMESTAMP_FORMAT)
        );
        out.push('\n');

        if self.open_ports.is_empty() {
            out.push_str("No open ports found.\n");
        } else {
            out.push_str("Open Ports:\n");
            for port in &self.open_ports {
                let _ = writeln!(out, "Port {} is open.", port);
            }
        }

        let _ = writeln!(
            out,
            "\nScan completed at: {}",
            self.completed_at.format(TIMESTAMP_FORMAT)
        );
        out
    }

    /// Write the report to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> ReportResult<()> {
        fs::write(path, self.render()).map_err(|source| ReportError::WriteFailed {
            path: PathBuf::from(path),
            source,
        })?;
        tracing::info!(path = %path.display(), "report written");
        Ok(())
    }
}
