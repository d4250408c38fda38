//! Command-line interface definitions for portscout.
//!
//! Uses `clap` derive macros for declarative argument parsing. Parsed
//! arguments are validated into a [`ScanRequest`] before any work starts,
//! so the engine never sees a bad range or configuration.

use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::report::ScanReport;
use crate::scanner::{Connector, ScanConfig, ScanResults, Scanner};
use crate::types::{PortRange, Target};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent TCP connect port scanner.
#[derive(Parser, Debug)]
#[command(name = "portscout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a host for open TCP ports", long_about = None)]
pub struct Cli {
    /// Target IP address or hostname to scan
    #[arg(value_name = "HOST")]
    pub host: String,

    /// First port of the range (inclusive)
    #[arg(value_name = "START_PORT")]
    pub start_port: u32,

    /// Last port of the range (inclusive)
    #[arg(value_name = "END_PORT")]
    pub end_port: u32,

    /// Path to save the scan report [default: scan_report.txt]
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Maximum number of concurrent connection attempts [default: 50]
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Connection timeout in milliseconds [default: 1000]
    #[arg(short = 't', long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Show a progress bar while scanning
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a settings file
    #[arg(long, env = "PORTSCOUT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// A validated scan invocation.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub host: String,
    pub ports: PortRange,
    pub config: ScanConfig,
    pub report_path: PathBuf,
    pub quiet: bool,
}

impl Cli {
    /// Load settings from `--config`, or from the default location.
    pub fn load_settings(&self) -> CliResult<AppSettings> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load()?,
        };
        Ok(settings)
    }

    /// Validate arguments against `settings`. Flags win over settings.
    pub fn into_request(self, settings: &AppSettings) -> CliResult<ScanRequest> {
        let ports = PortRange::from_bounds(self.start_port, self.end_port)?;

        let mut config = settings.scan_config();
        if let Some(concurrency) = self.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout_ms) = self.timeout {
            config = config.with_timeout(Duration::from_millis(timeout_ms));
        }
        if self.verbose {
            config = config.with_progress();
        }
        if self.quiet {
            config.show_progress = false;
        }
        config.validate()?;

        Ok(ScanRequest {
            host: self.host,
            ports,
            config,
            report_path: self
                .report
                .unwrap_or_else(|| settings.default_report_path.clone()),
            quiet: self.quiet,
        })
    }
}

/// Parse-to-completion entry point used by the binary.
pub async fn run(cli: Cli) -> CliResult<ScanResults> {
    let settings = cli.load_settings()?;
    let request = cli.into_request(&settings)?;
    let scanner = Scanner::new(request.config.clone());
    execute(&scanner, &request).await
}

/// Resolve the target, scan it, print the outcome, and write the report.
///
/// A report that cannot be written is reported on stderr but does not
/// fail the scan.
pub async fn execute<C: Connector + 'static>(
    scanner: &Scanner<C>,
    request: &ScanRequest,
) -> CliResult<ScanResults> {
    let target = Target::resolve(&request.host, request.ports).await?;

    if !request.quiet {
        output::print_scan_header(&target);
    }

    let results = scanner.scan_target(&target).await?;

    if !request.quiet {
        if let Err(e) = output::print_open_ports(&results.open_ports) {
            tracing::warn!(error = %e, "failed to print results");
        }
        output::print_duration(results.duration);
    }

    match ScanReport::from_results(&results).write_to(&request.report_path) {
        Ok(()) => {
            if !request.quiet {
                output::print_success(&format!(
                    "Report saved to {}",
                    request.report_path.display()
                ));
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "report not saved");
            output::print_error(&format!("Error saving report: {}", e));
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ScanError};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("portscout").chain(args.iter().copied()))
    }

    #[test]
    fn test_missing_arguments_is_usage_error() {
        let err = parse(&["127.0.0.1", "1"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_defaults_from_settings() {
        let cli = parse(&["127.0.0.1", "1", "100"]).unwrap();
        let request = cli.into_request(&AppSettings::default()).unwrap();

        assert_eq!(request.host, "127.0.0.1");
        assert_eq!(request.ports, PortRange::new(1, 100).unwrap());
        assert_eq!(request.config.concurrency, 50);
        assert_eq!(request.config.timeout, Duration::from_secs(1));
        assert_eq!(request.report_path, PathBuf::from("scan_report.txt"));
        assert!(!request.quiet);
    }

    #[test]
    fn test_flags_override_settings() {
        let cli = parse(&[
            "10.0.0.1",
            "20",
            "25",
            "--report",
            "out.txt",
            "-c",
            "5",
            "-t",
            "200",
            "-v",
        ])
        .unwrap();
        let settings = AppSettings {
            default_concurrency: 500,
            ..AppSettings::default()
        };
        let request = cli.into_request(&settings).unwrap();

        assert_eq!(request.config.concurrency, 5);
        assert_eq!(request.config.timeout, Duration::from_millis(200));
        assert!(request.config.show_progress);
        assert_eq!(request.report_path, PathBuf::from("out.txt"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let cli = parse(&["127.0.0.1", "100", "1"]).unwrap();
        let err = cli.into_request(&AppSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::Scan(ScanError::InvalidRange(_))));
    }

    #[test]
    fn test_port_above_65535_rejected() {
        let cli = parse(&["127.0.0.1", "1", "65536"]).unwrap();
        let err = cli.into_request(&AppSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::Scan(ScanError::InvalidRange(_))));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let cli = parse(&["127.0.0.1", "1", "10", "-c", "0"]).unwrap();
        let err = cli.into_request(&AppSettings::default()).unwrap_err();
        assert!(matches!(err, CliError::Scan(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn test_quiet_hides_progress_enabled_by_settings() {
        let cli = parse(&["127.0.0.1", "1", "10", "-q"]).unwrap();
        let settings = AppSettings {
            show_progress: true,
            ..AppSettings::default()
        };
        let request = cli.into_request(&settings).unwrap();

        assert!(request.quiet);
        assert!(!request.config.show_progress);
    }

    #[test]
    fn test_huge_concurrency_accepted() {
        let cli = parse(&["127.0.0.1", "1", "3", "-c", "18446744073709551615"]).unwrap();
        let request = cli.into_request(&AppSettings::default()).unwrap();
        assert_eq!(request.config.concurrency, usize::MAX);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(parse(&["127.0.0.1", "1", "10", "-q", "-v"]).is_err());
    }
}
