//! Scanner module - the concurrent connect-scan engine.
//!
//! Every port in the target range is probed exactly once. Probes run as
//! spawned tokio tasks, admitted through a semaphore so that no more than
//! `concurrency` connection attempts are ever in flight. Each probe races
//! its connection attempt against a fixed timeout; anything other than a
//! completed handshake counts as "not open" and is dropped.

pub mod tcp;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::types::{PortRange, Target};
use chrono::{DateTime, Local};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, warn};

pub use tcp::TcpConnector;
pub use traits::{Connector, ProbeOutcome};

/// Default number of in-flight probes.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Outcome of a complete scan.
#[derive(Debug, Clone)]
pub struct ScanResults {
    pub target: Target,
    /// Ports that completed a handshake, ascending.
    pub open_ports: BTreeSet<u16>,
    pub ports_scanned: usize,
    /// Wall-clock time just before the first probe was dispatched.
    pub started_at: DateTime<Local>,
    /// Wall-clock time after the last probe finished.
    pub completed_at: DateTime<Local>,
    pub duration: Duration,
}

impl ScanResults {
    /// Check whether `port` was found open.
    pub fn is_open(&self, port: u16) -> bool {
        self.open_ports.contains(&port)
    }
}

/// Tuning knobs for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum number of concurrent connection attempts.
    pub concurrency: usize,
    /// Per-probe connection timeout.
    pub timeout: Duration,
    /// Draw a progress bar on stderr while scanning.
    pub show_progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            show_progress: false,
        }
    }
}

impl ScanConfig {
    /// Create a configuration with the default concurrency and timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable the progress bar.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Reject settings no scan can run with.
    pub fn validate(&self) -> ScanResult<()> {
        if self.concurrency == 0 {
            return Err(ScanError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bounded-concurrency connect scanner.
///
/// Generic over the [`Connector`] so tests can count and observe probes.
pub struct Scanner<C = TcpConnector> {
    connector: Arc<C>,
    config: ScanConfig,
}

impl Scanner<TcpConnector> {
    /// Create a scanner that performs real TCP connects.
    pub fn new(config: ScanConfig) -> Self {
        Self::with_connector(TcpConnector::new(), config)
    }
}

impl<C: Connector + 'static> Scanner<C> {
    /// Create a scanner backed by a custom connector.
    pub fn with_connector(connector: C, config: ScanConfig) -> Self {
        Self {
            connector: Arc::new(connector),
            config,
        }
    }

    /// Scan `host` over `[start_port, end_port]` and return the open ports.
    ///
    /// The range and configuration are validated before the host is
    /// resolved, so a bad range never costs a DNS lookup or a probe.
    pub async fn scan(
        &self,
        host: &str,
        start_port: u32,
        end_port: u32,
    ) -> ScanResult<BTreeSet<u16>> {
        let ports = PortRange::from_bounds(start_port, end_port)?;
        self.config.validate()?;
        let target = Target::resolve(host, ports).await?;
        Ok(self.scan_target(&target).await?.open_ports)
    }

    /// Probe every port of `target` and collect the open ones.
    ///
    /// Blocks until every dispatched probe has completed. An unreachable
    /// host yields an empty set, not an error.
    pub async fn scan_target(&self, target: &Target) -> ScanResult<ScanResults> {
        self.config.validate()?;

        let ports = target.ports();
        let ip = target.ip();
        let probe_timeout = self.config.timeout;

        // More permits than ports buys nothing, and keeps the semaphore
        // below its permit ceiling.
        let limit = self.config.concurrency.min(ports.len());

        info!(
            target = %target,
            ports = %ports,
            count = ports.len(),
            concurrency = limit,
            timeout_ms = probe_timeout.as_millis() as u64,
            "starting scan"
        );

        let progress = self.config.show_progress.then(|| new_progress_bar(ports.len()));

        let semaphore = Arc::new(Semaphore::new(limit));

        let started_at = Local::now();
        let clock = Instant::now();

        let mut probes = stream::iter(ports.iter())
            .map(|port| {
                dispatch(
                    Arc::clone(&semaphore),
                    Arc::clone(&self.connector),
                    progress.clone(),
                    SocketAddr::new(ip, port),
                    probe_timeout,
                )
            })
            .buffer_unordered(limit);

        // A failed task does not stop the drain: every dispatched task is
        // awaited before the first failure is returned.
        let mut open_ports = BTreeSet::new();
        let mut failure = None;
        while let Some(result) = probes.next().await {
            match result {
                Ok((port, outcome)) if outcome.is_open() => {
                    open_ports.insert(port);
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "scan task failed");
                    failure.get_or_insert(e);
                }
            }
        }
        drop(probes);

        let duration = clock.elapsed();
        let completed_at = Local::now();

        if let Some(pb) = &progress {
            pb.finish_with_message("Scan complete");
        }

        if let Some(e) = failure {
            return Err(e);
        }

        info!(
            target = %target,
            open = open_ports.len(),
            elapsed_ms = duration.as_millis() as u64,
            "scan complete"
        );

        Ok(ScanResults {
            target: target.clone(),
            open_ports,
            ports_scanned: ports.len(),
            started_at,
            completed_at,
            duration,
        })
    }
}

/// Scan `host` with real TCP connects and the default timeout.
///
/// Fails with [`ScanError::InvalidRange`] if `start_port > end_port` or
/// either bound lies outside 0-65535.
pub async fn scan(
    host: &str,
    start_port: u32,
    end_port: u32,
    max_concurrency: usize,
) -> ScanResult<BTreeSet<u16>> {
    Scanner::new(ScanConfig::new().with_concurrency(max_concurrency))
        .scan(host, start_port, end_port)
        .await
}

/// Admit one probe through `semaphore` and run it on its own task.
///
/// The permit moves into the task, so it is held until the probe finishes
/// even if the returned future is dropped.
async fn dispatch<C: Connector + 'static>(
    semaphore: Arc<Semaphore>,
    connector: Arc<C>,
    progress: Option<ProgressBar>,
    addr: SocketAddr,
    limit: Duration,
) -> ScanResult<(u16, ProbeOutcome)> {
    let permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| ScanError::TaskFailed(e.to_string()))?;

    let task = tokio::spawn(async move {
        let _permit = permit;
        let outcome = probe(connector.as_ref(), addr, limit).await;

        if let Some(ref pb) = progress {
            pb.inc(1);
            if outcome.is_open() {
                pb.set_message(format!("Found open port: {}", addr.port()));
            }
        }

        (addr.port(), outcome)
    });

    task.await.map_err(|e| ScanError::TaskFailed(e.to_string()))
}

/// Run one connection attempt against `addr`, bounded by `limit`.
///
/// On timeout the pending connect future is dropped, which releases its
/// socket before the caller's permit is returned.
async fn probe<C: Connector + ?Sized>(
    connector: &C,
    addr: SocketAddr,
    limit: Duration,
) -> ProbeOutcome {
    match timeout(limit, connector.connect(addr)).await {
        Ok(Ok(())) => {
            debug!(%addr, "port open");
            ProbeOutcome::Open
        }
        Ok(Err(e)) => {
            debug!(%addr, error = %e, "probe failed");
            ProbeOutcome::Closed
        }
        Err(_) => {
            debug!(%addr, "probe timed out");
            ProbeOutcome::TimedOut
        }
    }
}

fn new_progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}
