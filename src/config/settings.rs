//! Application settings and paths.
//!
//! Settings live in `settings.json` under the XDG config directory
//! (`~/.config/portscout` on Linux). A missing file means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::report::DEFAULT_REPORT_PATH;
use crate::scanner::{ScanConfig, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portscout)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform configuration directory.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portscout", "portscout")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default concurrency level.
    pub default_concurrency: usize,
    /// Default per-probe timeout in milliseconds.
    pub default_timeout_ms: u64,
    /// Where the report goes when `--report` is not given.
    pub default_report_path: PathBuf,
    /// Show a progress bar without needing `--verbose`.
    pub show_progress: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_concurrency: DEFAULT_CONCURRENCY,
            default_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            default_report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            show_progress: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no settings file exists.
    pub fn load() -> ConfigResult<Self> {
        let file = match Paths::discover() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using defaults");
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Scan configuration these settings describe.
    pub fn scan_config(&self) -> ScanConfig {
        let config = ScanConfig::new()
            .with_concurrency(self.default_concurrency)
            .with_timeout(Duration::from_millis(self.default_timeout_ms));

        if self.show_progress {
            config.with_progress()
        } else {
            config
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_concurrency, 50);
        assert_eq!(settings.default_timeout_ms, 1000);
        assert_eq!(settings.default_report_path, PathBuf::from("scan_report.txt"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_concurrency": 200}}"#).unwrap();

        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.default_concurrency, 200);
        assert_eq!(settings.default_timeout_ms, 1000);
        assert!(!settings.show_progress);
    }

    #[test]
    fn test_malformed_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "concurrency = 10").unwrap();

        let err = AppSettings::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_missing_explicit_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppSettings::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }

    #[test]
    fn test_scan_config_from_settings() {
        let settings = AppSettings {
            default_concurrency: 8,
            default_timeout_ms: 250,
            show_progress: true,
            ..AppSettings::default()
        };

        let config = settings.scan_config();
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.show_progress);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.default_concurrency, settings.default_concurrency);
        assert_eq!(parsed.default_report_path, settings.default_report_path);
    }
}
