// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles a11yreport.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Supported config file version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Config file name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "a11yreport.toml";

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    #[allow(dead_code)]
    #[serde(default)]
    base_url: Option<toml::Value>,

    #[allow(dead_code)]
    #[serde(default)]
    projects: Option<toml::Value>,

    #[allow(dead_code)]
    #[serde(default)]
    report: Option<toml::Value>,

    #[allow(dead_code)]
    #[serde(default)]
    notify: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Global base URL, used when a test's project has none.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Browser/environment profiles, matched by project id.
    #[serde(default)]
    pub projects: Vec<ProjectProfile>,

    /// Report output settings.
    #[serde(default)]
    pub report: ReportSettings,

    /// Notification settings.
    #[serde(default)]
    pub notify: NotifySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            base_url: None,
            projects: Vec::new(),
            report: ReportSettings::default(),
            notify: NotifySettings::default(),
        }
    }
}

impl Config {
    /// Find the profile whose name matches a project id.
    pub fn project(&self, id: &str) -> Option<&ProjectProfile> {
        self.projects.iter().find(|p| p.name == id)
    }

    /// Base URL of the first configured project, else the global base URL.
    pub fn primary_base_url(&self) -> Option<&str> {
        self.projects
            .first()
            .and_then(|p| p.base_url.as_deref())
            .or(self.base_url.as_deref())
    }
}

/// One configured project (browser + target environment).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectProfile {
    pub name: String,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Default browser type for this project.
    #[serde(default)]
    pub browser: Option<String>,
}

/// Report output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// File name prefix: `<prefix>-report-<timestamp>.html`.
    pub prefix: String,
    /// Output directory for local runs.
    pub output_dir: PathBuf,
    /// Output root for CI runs.
    pub ci_dir: PathBuf,
    /// Actor shown for runs not triggered through GitHub.
    pub triggered_by: String,
    /// Document title and banner heading.
    pub title: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            prefix: "a11y".to_string(),
            output_dir: PathBuf::from("test-results"),
            ci_dir: PathBuf::from("a11y-reports"),
            triggered_by: "QE".to_string(),
            title: "Accessibility Test Report".to_string(),
        }
    }
}

/// Notification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    /// Webhook request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl NotifySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load and parse config from a file, warning on unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;
    for key in flexible.unknown.keys().filter(|k| k.as_str() != "version") {
        warn_unknown_key(path, key);
    }

    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

/// Warn about unknown configuration key.
fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "a11yreport: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
