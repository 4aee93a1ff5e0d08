//! Config file discovery.
//!
//! An explicit `-C`/`A11YREPORT_CONFIG` path wins; otherwise the nearest
//! a11yreport.toml between the working directory and the enclosing git root
//! is used. With neither, the run uses default settings.

use std::path::{Path, PathBuf};

use crate::config::{self, CONFIG_FILE_NAME, Config};
use crate::error::{Error, Result};

/// Where the run's configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Discovered(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => Some(path),
            ConfigSource::Defaults => None,
        }
    }
}

/// Nearest a11yreport.toml at or above `start_dir`, not crossing a git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Pick the config source. A missing explicit path is an error.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<ConfigSource> {
    let Some(path) = explicit else {
        return Ok(find_config(cwd).map_or(ConfigSource::Defaults, ConfigSource::Discovered));
    };
    if !path.exists() {
        return Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(ConfigSource::Explicit(path.to_path_buf()))
}

/// Resolve and load the config.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    let source = resolve_config(explicit, cwd)?;
    match source.path() {
        Some(path) => {
            tracing::debug!(source = ?source, "loading config");
            config::load(path)
        }
        None => {
            tracing::debug!("no config file found; using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
