// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run record export.
//!
//! Serializes the retained results with the git branch, repository and a
//! timestamp, for dashboards that track results across runs.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::AggregatedResult;
use crate::context::RunContext;
use crate::error::{Error, Result};

/// Persisted view of a finished run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord<'a> {
    pub git_branch: &'a str,
    /// Repository name without its owner.
    pub git_repo: &'a str,
    pub results: &'a [AggregatedResult],
    pub timestamp: DateTime<Utc>,
}

impl<'a> RunRecord<'a> {
    pub fn new(
        context: &'a RunContext,
        results: &'a [AggregatedResult],
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            git_branch: context.git_branch(),
            git_repo: context.git_repo(),
            results,
            timestamp,
        }
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Internal(format!("failed to serialize run record: {e}")))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, json + "\n").map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), results = self.results.len(), "run record written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
