// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Accessibility report generation.
//!
//! Turns the scan results gathered during a run into one timestamped HTML
//! file. Failures to write are logged and never propagate.

pub mod html;

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::Config;
use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::scan::{AccessibilityScanResult, total_violations};

pub use html::{ReportMeta, escape_html};

/// Builds and writes the HTML report.
pub struct AccessibilityReportBuilder<'a> {
    config: &'a Config,
    context: &'a RunContext,
}

impl<'a> AccessibilityReportBuilder<'a> {
    pub fn new(config: &'a Config, context: &'a RunContext) -> Self {
        Self { config, context }
    }

    /// Write the report for `results`, returning its path.
    ///
    /// Returns `None` without touching the filesystem when there are no
    /// results, and `None` after logging when the write fails.
    pub fn build(&self, results: &[AccessibilityScanResult], output_dir: &Path) -> Option<PathBuf> {
        self.build_at(results, output_dir, Utc::now())
    }

    /// [`build`](Self::build) with a fixed clock.
    pub fn build_at(
        &self,
        results: &[AccessibilityScanResult],
        output_dir: &Path,
        now: DateTime<Utc>,
    ) -> Option<PathBuf> {
        if results.is_empty() {
            tracing::info!("no accessibility violations to report");
            return None;
        }

        let dir = self.context.report_output_dir(output_dir);
        let path = dir.join(report_file_name(&self.config.report.prefix, now));
        tracing::info!(
            results = results.len(),
            violations = total_violations(results),
            "rendering accessibility report"
        );

        let document = self.render(results, now);
        match write_report(&path, &document) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "accessibility report saved");
                Some(path)
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to save accessibility report");
                None
            }
        }
    }

    /// Render the document without writing it.
    pub fn render(&self, results: &[AccessibilityScanResult], now: DateTime<Utc>) -> String {
        let env_url = self.context.report_env_url(self.config);
        let meta = ReportMeta {
            title: &self.config.report.title,
            test_run_type: self.context.test_run_type(),
            triggered_by: self.context.triggered_by(&self.config.report),
            env_url: &env_url,
            run_time: now,
        };
        html::render(results, &meta)
    }
}

/// `<prefix>-report-<timestamp>.html`, with `:` and `.` in the RFC 3339
/// timestamp replaced by `-`.
pub fn report_file_name(prefix: &str, time: DateTime<Utc>) -> String {
    let stamp = time
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{prefix}-report-{stamp}.html")
}

fn write_report(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, document).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
