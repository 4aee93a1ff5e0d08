// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-of-run summary.
//!
//! [`RunSummaryReporter::finalize`] runs once, after the aggregator has
//! drained: it computes the summary, writes the accessibility report when
//! scan results exist, and dispatches the webhook notification.

use std::io;
use std::path::{Path, PathBuf};

use termcolor::WriteColor;

use crate::aggregate::RunTally;
use crate::color::scheme;
use crate::config::Config;
use crate::context::RunContext;
use crate::notify::{DispatchHandle, NotificationPayload, Notifier};
use crate::report::AccessibilityReportBuilder;

const HEADING: &str = "---------Test Run Summary------------";
const FAILURES_HEADING: &str = "-------- Test Failures --------";
const FAILURE_SEPARATOR: &str = "--------------------------------------------";

/// `count / total * 100`, rounded to two decimals; 0 when `total` is 0.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// One failed test in the failure listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureEntry {
    pub name: String,
    pub error_stack: Option<String>,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pass_percentage: f64,
    pub fail_percentage: f64,
    pub app_url: String,
    pub executed_on: String,
    pub run_url: String,
    pub run_name: String,
    pub failures: Vec<FailureEntry>,
}

impl RunSummary {
    pub fn new(tally: &RunTally, context: &RunContext, config: &Config) -> Self {
        let total = tally.total();
        Self {
            total,
            passed: tally.passed,
            failed: tally.failed,
            skipped: tally.skipped,
            pass_percentage: percentage(tally.passed, total),
            fail_percentage: percentage(tally.failed, total),
            app_url: context.app_url(config),
            executed_on: context.executed_on().to_string(),
            run_url: context.run_url(),
            run_name: context.run_name(),
            failures: tally
                .failures()
                .map(|r| FailureEntry {
                    name: r.display_name().to_string(),
                    error_stack: r.error_stack.clone(),
                })
                .collect(),
        }
    }

    /// `(label, value, is_failure)` rows in display order.
    fn rows(&self) -> Vec<(&'static str, String, bool)> {
        vec![
            ("# Total Test executed:", self.total.to_string(), false),
            (
                "# Test Pass          :",
                format!("{} ({:.2}%)", self.passed, self.pass_percentage),
                false,
            ),
            (
                "# Test Fail          :",
                format!("{} ({:.2}%)", self.failed, self.fail_percentage),
                true,
            ),
            ("# Test Skipped       :", self.skipped.to_string(), false),
            ("** Application URL  :", self.app_url.clone(), false),
            ("** Executed on      :", self.executed_on.clone(), false),
            ("** Execution details:", self.run_url.clone(), false),
            ("** Workflow name    :", self.run_name.clone(), false),
        ]
    }

    /// Plain summary block, as sent to the webhook.
    pub fn to_text(&self) -> String {
        let mut text = String::from(HEADING);
        for (label, value, _) in self.rows() {
            text.push('\n');
            text.push_str(label);
            text.push(' ');
            text.push_str(&value);
        }
        text
    }

    /// Summary block followed by the failure listing, with colors.
    pub fn write_to(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        out.set_color(&scheme::heading())?;
        write!(out, "{HEADING}")?;
        out.reset()?;
        writeln!(out)?;

        for (label, value, is_failure) in self.rows() {
            out.set_color(&scheme::label())?;
            write!(out, "{label}")?;
            out.reset()?;
            write!(out, " ")?;
            let spec = if is_failure {
                scheme::fail()
            } else {
                scheme::value()
            };
            out.set_color(&spec)?;
            write!(out, "{value}")?;
            out.reset()?;
            writeln!(out)?;
        }

        self.write_failures(out)
    }

    fn write_failures(&self, out: &mut dyn WriteColor) -> io::Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }
        writeln!(out)?;
        out.set_color(&scheme::failure_header())?;
        write!(out, "{FAILURES_HEADING}")?;
        out.reset()?;
        writeln!(out)?;
        for failure in &self.failures {
            writeln!(out, "Test: {}", failure.name)?;
            writeln!(
                out,
                "Error Stack: {}",
                failure.error_stack.as_deref().unwrap_or("")
            )?;
            writeln!(out, "{FAILURE_SEPARATOR}")?;
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Everything produced by [`RunSummaryReporter::finalize`].
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub report_path: Option<PathBuf>,
    /// Pending notification, when a webhook is configured.
    pub dispatch: Option<DispatchHandle>,
}

/// Finalizes a run.
pub struct RunSummaryReporter<'a> {
    config: &'a Config,
    context: &'a RunContext,
    notify: bool,
}

impl<'a> RunSummaryReporter<'a> {
    pub fn new(config: &'a Config, context: &'a RunContext) -> Self {
        Self {
            config,
            context,
            notify: true,
        }
    }

    /// Skip webhook dispatch even when a webhook is configured.
    pub fn without_notification(mut self) -> Self {
        self.notify = false;
        self
    }

    /// Summarize the tally, write the report, and dispatch the notification.
    ///
    /// Consumes the reporter; a run is finalized once.
    pub fn finalize(self, tally: &RunTally, output_dir: &Path) -> RunOutcome {
        let summary = RunSummary::new(tally, self.context, self.config);

        let report_path = if tally.scan_results.is_empty() {
            tracing::info!("no accessibility scan results collected");
            None
        } else {
            tracing::info!(
                count = tally.scan_results.len(),
                "accessibility scan results collected"
            );
            AccessibilityReportBuilder::new(self.config, self.context)
                .build(&tally.scan_results, output_dir)
        };

        let dispatch = if self.notify {
            Notifier::from_context(self.context, &self.config.notify)
                .map(|notifier| notifier.dispatch(NotificationPayload::new(summary.to_text())))
        } else {
            None
        };

        RunOutcome {
            summary,
            report_path,
            dispatch,
        }
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
