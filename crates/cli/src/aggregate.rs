// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result aggregation.
//!
//! Collapses retried attempts, classifies statuses, and keeps the running
//! tally plus every accessibility scan payload seen during the run.
//!
//! Tests finish on many workers at once, but the tally has exactly one
//! writer: [`ResultAggregator::spawn`] moves the aggregator onto a worker
//! thread fed by an unbounded channel, and every producer holds a cloned
//! [`EventSender`].

use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};
use serde::Serialize;

use crate::ansi::strip_ansi_opt;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::event::{TestOutcomeEvent, TestStatus};
use crate::scan::{AccessibilityScanResult, parse_scan_payload};
use crate::title::{Env, parse_title};

/// Status kept for a retained attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalStatus {
    Passed,
    Failed,
    Skipped,
}

impl From<TestStatus> for FinalStatus {
    fn from(status: TestStatus) -> Self {
        match status {
            TestStatus::Passed => FinalStatus::Passed,
            TestStatus::Skipped => FinalStatus::Skipped,
            TestStatus::Failed
            | TestStatus::Flaky
            | TestStatus::TimedOut
            | TestStatus::Interrupted => FinalStatus::Failed,
        }
    }
}

/// One logical test after retry collapsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    pub title: String,
    pub name: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub env: Env,
    pub browser: String,
    pub branch: Option<String>,
    pub repo: Option<String>,
    pub status: FinalStatus,
    pub error_message: Option<String>,
    pub error_value: Option<serde_json::Value>,
    pub error_stack: Option<String>,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    /// Milliseconds.
    pub duration: u64,
    pub retry: u32,
}

impl AggregatedResult {
    /// Parsed name, or the raw title when the title had no marker.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.title)
    }
}

/// Run-level state accumulated by the aggregator.
#[derive(Debug, Clone, Default)]
pub struct RunTally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<AggregatedResult>,
    pub scan_results: Vec<AccessibilityScanResult>,
}

impl RunTally {
    /// Retained tests (one per logical test).
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &AggregatedResult> {
        self.results
            .iter()
            .filter(|r| r.status == FinalStatus::Failed)
    }
}

/// Applies outcome events to a [`RunTally`].
pub struct ResultAggregator {
    config: Arc<Config>,
    tally: RunTally,
}

impl ResultAggregator {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            tally: RunTally::default(),
        }
    }

    /// Fold one completed attempt into the tally.
    ///
    /// Never fails: unreadable scan attachments are logged and skipped.
    pub fn on_test_complete(&mut self, event: TestOutcomeEvent) {
        if event.is_superseded() {
            tracing::debug!(
                title = %event.title,
                retry = event.retry,
                retries = event.retries,
                "discarding failed attempt; retry pending"
            );
            return;
        }

        if let Some(attachment) = event.scan_attachment() {
            match attachment
                .read_body()
                .and_then(|body| parse_scan_payload(&body))
            {
                Ok(scan) => self.tally.scan_results.push(scan),
                Err(e) => {
                    tracing::warn!(title = %event.title, error = %e, "skipping scan attachment");
                }
            }
        }

        let meta = parse_title(&event.title, &event.project_id, &self.config);
        let status = FinalStatus::from(event.status);
        match status {
            FinalStatus::Passed => self.tally.passed += 1,
            FinalStatus::Failed => self.tally.failed += 1,
            FinalStatus::Skipped => self.tally.skipped += 1,
        }

        let error = event.error.unwrap_or_default();
        self.tally.results.push(AggregatedResult {
            title: event.title,
            name: meta.name,
            tags: meta.tags,
            url: meta.url,
            env: meta.env,
            browser: meta.browser,
            branch: meta.branch,
            repo: meta.repo,
            status,
            error_message: strip_ansi_opt(error.message),
            error_value: error.value,
            error_stack: strip_ansi_opt(error.stack),
            stdout: event.stdout,
            stderr: event.stderr,
            duration: event.duration,
            retry: event.retry,
        });
    }

    pub fn tally(&self) -> &RunTally {
        &self.tally
    }

    pub fn into_tally(self) -> RunTally {
        self.tally
    }

    /// Move the aggregator onto its own thread behind a channel.
    pub fn spawn(self) -> Result<AggregatorHandle> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let worker = std::thread::Builder::new()
            .name("aggregator".to_string())
            .spawn(move || self.drain(receiver))
            .map_err(|e| Error::Internal(format!("failed to spawn aggregator: {e}")))?;
        Ok(AggregatorHandle { sender, worker })
    }

    fn drain(mut self, receiver: Receiver<TestOutcomeEvent>) -> RunTally {
        for event in receiver {
            self.on_test_complete(event);
        }
        self.into_tally()
    }
}

/// Producer side of the aggregation channel.
#[derive(Clone)]
pub struct EventSender(Sender<TestOutcomeEvent>);

impl EventSender {
    /// Queue an event. Returns false if the aggregator has already stopped.
    pub fn send(&self, event: TestOutcomeEvent) -> bool {
        match self.0.send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(title = %e.into_inner().title, "aggregator stopped; event dropped");
                false
            }
        }
    }
}

/// Owner of the aggregation worker.
pub struct AggregatorHandle {
    sender: Sender<TestOutcomeEvent>,
    worker: JoinHandle<RunTally>,
}

impl AggregatorHandle {
    pub fn sender(&self) -> EventSender {
        EventSender(self.sender.clone())
    }

    /// Close the channel and wait for the final tally.
    ///
    /// Blocks until every [`EventSender`] has been dropped and all queued
    /// events are applied.
    pub fn finish(self) -> Result<RunTally> {
        drop(self.sender);
        self.worker
            .join()
            .map_err(|_| Error::Internal("aggregator thread panicked".to_string()))
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
