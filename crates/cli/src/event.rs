// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test outcome events.
//!
//! The runner emits one event per test attempt. Streams are JSON Lines: one
//! camelCase JSON object per line, blank lines ignored.

use std::borrow::Cow;
use std::io::BufRead;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Attachment name that carries an accessibility scan payload.
pub const SCAN_ATTACHMENT_NAME: &str = "Accessibility Test Results";

/// Raw attempt status as reported by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Passed,
    Failed,
    Flaky,
    TimedOut,
    Interrupted,
    Skipped,
}

impl TestStatus {
    /// Statuses counted as a failure.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            TestStatus::Failed | TestStatus::Flaky | TestStatus::TimedOut | TestStatus::Interrupted
        )
    }
}

/// Error attached to a failed attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    /// Thrown value; any JSON shape.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub stack: Option<String>,
}

/// Named blob attached to an attempt.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Inline UTF-8 body.
    #[serde(default)]
    pub body: Option<String>,
    /// Body stored on disk.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Attachment {
    /// Resolve the body, reading from `path` when no inline body is present.
    pub fn read_body(&self) -> Result<Cow<'_, str>> {
        if let Some(body) = &self.body {
            return Ok(Cow::Borrowed(body));
        }
        match &self.path {
            Some(path) => std::fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| Error::Io {
                    path: path.clone(),
                    source: e,
                }),
            None => Err(Error::Payload {
                message: format!("attachment `{}` has no body", self.name),
            }),
        }
    }
}

/// One test attempt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcomeEvent {
    pub title: String,
    #[serde(default)]
    pub project_id: String,
    pub status: TestStatus,
    /// Attempt duration in milliseconds.
    #[serde(default)]
    pub duration: u64,
    /// Zero-based attempt index.
    #[serde(default)]
    pub retry: u32,
    /// Retries allowed for this test.
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub stdout: Vec<String>,
    #[serde(default)]
    pub stderr: Vec<String>,
}

impl TestOutcomeEvent {
    /// A failed attempt that a later retry will supersede.
    pub fn is_superseded(&self) -> bool {
        self.status == TestStatus::Failed && self.retry < self.retries
    }

    /// First attachment carrying a scan payload.
    pub fn scan_attachment(&self) -> Option<&Attachment> {
        self.attachments
            .iter()
            .find(|a| a.name == SCAN_ATTACHMENT_NAME)
    }
}

/// Parse one JSON-Lines record. Blank lines yield `None`.
pub fn parse_event_line(line: &str) -> Result<Option<TestOutcomeEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| Error::Payload {
            message: format!("invalid outcome event: {e}"),
        })
}

/// Read every event from a JSON-Lines stream, calling `sink` for each.
///
/// Malformed lines, including ones that are not valid UTF-8, are logged and
/// skipped. Returns the number of events delivered; only a read failure on
/// the stream itself is an error.
pub fn read_events<R: BufRead>(
    reader: R,
    source: &str,
    mut sink: impl FnMut(TestOutcomeEvent),
) -> std::io::Result<usize> {
    let mut delivered = 0;
    for (index, raw) in reader.split(b'\n').enumerate() {
        let line = match String::from_utf8(raw?) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(source, line = index + 1, error = %e, "skipping non-UTF-8 event line");
                continue;
            }
        };
        match parse_event_line(&line) {
            Ok(Some(event)) => {
                sink(event);
                delivered += 1;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(source, line = index + 1, error = %e, "skipping malformed event");
            }
        }
    }
    Ok(delivered)
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
