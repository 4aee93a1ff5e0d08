// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort webhook notification.
//!
//! The run summary is posted as `{"summary": "..."}` to the webhook named by
//! the run context. Delivery happens on a detached thread; its outcome is
//! reported through a [`DispatchHandle`] and never affects the run.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use reqwest::header::{HeaderValue, USER_AGENT};
use serde::Serialize;

use crate::config::NotifySettings;
use crate::context::RunContext;
use crate::error::{Error, Result};

const USER_AGENT_VALUE: &str = concat!("a11yreport/", env!("CARGO_PKG_VERSION"));

/// Extra time [`DispatchHandle::wait`] allows beyond the request timeout.
const WAIT_GRACE: Duration = Duration::from_secs(2);

/// Webhook request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub summary: String,
}

impl NotificationPayload {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }
}

/// Posts payloads to one webhook.
#[derive(Debug, Clone)]
pub struct Notifier {
    webhook_url: String,
    timeout: Duration,
}

impl Notifier {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            timeout,
        }
    }

    /// Notifier for the context's webhook; `None` when no webhook is set.
    pub fn from_context(context: &RunContext, settings: &NotifySettings) -> Option<Self> {
        context
            .webhook_url
            .as_ref()
            .map(|url| Self::new(url.clone(), settings.timeout()))
    }

    /// Post synchronously.
    pub fn send(&self, payload: &NotificationPayload) -> Result<()> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Notify {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let response = client
            .post(&self.webhook_url)
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .json(payload)
            .send()
            .map_err(|e| Error::Notify {
                message: format!("webhook request failed: {e}"),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Notify {
                message: format!("webhook returned {status}"),
            })
        }
    }

    /// Post on a detached thread.
    ///
    /// Failures are logged on the worker and surfaced through the handle;
    /// they are never returned to the caller.
    pub fn dispatch(self, payload: NotificationPayload) -> DispatchHandle {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let deadline = self.timeout + WAIT_GRACE;

        let spawned = std::thread::Builder::new()
            .name("notify".to_string())
            .spawn(move || {
                let outcome = match self.send(&payload) {
                    Ok(()) => {
                        tracing::info!("run summary published");
                        DispatchOutcome::Delivered
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to publish run summary");
                        DispatchOutcome::Failed(e.to_string())
                    }
                };
                // The handle may already be gone.
                let _ = sender.send(outcome);
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "failed to start notification worker");
        }
        DispatchHandle { receiver, deadline }
    }
}

/// Result of a dispatched notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed(String),
    /// No outcome arrived before the deadline.
    TimedOut,
}

/// Waits, with a bound, for a dispatched notification.
#[derive(Debug)]
pub struct DispatchHandle {
    receiver: Receiver<DispatchOutcome>,
    deadline: Duration,
}

impl DispatchHandle {
    /// Block until the worker reports or the deadline passes.
    pub fn wait(self) -> DispatchOutcome {
        match self.receiver.recv_timeout(self.deadline) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(deadline = ?self.deadline, "gave up waiting for notification");
                DispatchOutcome::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => {
                DispatchOutcome::Failed("notification worker exited".to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
