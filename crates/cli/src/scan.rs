// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Accessibility scan payloads.
//!
//! Payloads are produced verbatim by an external scanning engine and attached
//! to test outcomes as JSON. Violations keep the engine's emission order and
//! are never deduplicated.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Violation severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<String>")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
    /// Missing or unrecognized impact.
    #[default]
    Unknown,
}

impl Impact {
    /// Filterable severities, most severe first.
    pub const RANKED: [Impact; 4] = [
        Impact::Critical,
        Impact::Serious,
        Impact::Moderate,
        Impact::Minor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Impact::Critical => "critical",
            Impact::Serious => "serious",
            Impact::Moderate => "moderate",
            Impact::Minor => "minor",
            Impact::Unknown => "unknown",
        }
    }

    /// Capitalized label for headings and buttons.
    pub fn label(self) -> &'static str {
        match self {
            Impact::Critical => "Critical",
            Impact::Serious => "Serious",
            Impact::Moderate => "Moderate",
            Impact::Minor => "Minor",
            Impact::Unknown => "Unknown",
        }
    }
}

impl From<Option<String>> for Impact {
    fn from(raw: Option<String>) -> Self {
        match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("critical") => Impact::Critical,
            Some("serious") => Impact::Serious,
            Some("moderate") => Impact::Moderate,
            Some("minor") => Impact::Minor,
            _ => Impact::Unknown,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page element flagged by a violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedNode {
    /// Raw HTML fragment of the element.
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub failure_summary: Option<String>,
}

/// One rule failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Rule id.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub impact: Impact,
    /// WCAG category tags.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub help_url: Option<String>,
    #[serde(default)]
    pub nodes: Vec<AffectedNode>,
}

/// Scan results for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityScanResult {
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Selector the scan was limited to.
    #[serde(default)]
    pub test_scope: Option<String>,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    // Vec first: a struct would also accept a (possibly empty) sequence.
    Many(Vec<AccessibilityScanResult>),
    One(AccessibilityScanResult),
}

/// Parse one scan payload.
pub fn parse_scan_payload(body: &str) -> Result<AccessibilityScanResult> {
    serde_json::from_str(body).map_err(|e| Error::Payload {
        message: format!("invalid scan payload: {e}"),
    })
}

/// Parse a document holding either one payload or an array of payloads.
pub fn parse_scan_document(body: &str) -> Result<Vec<AccessibilityScanResult>> {
    match serde_json::from_str(body) {
        Ok(OneOrMany::One(result)) => Ok(vec![result]),
        Ok(OneOrMany::Many(results)) => Ok(results),
        Err(e) => Err(Error::Payload {
            message: format!("invalid scan document: {e}"),
        }),
    }
}

/// Violation counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityBreakdown {
    pub critical: usize,
    pub serious: usize,
    pub moderate: usize,
    pub minor: usize,
    pub unknown: usize,
}

impl SeverityBreakdown {
    /// Count every violation across `results`.
    pub fn from_results(results: &[AccessibilityScanResult]) -> Self {
        let mut breakdown = Self::default();
        for violation in results.iter().flat_map(|r| &r.violations) {
            breakdown.record(violation.impact);
        }
        breakdown
    }

    fn record(&mut self, impact: Impact) {
        match impact {
            Impact::Critical => self.critical += 1,
            Impact::Serious => self.serious += 1,
            Impact::Moderate => self.moderate += 1,
            Impact::Minor => self.minor += 1,
            Impact::Unknown => self.unknown += 1,
        }
    }

    pub fn count(&self, impact: Impact) -> usize {
        match impact {
            Impact::Critical => self.critical,
            Impact::Serious => self.serious,
            Impact::Moderate => self.moderate,
            Impact::Minor => self.minor,
            Impact::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.serious + self.moderate + self.minor + self.unknown
    }
}

/// Total violations across all results.
pub fn total_violations(results: &[AccessibilityScanResult]) -> usize {
    results.iter().map(|r| r.violations.len()).sum()
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
