// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use super::*;
use crate::aggregate::ResultAggregator;
use crate::event::{Attachment, ErrorDetail, SCAN_ATTACHMENT_NAME, TestOutcomeEvent, TestStatus};
use crate::notify::DispatchOutcome;
use termcolor::Buffer;
use yare::parameterized;

fn event(title: &str, status: TestStatus) -> TestOutcomeEvent {
    TestOutcomeEvent {
        title: title.to_string(),
        project_id: String::new(),
        status,
        duration: 10,
        retry: 0,
        retries: 0,
        error: None,
        attachments: Vec::new(),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

fn tally(events: Vec<TestOutcomeEvent>) -> RunTally {
    let mut agg = ResultAggregator::new(Arc::new(Config::default()));
    for e in events {
        agg.on_test_complete(e);
    }
    agg.into_tally()
}

fn plain(summary: &RunSummary) -> String {
    let mut buffer = Buffer::no_color();
    summary.write_to(&mut buffer).unwrap();
    String::from_utf8(buffer.into_inner()).unwrap()
}

#[parameterized(
    half = { 1, 2, 50.0 },
    third = { 1, 3, 33.33 },
    two_thirds = { 2, 3, 66.67 },
    all = { 4, 4, 100.0 },
    none = { 0, 4, 0.0 },
    zero_total = { 0, 0, 0.0 },
)]
fn percentage_rounds_to_two_decimals(count: usize, total: usize, expected: f64) {
    assert_eq!(percentage(count, total), expected);
}

#[test]
fn empty_run_reports_zero_percent() {
    let summary = RunSummary::new(&RunTally::default(), &RunContext::default(), &Config::default());
    assert_eq!(summary.total, 0);
    assert_eq!(summary.pass_percentage, 0.0);
    assert!(summary.to_text().contains("# Test Pass          : 0 (0.00%)"));
    assert!(!summary.to_text().contains("NaN"));
}

#[test]
fn text_block_lists_counts_and_run_info() {
    let tally = tally(vec![
        event("[A] @a", TestStatus::Passed),
        event("[B] @b", TestStatus::Failed),
        event("[C] @c", TestStatus::Skipped),
    ]);
    let summary = RunSummary::new(&tally, &RunContext::default(), &Config::default());
    let text = summary.to_text();

    similar_asserts::assert_eq!(
        text,
        "---------Test Run Summary------------\n\
         # Total Test executed: 3\n\
         # Test Pass          : 1 (33.33%)\n\
         # Test Fail          : 1 (33.33%)\n\
         # Test Skipped       : 1\n\
         ** Application URL  : unknown\n\
         ** Executed on      : Local Environment\n\
         ** Execution details: Local Environment\n\
         ** Workflow name    : Local Run"
    );
}

#[test]
fn failure_listing_follows_summary() {
    let mut failed = event("[B] @checkout @smoke", TestStatus::TimedOut);
    failed.error = Some(ErrorDetail {
        message: Some("timeout".to_string()),
        value: None,
        stack: Some("at checkout.spec.js:12".to_string()),
    });
    let tally = tally(vec![event("[A] @a", TestStatus::Passed), failed]);
    let summary = RunSummary::new(&tally, &RunContext::default(), &Config::default());
    let output = plain(&summary);

    let heading = output.find("-------- Test Failures --------").unwrap();
    assert!(heading > output.find("** Workflow name").unwrap());
    assert!(output.contains("Test: checkout\nError Stack: at checkout.spec.js:12\n"));
    assert!(!summary.to_text().contains("Test Failures"));
}

#[test]
fn no_failure_listing_when_all_pass() {
    let tally = tally(vec![event("[A] @a", TestStatus::Passed)]);
    let summary = RunSummary::new(&tally, &RunContext::default(), &Config::default());
    assert!(!plain(&summary).contains("Test Failures"));
}

#[test]
fn colored_output_contains_escapes() {
    let summary = RunSummary::new(&RunTally::default(), &RunContext::default(), &Config::default());
    let mut buffer = Buffer::ansi();
    summary.write_to(&mut buffer).unwrap();
    let output = String::from_utf8(buffer.into_inner()).unwrap();
    assert!(output.contains("\u{1b}["));
    assert_eq!(crate::ansi::strip_ansi(&output), plain(&summary));
}

#[test]
fn finalize_without_scans_writes_no_report() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out");
    let tally = tally(vec![event("[A] @a", TestStatus::Passed)]);
    let config = Config::default();
    let context = RunContext::default();

    let outcome = RunSummaryReporter::new(&config, &context).finalize(&tally, &out);

    assert!(outcome.report_path.is_none());
    assert!(outcome.dispatch.is_none());
    assert!(!out.exists());
    assert_eq!(outcome.summary.passed, 1);
}

#[test]
fn finalize_writes_report_for_scans() {
    let tmp = tempfile::tempdir().unwrap();
    let mut passed = event("[A] @a", TestStatus::Passed);
    passed.attachments.push(Attachment {
        name: SCAN_ATTACHMENT_NAME.to_string(),
        content_type: None,
        body: Some(r#"{"testName": "a", "violations": [{"id": "x", "impact": "critical"}]}"#.to_string()),
        path: None,
    });
    let tally = tally(vec![passed]);
    let config = Config::default();
    let context = RunContext::default();

    let outcome = RunSummaryReporter::new(&config, &context).finalize(&tally, tmp.path());

    let path = outcome.report_path.unwrap();
    assert!(path.starts_with(tmp.path()));
    assert!(std::fs::read_to_string(path).unwrap().contains("Critical: 1"));
}

#[test]
fn notification_failure_does_not_affect_outcome() {
    let tmp = tempfile::tempdir().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = Config::default();
    config.notify.timeout_secs = 2;
    let context = RunContext {
        webhook_url: Some(format!("http://{addr}/hook")),
        ..RunContext::default()
    };
    let tally = tally(vec![event("[A] @a", TestStatus::Passed)]);

    let outcome = RunSummaryReporter::new(&config, &context).finalize(&tally, tmp.path());

    assert_eq!(outcome.summary.passed, 1);
    let outcome = outcome.dispatch.unwrap().wait();
    assert!(matches!(outcome, DispatchOutcome::Failed(_)));
}

#[test]
fn without_notification_skips_dispatch() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::default();
    let context = RunContext {
        webhook_url: Some("http://127.0.0.1:9/hook".to_string()),
        ..RunContext::default()
    };

    let outcome = RunSummaryReporter::new(&config, &context)
        .without_notification()
        .finalize(&RunTally::default(), tmp.path());

    assert!(outcome.dispatch.is_none());
}
