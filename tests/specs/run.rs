//! Behavioral specs for `a11yreport run`.

use crate::prelude::*;

/// > Retries are collapsed, each test counts once, and percentages use two
/// > decimal places.
#[test]
fn run_prints_summary_for_sharded_events() {
    let dir = temp_project();
    let out = dir.path().join("reports");

    a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "-o"])
        .arg(&out)
        .arg("--events")
        .arg(fixture("events/shard1.jsonl"))
        .arg(fixture("events/shard2.jsonl"))
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("# Total Test executed: 4"))
        .stdout(predicates::str::contains("1 (25.00%)"))
        .stdout(predicates::str::contains("2 (50.00%)"))
        .stdout(predicates::str::contains("** Workflow name    : Local Run"))
        .stdout(predicates::str::contains("Accessibility report saved at:"));
}

/// > Failures are listed with their test name and cleaned error stack.
#[test]
fn run_lists_failed_tests() {
    let dir = temp_project();
    let out = dir.path().join("reports");

    let assert = a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "-o"])
        .arg(&out)
        .arg("--events")
        .arg(fixture("events/shard1.jsonl"))
        .arg(fixture("events/shard2.jsonl"))
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Test: "))
        .stdout(predicates::str::contains("Error Stack:"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains('\u{1b}'), "escape codes leaked: {stdout}");
}

/// > A run with scan attachments writes an HTML report with escaped markup.
#[test]
fn run_writes_escaped_html_report() {
    let dir = temp_project();
    let out = dir.path().join("reports");

    a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "-o"])
        .arg(&out)
        .arg("--events")
        .arg(fixture("events/shard1.jsonl"))
        .current_dir(dir.path())
        .assert()
        .success();

    let reports = reports_in(&out);
    assert_eq!(reports.len(), 1, "expected one report in {}", out.display());
    let name = reports[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("a11y-report-"), "{name}");

    let html = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>alert"));
    assert!(html.contains("No nodes affected"));
}

/// > Runs without scan results produce no report file.
#[test]
fn run_without_scans_writes_no_report() {
    let dir = temp_project();
    let out = dir.path().join("reports");

    a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "-o"])
        .arg(&out)
        .arg("--events")
        .arg(fixture("events/all-passed.jsonl"))
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("# Total Test executed: 1"))
        .stdout(predicates::str::contains("Accessibility report saved at:").not());

    assert!(reports_in(&out).is_empty());
}

/// > --results-json writes the machine-readable run record.
#[test]
fn run_writes_results_json() {
    let dir = temp_project();
    let record = dir.path().join("results.json");

    a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "--results-json"])
        .arg(&record)
        .arg("--events")
        .arg(fixture("events/shard1.jsonl"))
        .arg(fixture("events/shard2.jsonl"))
        .arg("-o")
        .arg(dir.path().join("reports"))
        .current_dir(dir.path())
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&record).unwrap()).unwrap();
    assert_eq!(json["gitBranch"], "local");
    assert_eq!(json["gitRepo"], "local");
    assert_eq!(json["results"].as_array().unwrap().len(), 4);
    assert!(json["timestamp"].is_string());
}

/// > Events can be piped on stdin with `-`.
#[test]
fn run_reads_events_from_stdin() {
    let dir = temp_project();
    let events = std::fs::read_to_string(fixture("events/all-passed.jsonl")).unwrap();

    a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "--events", "-"])
        .current_dir(dir.path())
        .write_stdin(events)
        .assert()
        .success()
        .stdout(predicates::str::contains("# Total Test executed: 1"));
}

/// > Missing events file is an argument error (exit 2)
#[test]
fn run_missing_events_file_fails() {
    let dir = temp_project();

    a11yreport_cmd()
        .args(["run", "--no-notify", "--events", "missing.jsonl"])
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("events file not found"));
}

/// > --events is required
#[test]
fn run_requires_events() {
    a11yreport_cmd().arg("run").assert().code(2);
}

/// > --color and --no-color conflict
#[test]
fn run_color_flags_conflict() {
    a11yreport_cmd()
        .args(["run", "--color", "--no-color", "--events", "x.jsonl"])
        .assert()
        .code(2);
}

/// > --color forces escape codes even when stdout is not a terminal.
#[test]
fn run_color_forces_escape_codes() {
    let dir = temp_project();

    a11yreport_cmd()
        .args(["run", "--color", "--no-notify", "-o"])
        .arg(dir.path().join("reports"))
        .arg("--events")
        .arg(fixture("events/all-passed.jsonl"))
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("\u{1b}["));
}

/// > On CI, REPORT_DIR overrides the requested output directory.
#[test]
fn run_on_ci_uses_report_dir() {
    let dir = temp_project();
    let requested = dir.path().join("requested");
    let override_dir = dir.path().join("override");

    a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "-o"])
        .arg(&requested)
        .arg("--events")
        .arg(fixture("events/shard1.jsonl"))
        .current_dir(dir.path())
        .env("CIRCLECI", "true")
        .env("REPORT_DIR", &override_dir)
        .assert()
        .success()
        .stdout(predicates::str::contains("** Workflow name    : CircleCI Stage Run"));

    assert_eq!(reports_in(&override_dir).len(), 1);
    assert!(reports_in(&requested).is_empty());
}

/// > A failing webhook never fails the run.
#[test]
fn run_survives_unreachable_webhook() {
    let dir = temp_project();

    a11yreport_cmd()
        .args(["run", "--no-color", "-o"])
        .arg(dir.path().join("reports"))
        .arg("--events")
        .arg(fixture("events/all-passed.jsonl"))
        .current_dir(dir.path())
        .env("SLACK_WH", "http://127.0.0.1:9/hook")
        .assert()
        .success()
        .stdout(predicates::str::contains("# Total Test executed: 1"));
}

/// > A line that is not valid UTF-8 is skipped; later events still count.
#[test]
fn run_skips_invalid_utf8_event_line() {
    let dir = temp_project();
    let events = dir.path().join("events.jsonl");
    let mut body = Vec::new();
    body.extend_from_slice(br#"{"title": "[Test 1] @a", "projectId": "live-chromium", "status": "passed"}"#);
    body.extend_from_slice(b"\n\xff\xfe garbage\n");
    body.extend_from_slice(br#"{"title": "[Test 2] @b", "projectId": "live-chromium", "status": "failed"}"#);
    body.push(b'\n');
    std::fs::write(&events, body).unwrap();

    a11yreport_cmd()
        .args(["run", "--no-color", "--no-notify", "-o"])
        .arg(dir.path().join("reports"))
        .arg("--events")
        .arg(&events)
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("# Total Test executed: 2"))
        .stdout(predicates::str::contains("1 (50.00%)"))
        .stderr(predicates::str::contains("skipping non-UTF-8 event line"));
}

/// > An unwritable run record still prints the summary, then fails (exit 3).
#[test]
fn run_results_json_write_failure_still_prints_summary() {
    let dir = temp_project();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    let assert = a11yreport_cmd()
        .args(["run", "--no-color", "-o"])
        .arg(dir.path().join("reports"))
        .arg("--results-json")
        .arg(blocker.join("r.json"))
        .arg("--events")
        .arg(fixture("events/all-passed.jsonl"))
        .current_dir(dir.path())
        .env("SLACK_WH", "http://127.0.0.1:9/hook")
        .assert()
        .code(3)
        .stdout(predicates::str::contains("# Total Test executed: 1"))
        .stderr(predicates::str::contains("io error"))
        .stderr(predicates::str::contains("failed to publish run summary"));

    // The io cause is printed once.
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let error_line = stderr
        .lines()
        .find(|l| l.starts_with("a11yreport: io error"))
        .unwrap();
    assert_eq!(error_line.matches("os error").count(), 1, "{error_line}");
}
