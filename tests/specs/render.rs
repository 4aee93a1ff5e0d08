//! Behavioral specs for `a11yreport render`.

use crate::prelude::*;

/// > render builds one report from scan documents and prints its path.
#[test]
fn render_writes_report_and_prints_path() {
    let dir = temp_project();
    let out = dir.path().join("reports");

    a11yreport_cmd()
        .args(["render", "-o"])
        .arg(&out)
        .arg(fixture("scan/home.json"))
        .arg(fixture("scan/pages.json"))
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("a11y-report-"))
        .stdout(predicates::str::contains(".html"));

    let reports = reports_in(&out);
    assert_eq!(reports.len(), 1);
    let html = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(html.contains("Total Violations:"));
    assert!(html.contains(r#"data-severity="critical""#));
}

/// > Invalid scan JSON is a payload error (exit 2)
#[test]
fn render_invalid_json_fails() {
    let dir = temp_project();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();

    a11yreport_cmd()
        .arg("render")
        .arg(&bad)
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid scan document"))
        .stderr(predicates::str::contains("bad.json"));
}

/// > An empty scan array renders nothing and still succeeds.
#[test]
fn render_empty_array_writes_nothing() {
    let dir = temp_project();
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "[]").unwrap();
    let out = dir.path().join("reports");

    a11yreport_cmd()
        .args(["render", "-o"])
        .arg(&out)
        .arg(&empty)
        .current_dir(dir.path())
        .assert()
        .success()
        .stderr(predicates::str::contains("no scan results"));

    assert!(reports_in(&out).is_empty());
}

/// > Missing scan file is an I/O error (exit 3)
#[test]
fn render_missing_file_fails() {
    let dir = temp_project();

    a11yreport_cmd()
        .args(["render", "missing.json"])
        .current_dir(dir.path())
        .assert()
        .code(3);
}
