//! Test helpers for behavioral specifications.
//!
//! Provides helpers for running the a11yreport binary in an isolated
//! environment.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// Variables that change run detection or output; cleared for every spec so
/// results do not depend on where the suite runs.
const AMBIENT_VARS: &[&str] = &[
    "GITHUB_ACTIONS",
    "GITHUB_REPOSITORY",
    "GITHUB_RUN_ID",
    "GITHUB_REF",
    "GITHUB_REF_NAME",
    "GITHUB_ACTOR",
    "WORKFLOW_NAME",
    "CIRCLECI",
    "CIRCLE_WORKFLOW_ID",
    "CIRCLE_BUILD_NUM",
    "CIRCLE_PROJECT_USERNAME",
    "CIRCLE_PROJECT_REPONAME",
    "REPORT_DIR",
    "PR_BRANCH_LIVE_URL",
    "MILO_LIBS",
    "LOCAL_TEST_LIVE_URL",
    "SLACK_WH",
    "NO_COLOR",
    "COLOR",
    "A11YREPORT_LOG",
    "A11YREPORT_CONFIG",
];

/// Returns a Command configured to run the a11yreport binary
pub fn a11yreport_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("a11yreport"));
    for var in AMBIENT_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Path to a fixture file or directory.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
}

/// Temporary project directory with a minimal config.
pub fn temp_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("a11yreport.toml"),
        r#"version = 1

[[projects]]
name = "live-chromium"
base_url = "https://main--milo--adobecom.hlx.live"
browser = "chromium"
"#,
    )
    .unwrap();
    dir
}

/// HTML reports written under `dir`.
pub fn reports_in(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut reports: Vec<PathBuf> = entries
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "html"))
        .collect();
    reports.sort();
    reports
}
