// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variable names.
//!
//! Every variable the reporter reads is named here. Values are read once,
//! into [`crate::context::RunContext`], and never consulted ad hoc.

/// Environment variable names.
pub mod names {
    /// `"true"` when running under GitHub Actions.
    pub const GITHUB_ACTIONS: &str = "GITHUB_ACTIONS";
    pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
    pub const GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";
    /// Full ref, e.g. `refs/pull/42/merge`.
    pub const GITHUB_REF: &str = "GITHUB_REF";
    pub const GITHUB_REF_NAME: &str = "GITHUB_REF_NAME";
    pub const GITHUB_ACTOR: &str = "GITHUB_ACTOR";
    pub const WORKFLOW_NAME: &str = "WORKFLOW_NAME";

    /// Set (to any value) when running under CircleCI.
    pub const CIRCLECI: &str = "CIRCLECI";
    pub const CIRCLE_WORKFLOW_ID: &str = "CIRCLE_WORKFLOW_ID";
    pub const CIRCLE_BUILD_NUM: &str = "CIRCLE_BUILD_NUM";
    pub const CIRCLE_PROJECT_USERNAME: &str = "CIRCLE_PROJECT_USERNAME";
    pub const CIRCLE_PROJECT_REPONAME: &str = "CIRCLE_PROJECT_REPONAME";

    /// Report directory override for CI runs.
    pub const REPORT_DIR: &str = "REPORT_DIR";
    /// Preview branch base URL.
    pub const PR_BRANCH_LIVE_URL: &str = "PR_BRANCH_LIVE_URL";
    /// Query suffix appended to the preview branch URL.
    pub const MILO_LIBS: &str = "MILO_LIBS";
    pub const LOCAL_TEST_LIVE_URL: &str = "LOCAL_TEST_LIVE_URL";
    /// Notification webhook.
    pub const SLACK_WH: &str = "SLACK_WH";

    pub const NO_COLOR: &str = "NO_COLOR";
    pub const COLOR: &str = "COLOR";
    pub const CI: &str = "CI";
    pub const A11YREPORT_LOG: &str = "A11YREPORT_LOG";
    pub const A11YREPORT_CONFIG: &str = "A11YREPORT_CONFIG";
}

/// Name of the log filter variable.
pub fn log_var() -> &'static str {
    names::A11YREPORT_LOG
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
