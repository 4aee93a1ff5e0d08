// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run context.
//!
//! Everything the reporter learns from the process environment is captured
//! here once, at startup, and passed by reference to the components that need
//! it. Empty variables are treated as unset.

use std::path::{Path, PathBuf};

use crate::config::{Config, ReportSettings};
use crate::env::names;

/// Run name used for GitHub runs without `WORKFLOW_NAME`.
pub const DEFAULT_PR_RUN_NAME: &str = "PR Run";
pub const CIRCLECI_RUN_NAME: &str = "CircleCI Stage Run";
pub const LOCAL_RUN_NAME: &str = "Local Run";
pub const LOCAL_ENVIRONMENT: &str = "Local Environment";

/// Placeholder for values the environment did not provide.
pub const UNKNOWN: &str = "unknown";

/// Fallback git branch and repository for runs outside GitHub.
pub const LOCAL: &str = "local";

/// Which CI system, if any, is hosting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CiProvider {
    Local,
    GithubActions {
        run_id: Option<String>,
        git_ref: Option<String>,
        workflow_name: Option<String>,
        actor: Option<String>,
    },
    CircleCi {
        workflow_id: Option<String>,
        build_num: Option<String>,
        project_username: Option<String>,
        project_reponame: Option<String>,
    },
}

/// Environment-derived facts about the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub provider: CiProvider,
    /// `owner/name` of the GitHub repository.
    pub repository: Option<String>,
    /// Short branch or tag name.
    pub ref_name: Option<String>,
    /// Report directory override, honored on CI only.
    pub report_dir: Option<PathBuf>,
    pub pr_branch_url: Option<String>,
    pub libs: Option<String>,
    pub local_live_url: Option<String>,
    /// Notification webhook; `None` disables notification.
    pub webhook_url: Option<String>,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            provider: CiProvider::Local,
            repository: None,
            ref_name: None,
            report_dir: None,
            pr_branch_url: None,
            libs: None,
            local_live_url: None,
            webhook_url: None,
        }
    }
}

impl RunContext {
    /// Capture the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a context from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let provider = if get(names::GITHUB_ACTIONS).as_deref() == Some("true") {
            CiProvider::GithubActions {
                run_id: get(names::GITHUB_RUN_ID),
                git_ref: get(names::GITHUB_REF),
                workflow_name: get(names::WORKFLOW_NAME),
                actor: get(names::GITHUB_ACTOR),
            }
        } else if get(names::CIRCLECI).is_some() {
            CiProvider::CircleCi {
                workflow_id: get(names::CIRCLE_WORKFLOW_ID),
                build_num: get(names::CIRCLE_BUILD_NUM),
                project_username: get(names::CIRCLE_PROJECT_USERNAME),
                project_reponame: get(names::CIRCLE_PROJECT_REPONAME),
            }
        } else {
            CiProvider::Local
        };

        Self {
            provider,
            repository: get(names::GITHUB_REPOSITORY),
            ref_name: get(names::GITHUB_REF_NAME),
            report_dir: get(names::REPORT_DIR).map(PathBuf::from),
            pr_branch_url: get(names::PR_BRANCH_LIVE_URL),
            libs: get(names::MILO_LIBS),
            local_live_url: get(names::LOCAL_TEST_LIVE_URL),
            webhook_url: get(names::SLACK_WH),
        }
    }

    pub fn is_ci(&self) -> bool {
        !matches!(self.provider, CiProvider::Local)
    }

    /// Pull request number: the third `/` segment of `GITHUB_REF`.
    pub fn pr_number(&self) -> Option<&str> {
        match &self.provider {
            CiProvider::GithubActions {
                git_ref: Some(git_ref),
                ..
            } => git_ref.split('/').nth(2).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    pub fn is_pull_request(&self) -> bool {
        matches!(
            &self.provider,
            CiProvider::GithubActions { git_ref: Some(git_ref), .. } if git_ref.contains("pull")
        )
    }

    pub fn run_name(&self) -> String {
        match &self.provider {
            CiProvider::GithubActions { workflow_name, .. } => {
                let name = workflow_name.as_deref().unwrap_or(DEFAULT_PR_RUN_NAME);
                match self.pr_number() {
                    Some(pr) => format!("{name} ({pr})"),
                    None => name.to_string(),
                }
            }
            CiProvider::CircleCi { .. } => CIRCLECI_RUN_NAME.to_string(),
            CiProvider::Local => LOCAL_RUN_NAME.to_string(),
        }
    }

    pub fn run_url(&self) -> String {
        match &self.provider {
            CiProvider::GithubActions { run_id, .. } => format!(
                "https://github.com/{}/actions/runs/{}",
                self.repository.as_deref().unwrap_or(UNKNOWN),
                run_id.as_deref().unwrap_or(UNKNOWN),
            ),
            CiProvider::CircleCi {
                workflow_id,
                build_num,
                project_username,
                project_reponame,
            } => {
                let build = build_num.as_deref().unwrap_or(UNKNOWN);
                format!(
                    "https://app.circleci.com/pipelines/github/{}/{}/{build}/workflows/{}/jobs/{build}",
                    project_username.as_deref().unwrap_or(UNKNOWN),
                    project_reponame.as_deref().unwrap_or(UNKNOWN),
                    workflow_id.as_deref().unwrap_or(UNKNOWN),
                )
            }
            CiProvider::Local => LOCAL_ENVIRONMENT.to_string(),
        }
    }

    pub fn executed_on(&self) -> &'static str {
        match self.provider {
            CiProvider::GithubActions { .. } => "GitHub Actions Environment",
            CiProvider::CircleCi { .. } => "CircleCI Environment",
            CiProvider::Local => LOCAL_ENVIRONMENT,
        }
    }

    /// Run label shown in the report metadata block.
    pub fn test_run_type(&self) -> &'static str {
        match self.provider {
            CiProvider::GithubActions { .. } => "GitHub Action Run",
            CiProvider::CircleCi { .. } => "CircleCI Run",
            CiProvider::Local => LOCAL_RUN_NAME,
        }
    }

    /// GitHub actor, else the configured team name.
    pub fn triggered_by<'a>(&'a self, settings: &'a ReportSettings) -> &'a str {
        match &self.provider {
            CiProvider::GithubActions { actor, .. } => actor.as_deref().unwrap_or(UNKNOWN),
            _ => &settings.triggered_by,
        }
    }

    /// Where the report lands: `REPORT_DIR` on CI, else `requested`.
    pub fn report_output_dir(&self, requested: &Path) -> PathBuf {
        match &self.report_dir {
            Some(dir) if self.is_ci() => dir.clone(),
            _ => requested.to_path_buf(),
        }
    }

    /// Output directory used when the caller does not pick one.
    pub fn default_report_dir(&self, settings: &ReportSettings) -> PathBuf {
        if !self.is_ci() {
            settings.output_dir.clone()
        } else if self.is_pull_request() {
            settings.ci_dir.join("pr-reports")
        } else {
            settings.ci_dir.join("manual-reports")
        }
    }

    fn preview_url(&self) -> Option<String> {
        self.pr_branch_url
            .as_ref()
            .map(|url| format!("{url}{}", self.libs.as_deref().unwrap_or("")))
    }

    /// Application URL for the console summary.
    pub fn app_url(&self, config: &Config) -> String {
        self.preview_url()
            .or_else(|| config.primary_base_url().map(str::to_string))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Tested environment URL for the report metadata block.
    pub fn report_env_url(&self, config: &Config) -> String {
        self.preview_url()
            .or_else(|| self.local_live_url.clone())
            .or_else(|| config.primary_base_url().map(str::to_string))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Branch for the run record.
    pub fn git_branch(&self) -> &str {
        self.ref_name.as_deref().unwrap_or(LOCAL)
    }

    /// Repository name without its owner.
    pub fn git_repo(&self) -> &str {
        self.repository
            .as_deref()
            .and_then(|r| r.split_once('/'))
            .map(|(_, name)| name)
            .filter(|name| !name.is_empty())
            .unwrap_or(LOCAL)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
