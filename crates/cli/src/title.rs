// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test title metadata parsing.
//!
//! Titles encode a name and tags separated by `@`, e.g.
//! `[Test 1] @accordion-container @smoke @regression`. The target URL and
//! browser come from the project profile the test ran under.
//!
//! Parsing never fails: malformed titles and unknown projects degrade to
//! partial metadata with a diagnostic.

use std::fmt;

use serde::Serialize;

use crate::config::Config;

/// Separator between title segments.
pub const TITLE_MARKER: char = '@';

/// Browser reported when the project does not name one.
pub const DEFAULT_BROWSER: &str = "chrome";

/// Target environment derived from the base URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Prod,
    Stage,
    #[default]
    Live,
}

impl Env {
    pub fn as_str(self) -> &'static str {
        match self {
            Env::Prod => "prod",
            Env::Stage => "stage",
            Env::Live => "live",
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata recovered from one test title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMetadata {
    /// Trimmed second segment; `None` when the title has no marker.
    pub name: Option<String>,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub browser: String,
    pub env: Env,
    pub branch: Option<String>,
    pub repo: Option<String>,
}

/// Parse a raw title for a test run under `project_id`.
pub fn parse_title(title: &str, project_id: &str, config: &Config) -> TitleMetadata {
    let (name, tags) = split_title(title);
    if name.is_none() {
        tracing::debug!(title, "title has no `@` marker; name left unset");
    }

    let mut browser = DEFAULT_BROWSER.to_string();
    let url = match config.project(project_id) {
        Some(project) if project.base_url.is_some() => {
            if let Some(b) = &project.browser {
                browser = b.clone();
            }
            project.base_url.clone()
        }
        _ => config.base_url.clone(),
    };

    let Some(url) = url else {
        tracing::warn!(
            title,
            project = project_id,
            "no base URL for project; branch and repo left unset"
        );
        return TitleMetadata {
            name,
            tags,
            url: None,
            browser,
            env: Env::default(),
            branch: None,
            repo: None,
        };
    };

    let env = classify_env(&url);
    let (branch, repo) = branch_and_repo(&url);

    TitleMetadata {
        name,
        tags,
        url: Some(url),
        browser,
        env,
        branch,
        repo,
    }
}

/// Split a title into its trimmed name and tags.
///
/// The first segment (before the first marker) is discarded.
pub fn split_title(title: &str) -> (Option<String>, Vec<String>) {
    let mut parts = title.split(TITLE_MARKER).skip(1);
    let name = parts.next().map(|s| s.trim().to_string());
    let tags = parts.map(|s| s.trim().to_string()).collect();
    (name, tags)
}

/// Classify the environment by substring.
///
/// This is a heuristic: any URL containing `prod` is prod, then `stage`,
/// everything else is live.
pub fn classify_env(url: &str) -> Env {
    if url.contains("prod") {
        Env::Prod
    } else if url.contains("stage") {
        Env::Stage
    } else {
        Env::Live
    }
}

/// Derive `(branch, repo)` from a base URL.
///
/// Localhost URLs map to `local`/`local`. Otherwise the final path segment
/// follows the `<branch>--<repo>[--<owner>...]` preview host convention.
pub fn branch_and_repo(url: &str) -> (Option<String>, Option<String>) {
    if url.contains("localhost") {
        return (Some("local".to_string()), Some("local".to_string()));
    }

    let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    let mut parts = last.split("--");
    let branch = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    let repo = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    (branch, repo)
}

#[cfg(test)]
#[path = "title_tests.rs"]
mod tests;
