// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use termcolor::ColorChoice;

use crate::color::resolve_color;

/// Aggregates browser test outcomes and renders accessibility reports
#[derive(Parser)]
#[command(name = "a11yreport")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "A11YREPORT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Aggregate outcome events, print the summary, and write the report
    Run(RunArgs),
    /// Render a report from scan payload files
    Render(RenderArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// JSON-Lines outcome event files (`-` for stdin)
    #[arg(long = "events", value_name = "FILE", required = true, num_args = 1..)]
    pub events: Vec<PathBuf>,

    /// Report output directory (default depends on the CI provider)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write the run record as JSON
    #[arg(long, value_name = "FILE")]
    pub results_json: Option<PathBuf>,

    /// Do not post the summary to the webhook
    #[arg(long)]
    pub no_notify: bool,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,
}

impl RunArgs {
    /// Flags first, then the environment.
    pub fn color_choice(&self) -> ColorChoice {
        if self.no_color {
            ColorChoice::Never
        } else if self.color {
            ColorChoice::Always
        } else {
            resolve_color()
        }
    }
}

#[derive(clap::Args)]
pub struct RenderArgs {
    /// Scan payload files (one object or an array of objects each)
    #[arg(value_name = "SCAN_JSON", required = true)]
    pub scans: Vec<PathBuf>,

    /// Report output directory (default depends on the CI provider)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
