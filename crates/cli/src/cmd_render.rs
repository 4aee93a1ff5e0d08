// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Render command implementation.

use a11yreport::cli::{Cli, RenderArgs};
use a11yreport::context::RunContext;
use a11yreport::discovery;
use a11yreport::error::{Error, ExitCode};
use a11yreport::report::AccessibilityReportBuilder;
use a11yreport::scan::parse_scan_document;

/// Run the render command.
pub fn run(cli: &Cli, args: &RenderArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = discovery::load_config(cli.config.as_deref(), &cwd)?;
    let context = RunContext::from_env();

    let mut results = Vec::new();
    for path in &args.scans {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let parsed = parse_scan_document(&content).map_err(|e| match e {
            Error::Payload { message } => Error::Payload {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })?;
        results.extend(parsed);
    }

    if results.is_empty() {
        eprintln!("a11yreport: no scan results to render");
        return Ok(ExitCode::Success);
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| context.default_report_dir(&config.report));
    let Some(path) = AccessibilityReportBuilder::new(&config, &context).build(&results, &output_dir)
    else {
        return Err(Error::Internal("failed to write report".to_string()).into());
    };

    println!("{}", path.display());
    Ok(ExitCode::Success)
}
