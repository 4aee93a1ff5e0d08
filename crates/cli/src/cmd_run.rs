// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use chrono::Utc;
use termcolor::{StandardStream, WriteColor};

use a11yreport::aggregate::{EventSender, ResultAggregator};
use a11yreport::cli::{Cli, RunArgs};
use a11yreport::color::scheme;
use a11yreport::context::RunContext;
use a11yreport::discovery;
use a11yreport::error::{Error, ExitCode, Result};
use a11yreport::event::read_events;
use a11yreport::record::RunRecord;
use a11yreport::summary::{RunSummary, RunSummaryReporter};

const STDIN: &str = "-";

/// Run the run command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = Arc::new(discovery::load_config(cli.config.as_deref(), &cwd)?);
    let context = RunContext::from_env();

    for path in &args.events {
        if path.as_os_str() != STDIN && !path.exists() {
            return Err(Error::Argument(format!("events file not found: {}", path.display())).into());
        }
    }

    // === Aggregation ===
    let handle = ResultAggregator::new(Arc::clone(&config)).spawn()?;
    let readers = args
        .events
        .iter()
        .map(|path| spawn_reader(path.clone(), handle.sender()))
        .collect::<Result<Vec<_>>>()?;

    let mut delivered = 0;
    for (path, reader) in args.events.iter().zip(readers) {
        match reader.join() {
            Ok(Ok(count)) => delivered += count,
            Ok(Err(e)) => {
                tracing::warn!(source = %path.display(), error = %e, "stopped reading events");
            }
            Err(_) => {
                tracing::warn!(source = %path.display(), "event reader panicked");
            }
        }
    }
    let tally = handle.finish()?;
    tracing::debug!(events = delivered, tests = tally.total(), "aggregation finished");

    // === Finalize ===
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| context.default_report_dir(&config.report));
    let mut reporter = RunSummaryReporter::new(&config, &context);
    if args.no_notify {
        reporter = reporter.without_notification();
    }
    let outcome = reporter.finalize(&tally, &output_dir);

    let mut stdout = StandardStream::stdout(args.color_choice());
    if let Err(e) = print_outcome(&mut stdout, &outcome.summary, outcome.report_path.as_deref()) {
        tracing::warn!(error = %e, "failed to print run summary");
    }

    let record = args
        .results_json
        .as_deref()
        .map(|path| RunRecord::new(&context, &tally.results, Utc::now()).write(path));

    // Outcome is logged by the worker; waiting only bounds process exit.
    if let Some(dispatch) = outcome.dispatch {
        dispatch.wait();
    }

    record.transpose()?;
    Ok(ExitCode::Success)
}

fn print_outcome(
    out: &mut dyn WriteColor,
    summary: &RunSummary,
    report_path: Option<&Path>,
) -> std::io::Result<()> {
    summary.write_to(out)?;
    if let Some(path) = report_path {
        write!(out, "Accessibility report saved at: ")?;
        out.set_color(&scheme::path())?;
        write!(out, "{}", path.display())?;
        out.reset()?;
        writeln!(out)?;
    }
    out.flush()
}

/// Read one event source on its own thread.
fn spawn_reader(path: PathBuf, sender: EventSender) -> Result<JoinHandle<Result<usize>>> {
    std::thread::Builder::new()
        .name(format!("events:{}", path.display()))
        .spawn(move || read_source(&path, &sender))
        .map_err(|e| Error::Internal(format!("failed to spawn event reader: {e}")))
}

fn read_source(path: &Path, sender: &EventSender) -> Result<usize> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let deliver = |event| {
        sender.send(event);
    };

    if path.as_os_str() == STDIN {
        let stdin = std::io::stdin();
        read_events(stdin.lock(), "stdin", deliver).map_err(io_error)
    } else {
        let file = File::open(path).map_err(io_error)?;
        let source = path.display().to_string();
        read_events(BufReader::new(file), &source, deliver).map_err(io_error)
    }
}
