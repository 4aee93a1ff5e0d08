//! Test-run reporting: retry-aware result aggregation, accessibility
//! violation reports, and end-of-run summaries.

pub mod aggregate;
pub mod ansi;
pub mod cli;
pub mod color;
pub mod config;
pub mod context;
pub mod discovery;
pub mod env;
pub mod error;
pub mod event;
pub mod notify;
pub mod record;
pub mod report;
pub mod scan;
pub mod summary;
pub mod title;

pub use aggregate::{AggregatedResult, AggregatorHandle, EventSender, ResultAggregator, RunTally};
pub use config::Config;
pub use context::RunContext;
pub use error::{Error, ExitCode, Result};
pub use event::TestOutcomeEvent;
pub use report::AccessibilityReportBuilder;
pub use scan::AccessibilityScanResult;
pub use summary::{RunSummary, RunSummaryReporter};
pub use title::{TitleMetadata, parse_title};
