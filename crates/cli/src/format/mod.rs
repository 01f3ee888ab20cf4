// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report output.
//!
//! `list` renders the module → suite → test tree, `count` renders totals.
//! Both have a text and a JSON form. Output is sorted by name.

mod count;
mod json;
mod list;

use std::time::Duration;

use crate::cli::OutputFormat;
use crate::model::{Report, Status};

pub use count::CountFormatter;
pub use json::JsonFormatter;
pub use list::ListFormatter;

/// Which rendering of the report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Count,
}

/// Options shared by all formatters.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Merge runs of one test across devices.
    pub filter_devices: bool,
    /// Single-line JSON.
    pub compact: bool,
}

/// Trait for formatting a report into an output format.
pub trait ReportFormatter {
    /// Format the report into a string.
    fn format(&self, report: &Report) -> anyhow::Result<String>;

    /// Format the report directly to a writer.
    fn format_to(&self, writer: &mut dyn std::io::Write, report: &Report) -> anyhow::Result<()> {
        writer.write_all(self.format(report)?.as_bytes())?;
        Ok(())
    }
}

/// Create formatter for a view and output format.
pub fn create_formatter(
    view: View,
    format: OutputFormat,
    options: FormatOptions,
) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => match view {
            View::List => Box::new(ListFormatter::new(options.filter_devices)),
            View::Count => Box::new(CountFormatter::new(options.filter_devices)),
        },
        OutputFormat::Json => Box::new(JsonFormatter::new(view, options)),
    }
}

/// Duration for humans: `850ms`, `1.25s`, `2m 05s`.
pub fn human_duration(duration: Duration) -> String {
    let millis = duration.as_secs_f64() * 1000.0;
    if millis < 1000.0 {
        format!("{}ms", millis.round() as u64)
    } else if duration.as_secs() < 60 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Fraction in `[0, 1]` as a percentage with one decimal.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Fixed-width marker for a status in text output.
pub fn status_label(status: Status) -> &'static str {
    match status {
        Status::Success => "PASS",
        Status::Failure => "FAIL",
        Status::ExpectedFailure => "XFAIL",
        Status::Skipped => "SKIP",
        Status::Mixed => "MIXED",
        Status::Unknown => "?",
    }
}

#[cfg(test)]
pub mod test_support;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
