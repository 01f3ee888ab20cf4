// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text totals for `xcreport count`.

use std::fmt::Write;

use crate::model::Report;

use super::{ReportFormatter, percent};

pub struct CountFormatter {
    filter_devices: bool,
}

impl CountFormatter {
    pub fn new(filter_devices: bool) -> Self {
        Self { filter_devices }
    }
}

impl ReportFormatter for CountFormatter {
    fn format(&self, report: &Report) -> anyhow::Result<String> {
        let counts = report.counts(self.filter_devices);
        let mut output = String::new();
        writeln!(output, "total: {}", counts.total)?;
        writeln!(output, "success: {}", counts.success)?;
        writeln!(output, "failure: {}", counts.failure)?;
        writeln!(output, "expected_failure: {}", counts.expected_failure)?;
        writeln!(output, "skipped: {}", counts.skipped)?;
        writeln!(output, "mixed: {}", counts.mixed)?;
        writeln!(output, "unknown: {}", counts.unknown)?;
        if let Some(fraction) = report.coverage() {
            writeln!(output, "coverage: {}", percent(fraction))?;
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "count_tests.rs"]
mod tests;
