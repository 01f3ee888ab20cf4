// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text listing of modules, suites and merged tests.

use std::fmt::Write;

use crate::model::{Coverage, Report, Test};

use super::{ReportFormatter, human_duration, percent, status_label};

/// Text formatter for `xcreport list`.
pub struct ListFormatter {
    filter_devices: bool,
}

impl ListFormatter {
    pub fn new(filter_devices: bool) -> Self {
        Self { filter_devices }
    }
}

fn coverage_suffix(coverage: Option<&Coverage>) -> String {
    match coverage {
        Some(c) => format!(
            "  coverage {} ({}/{})",
            percent(c.fraction),
            c.covered_lines,
            c.total_lines
        ),
        None => String::new(),
    }
}

fn write_test(output: &mut String, name: &str, test: &Test) -> std::fmt::Result {
    let label = test.path_label();
    let qualifier = if label.is_empty() {
        String::new()
    } else {
        format!(" [{label}]")
    };
    writeln!(
        output,
        "    {:<5} {}{}  {}",
        status_label(test.status),
        name,
        qualifier,
        human_duration(test.duration)
    )?;
    if let Some(message) = &test.message {
        for line in message.lines() {
            writeln!(output, "          {line}")?;
        }
    }
    Ok(())
}

impl ReportFormatter for ListFormatter {
    fn format(&self, report: &Report) -> anyhow::Result<String> {
        let mut output = String::new();

        let mut modules: Vec<_> = report.modules().collect();
        modules.sort_by_key(|m| m.name());
        for module in modules {
            writeln!(output, "{}{}", module.name(), coverage_suffix(module.coverage()))?;

            let mut suites: Vec<_> = module.suites().collect();
            suites.sort_by_key(|s| s.name());
            for suite in suites {
                writeln!(output, "  {}{}", suite.name(), coverage_suffix(suite.coverage()))?;

                let mut tests: Vec<_> = suite.tests().collect();
                tests.sort_by_key(|t| t.name());
                for test in tests {
                    for merged in test.merged_tests(self.filter_devices) {
                        write_test(&mut output, test.name(), &merged)?;
                    }
                }
                for warning in suite.warnings() {
                    writeln!(output, "    warning: {}: {}", warning.kind, warning.message)?;
                }
            }
        }

        if report.modules().next().is_some() {
            writeln!(output)?;
        }
        let counts = report.counts(self.filter_devices);
        let mut summary = format!(
            "{} tests: {} passed, {} failed",
            counts.total, counts.success, counts.failure
        );
        for (count, label) in [
            (counts.mixed, "mixed"),
            (counts.skipped, "skipped"),
            (counts.expected_failure, "expected failures"),
            (counts.unknown, "unknown"),
        ] {
            if count > 0 {
                write!(summary, ", {count} {label}")?;
            }
        }
        writeln!(output, "{summary}")?;
        if let Some(fraction) = report.coverage() {
            writeln!(output, "coverage: {}", percent(fraction))?;
        }

        Ok(output)
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
