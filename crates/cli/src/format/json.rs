// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output.

use std::io::Write;

use serde_json::json;

use crate::model::{Report, Suite};

use super::{FormatOptions, ReportFormatter, View};

/// JSON formatter for both views.
pub struct JsonFormatter {
    view: View,
    options: FormatOptions,
}

impl JsonFormatter {
    pub fn new(view: View, options: FormatOptions) -> Self {
        Self { view, options }
    }

    fn suite_json(&self, suite: &Suite) -> serde_json::Value {
        let mut tests: Vec<_> = suite.tests().collect();
        tests.sort_by_key(|t| t.name());
        let tests: Vec<_> = tests
            .into_iter()
            .map(|test| {
                json!({
                    "name": test.name(),
                    "status": test.combined_status(),
                    "durationMs": test.total_duration().as_secs_f64() * 1000.0,
                    "runs": test.tests().len(),
                    "merged": test.merged_tests(self.options.filter_devices),
                })
            })
            .collect();

        let mut value = json!({
            "name": suite.name(),
            "counts": suite.counts(self.options.filter_devices),
            "tests": tests,
        });
        if let Some(coverage) = suite.coverage() {
            value["coverage"] = json!(coverage);
        }
        if !suite.warnings().is_empty() {
            value["warnings"] = json!(suite.warnings());
        }
        value
    }

    fn build_json(&self, report: &Report) -> serde_json::Value {
        let counts = report.counts(self.options.filter_devices);
        let mut output = serde_json::Map::new();

        if self.view == View::List {
            let mut modules: Vec<_> = report.modules().collect();
            modules.sort_by_key(|m| m.name());
            let modules: Vec<_> = modules
                .into_iter()
                .map(|module| {
                    let mut suites: Vec<_> = module.suites().collect();
                    suites.sort_by_key(|s| s.name());
                    let mut value = json!({
                        "name": module.name(),
                        "counts": module.counts(self.options.filter_devices),
                        "suites": suites.into_iter().map(|s| self.suite_json(s)).collect::<Vec<_>>(),
                    });
                    if let Some(coverage) = module.coverage() {
                        value["coverage"] = json!(coverage);
                    }
                    value
                })
                .collect();
            output.insert("modules".to_string(), json!(modules));
        }

        output.insert("counts".to_string(), json!(counts));
        output.insert("coverage".to_string(), json!(report.coverage()));
        serde_json::Value::Object(output)
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> anyhow::Result<String> {
        let value = self.build_json(report);
        let mut text = if self.options.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        text.push('\n');
        Ok(text)
    }

    fn format_to(&self, writer: &mut dyn std::io::Write, report: &Report) -> anyhow::Result<()> {
        let value = self.build_json(report);
        if self.options.compact {
            serde_json::to_writer(&mut *writer, &value)?;
        } else {
            serde_json::to_writer_pretty(&mut *writer, &value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
