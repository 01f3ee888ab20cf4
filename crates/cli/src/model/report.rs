// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report, modules and suites.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{RepeatableTest, Status, Test};

/// Line coverage for a file or a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub covered_lines: u64,
    pub total_lines: u64,
    /// Covered fraction in `[0, 1]`.
    pub fraction: f64,
}

impl Coverage {
    /// Coverage from line counts; `None` when there are no executable lines.
    pub fn new(covered_lines: u64, total_lines: u64) -> Option<Self> {
        if total_lines == 0 {
            return None;
        }
        let fraction = (covered_lines as f64 / total_lines as f64).clamp(0.0, 1.0);
        Some(Self {
            covered_lines,
            total_lines,
            fraction,
        })
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// A normalized build warning attached to a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: String,
    pub message: String,
}

impl Warning {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Append each incoming warning unless one with the same message is already
/// present. Order of first appearance is kept.
pub fn merge_warnings<I>(mut existing: Vec<Warning>, incoming: I) -> Vec<Warning>
where
    I: IntoIterator<Item = Warning>,
{
    for warning in incoming {
        if !existing.iter().any(|w| w.message == warning.message) {
            existing.push(warning);
        }
    }
    existing
}

/// Test counts by merged outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counts {
    pub total: usize,
    pub success: usize,
    pub failure: usize,
    pub expected_failure: usize,
    pub skipped: usize,
    pub mixed: usize,
    pub unknown: usize,
}

impl Counts {
    fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Success => self.success += 1,
            Status::Failure => self.failure += 1,
            Status::ExpectedFailure => self.expected_failure += 1,
            Status::Skipped => self.skipped += 1,
            Status::Mixed => self.mixed += 1,
            Status::Unknown => self.unknown += 1,
        }
    }

    fn add(&mut self, other: Counts) {
        self.total += other.total;
        self.success += other.success;
        self.failure += other.failure;
        self.expected_failure += other.expected_failure;
        self.skipped += other.skipped;
        self.mixed += other.mixed;
        self.unknown += other.unknown;
    }
}

/// A test suite: repeatable tests, warnings and file coverage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suite {
    name: String,
    tests: BTreeMap<String, RepeatableTest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<Coverage>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: BTreeMap::new(),
            warnings: Vec::new(),
            coverage: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> impl Iterator<Item = &RepeatableTest> {
        self.tests.values()
    }

    pub fn test(&self, name: &str) -> Option<&RepeatableTest> {
        self.tests.get(name)
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    /// Counts over merged tests.
    pub fn counts(&self, filter_devices: bool) -> Counts {
        let mut counts = Counts::default();
        for test in self.tests.values() {
            for merged in test.merged_tests(filter_devices) {
                counts.record(merged.status);
            }
        }
        counts
    }

    pub(crate) fn with_runs(mut self, test_name: &str, runs: Vec<Test>) -> Self {
        let test = self
            .tests
            .remove(test_name)
            .unwrap_or_else(|| RepeatableTest::new(test_name, Vec::new()))
            .with_runs(runs);
        self.tests.insert(test_name.to_string(), test);
        self
    }

    /// Merge `warnings` into this suite's list, skipping duplicate messages.
    pub(crate) fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings = merge_warnings(self.warnings, warnings);
        self
    }

    pub(crate) fn with_coverage(mut self, coverage: Option<Coverage>) -> Self {
        self.coverage = coverage;
        self
    }
}

/// A test module (bundle), or a coverage-only target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    name: String,
    suites: BTreeMap<String, Suite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<Coverage>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suites: BTreeMap::new(),
            coverage: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn suites(&self) -> impl Iterator<Item = &Suite> {
        self.suites.values()
    }

    pub fn suite(&self, name: &str) -> Option<&Suite> {
        self.suites.get(name)
    }

    pub fn coverage(&self) -> Option<&Coverage> {
        self.coverage.as_ref()
    }

    pub fn counts(&self, filter_devices: bool) -> Counts {
        let mut counts = Counts::default();
        for suite in self.suites.values() {
            counts.add(suite.counts(filter_devices));
        }
        counts
    }

    /// Replace the named suite with `update` applied to it (or to a new,
    /// empty suite if absent).
    pub(crate) fn with_suite<F>(mut self, suite_name: &str, update: F) -> Self
    where
        F: FnOnce(Suite) -> Suite,
    {
        let suite = self
            .suites
            .remove(suite_name)
            .unwrap_or_else(|| Suite::new(suite_name));
        self.suites.insert(suite_name.to_string(), update(suite));
        self
    }

    pub(crate) fn with_coverage(mut self, coverage: Option<Coverage>) -> Self {
        self.coverage = coverage;
        self
    }
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    modules: BTreeMap<String, Module>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<f64>,
}

impl Report {
    pub(crate) fn new(modules: BTreeMap<String, Module>, coverage: Option<f64>) -> Self {
        Self { modules, coverage }
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Overall covered fraction in `[0, 1]`.
    pub fn coverage(&self) -> Option<f64> {
        self.coverage
    }

    pub fn counts(&self, filter_devices: bool) -> Counts {
        let mut counts = Counts::default();
        for module in self.modules.values() {
            counts.add(module.counts(filter_devices));
        }
        counts
    }

}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
