// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report construction.
//!
//! Modules and suites are values: every update removes the current entry,
//! builds a new one with the changed fields, and inserts it back. Nothing
//! outside the builder can change a module or suite once it is part of a
//! [`Report`].

use std::collections::BTreeMap;

use super::{Coverage, Module, Report, Suite, Test, Warning};

/// Accumulates modules during the aggregation and reconciliation phases.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    modules: BTreeMap<String, Module>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    /// Every `(module, suite)` name pair currently in the report.
    pub fn suite_names(&self) -> Vec<(String, String)> {
        self.modules
            .values()
            .flat_map(|m| {
                m.suites()
                    .map(move |s| (m.name().to_string(), s.name().to_string()))
            })
            .collect()
    }

    /// Replace the named module with `update` applied to it.
    pub fn update_module<F>(&mut self, name: &str, update: F)
    where
        F: FnOnce(Module) -> Module,
    {
        let module = self
            .modules
            .remove(name)
            .unwrap_or_else(|| Module::new(name));
        self.modules.insert(name.to_string(), update(module));
    }

    /// Replace the named suite of the named module with `update` applied to it.
    pub fn update_suite<F>(&mut self, module: &str, suite: &str, update: F)
    where
        F: FnOnce(Suite) -> Suite,
    {
        self.update_module(module, |m| m.with_suite(suite, update));
    }

    pub fn ensure_module(&mut self, name: &str) {
        self.update_module(name, |m| m);
    }

    pub fn ensure_suite(&mut self, module: &str, suite: &str) {
        self.update_suite(module, suite, |s| s);
    }

    /// Append runs to the repeatable test `test` in `module`/`suite`.
    pub fn add_runs(&mut self, module: &str, suite: &str, test: &str, runs: Vec<Test>) {
        self.update_suite(module, suite, |s| s.with_runs(test, runs));
    }

    pub fn set_module_coverage(&mut self, module: &str, coverage: Option<Coverage>) {
        self.update_module(module, |m| m.with_coverage(coverage));
    }

    pub fn set_suite_coverage(&mut self, module: &str, suite: &str, coverage: Option<Coverage>) {
        self.update_suite(module, suite, |s| s.with_coverage(coverage));
    }

    pub fn add_suite_warnings(&mut self, module: &str, suite: &str, warnings: Vec<Warning>) {
        self.update_suite(module, suite, |s| s.with_warnings(warnings));
    }

    /// Overall coverage derived from suite line counts.
    ///
    /// `None` when no suite carries coverage.
    pub fn suite_coverage_fraction(&self) -> Option<f64> {
        let (covered, total) = self
            .modules
            .values()
            .flat_map(|m| m.suites())
            .filter_map(|s| s.coverage())
            .fold((0u64, 0u64), |(c, t), cov| {
                (c + cov.covered_lines, t + cov.total_lines)
            });
        Coverage::new(covered, total).map(|c| c.fraction)
    }

    /// Finish construction.
    ///
    /// `reported` is the overall coverage reported by the coverage tool; when
    /// absent or zero the fraction is derived from suite coverage instead.
    pub fn finish(self, reported: Option<f64>) -> Report {
        let coverage = reported
            .filter(|f| *f > 0.0)
            .map(|f| f.clamp(0.0, 1.0))
            .or_else(|| self.suite_coverage_fraction());
        Report::new(self.modules, coverage)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
