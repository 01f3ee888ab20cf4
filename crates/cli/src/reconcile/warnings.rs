// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build warning reconciliation.
//!
//! Compiler diagnostics arrive as multi-line text with source excerpts,
//! caret annotations and macro expansion echoes. They are reduced to one
//! line, deduplicated per file, and attached to the suite named after the
//! file.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::WarningsConfig;
use crate::model::{ReportBuilder, Warning, merge_warnings};
use crate::raw::BuildIssue;

/// Counters describing how build warnings landed in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningStats {
    /// Issues whose type is not a recognized warning category.
    pub ignored: usize,
    /// Recognized issues without a usable source location.
    pub unlocated: usize,
    /// Recognized issues whose message normalized to nothing.
    pub empty: usize,
    /// Suites that received at least one warning.
    pub attached_suites: usize,
}

/// Suffixes that mark a line as a macro expansion echo of the first line.
const MACRO_ECHO_MARKERS: &[&str] = &["(from macro", "in expansion of macro"];

/// Prefixes of source annotation lines (carets, underlines, macro trees).
const ANNOTATION_MARKERS: &[&str] = &["^", "~", "`-", "|"];

#[allow(clippy::expect_used)]
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

fn repeats_first_line(line: &str, first: &str) -> bool {
    if line == first {
        return true;
    }
    line.strip_prefix(first).is_some_and(|rest| {
        let rest = rest.trim_start();
        MACRO_ECHO_MARKERS.iter().any(|m| rest.starts_with(m))
    })
}

fn is_annotation(line: &str) -> bool {
    ANNOTATION_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Reduce a compiler diagnostic to a single line.
///
/// Drops later lines that repeat the first one (alone or followed by a macro
/// echo), drops annotation lines, collapses whitespace and trims. The result
/// may be empty. Applying it twice gives the same result as applying it once.
pub fn normalize_message(message: &str) -> String {
    let mut lines = message.lines().map(str::trim);
    let Some(first) = lines.next() else {
        return String::new();
    };

    let kept: Vec<&str> = std::iter::once(first)
        .chain(lines.filter(|line| !repeats_first_line(line, first)))
        .filter(|line| !is_annotation(line))
        .collect();

    WHITESPACE_RE
        .replace_all(&kept.join(" "), " ")
        .trim()
        .to_string()
}

/// Normalized warnings keyed by source file name.
#[derive(Debug, Default)]
pub struct WarningIndex {
    by_file: HashMap<String, Vec<Warning>>,
}

impl WarningIndex {
    /// Build the index from decoded build issues.
    pub fn from_issues(issues: &[BuildIssue], config: &WarningsConfig) -> (Self, WarningStats) {
        let mut index = Self::default();
        let mut stats = WarningStats::default();

        for issue in issues {
            if !config.is_recognized(&issue.issue_type) {
                stats.ignored += 1;
                continue;
            }
            let Some(file) = issue.file_name() else {
                tracing::debug!("warning without source location: {}", issue.message);
                stats.unlocated += 1;
                continue;
            };
            let message = normalize_message(&issue.message);
            if message.is_empty() {
                tracing::warn!("dropping empty {} in {}", issue.issue_type, file);
                stats.empty += 1;
                continue;
            }
            index.insert(file, Warning::new(issue.issue_type.as_str(), message));
        }

        (index, stats)
    }

    /// Add a warning to a file unless the file already has its message.
    pub fn insert(&mut self, file: String, warning: Warning) {
        let existing = self.by_file.remove(&file).unwrap_or_default();
        self.by_file
            .insert(file, merge_warnings(existing, std::iter::once(warning)));
    }

    /// Warnings for a suite: by exact file name, then with `extension`.
    pub fn lookup(&self, suite: &str, extension: &str) -> Option<&[Warning]> {
        self.by_file
            .get(suite)
            .or_else(|| self.by_file.get(&format!("{suite}{extension}")))
            .map(Vec::as_slice)
    }

    pub fn file_count(&self) -> usize {
        self.by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}

/// Attach recognized build warnings to the suites named after their files.
pub fn reconcile_warnings(
    builder: &mut ReportBuilder,
    issues: &[BuildIssue],
    config: &WarningsConfig,
    source_extension: &str,
) -> WarningStats {
    let (index, mut stats) = WarningIndex::from_issues(issues, config);
    if index.is_empty() {
        return stats;
    }

    for (module, suite) in builder.suite_names() {
        if let Some(warnings) = index.lookup(&suite, source_extension) {
            tracing::debug!("{} warnings for suite {}/{}", warnings.len(), module, suite);
            builder.add_suite_warnings(&module, &suite, warnings.to_vec());
            stats.attached_suites += 1;
        }
    }

    tracing::debug!(
        "{} files with warnings, {} suites received them",
        index.file_count(),
        stats.attached_suites
    );
    stats
}

#[cfg(test)]
#[path = "warnings_tests.rs"]
mod tests;
