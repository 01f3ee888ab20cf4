// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage table as exported by `xccov view --report --json`.

use serde::Deserialize;

use super::{Document, Payload, decode_document};
use crate::error::Result;
use crate::model::Coverage;

/// Per-file coverage entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageFile {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub covered_lines: u64,
    #[serde(default)]
    pub executable_lines: u64,
    #[serde(default)]
    pub line_coverage: f64,
}

impl CoverageFile {
    pub fn coverage(&self) -> Option<Coverage> {
        Coverage::new(self.covered_lines, self.executable_lines)
    }
}

/// Aggregate coverage for one build target, with its files.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageTarget {
    pub name: String,
    #[serde(default)]
    pub covered_lines: u64,
    #[serde(default)]
    pub executable_lines: u64,
    #[serde(default)]
    pub line_coverage: f64,
    #[serde(default)]
    pub files: Vec<CoverageFile>,
}

impl CoverageTarget {
    pub fn coverage(&self) -> Option<Coverage> {
        Coverage::new(self.covered_lines, self.executable_lines)
    }
}

/// Decoded coverage report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageTable {
    #[serde(default)]
    pub covered_lines: Option<u64>,
    #[serde(default)]
    pub executable_lines: Option<u64>,
    #[serde(default)]
    pub line_coverage: Option<f64>,
    pub targets: Vec<CoverageTarget>,
}

impl CoverageTable {
    /// Overall fraction reported by the tool itself, if any and non-zero.
    ///
    /// Prefers `lineCoverage`; falls back to the top-level line counts.
    pub fn reported_fraction(&self) -> Option<f64> {
        if let Some(fraction) = self.line_coverage.filter(|f| *f > 0.0 && f.is_finite()) {
            return Some(fraction.min(1.0));
        }
        match (self.covered_lines, self.executable_lines) {
            (Some(covered), Some(total)) => {
                Coverage::new(covered, total).map(|c| c.fraction).filter(|f| *f > 0.0)
            }
            _ => None,
        }
    }
}

/// Decode the coverage JSON.
///
/// Accepts the full report object, which must carry `targets`, or a bare
/// array of targets.
pub fn decode_coverage(json: &str) -> Result<CoverageTable> {
    Ok(
        match decode_document::<CoverageTable, Vec<CoverageTarget>>(Payload::Coverage, json)? {
            Document::Object(table) => table,
            Document::Array(targets) => CoverageTable {
                targets,
                ..CoverageTable::default()
            },
        },
    )
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
