// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report construction pipeline.
//!
//! Decode → aggregate → reconcile coverage → reconcile warnings → finish.
//! Every payload is decoded before anything is built, so a decode failure
//! never leaves a partial report behind.

use std::path::{Path, PathBuf};

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Report, ReportBuilder};
use crate::parallel::TaskGroup;
use crate::raw::{Payload, decode_build_warnings, decode_coverage, decode_test_results};
use crate::reconcile::{ReconcileStats, reconcile_coverage, reconcile_warnings};

/// Raw JSON payloads exported from one result bundle.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub test_results: String,
    pub coverage: Option<String>,
    pub warnings: Option<String>,
}

/// Where to read each payload from.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub test_results: PathBuf,
    pub coverage: Option<PathBuf>,
    pub warnings: Option<PathBuf>,
}

impl InputPaths {
    /// Read every payload file concurrently.
    pub fn read(&self, group: &TaskGroup) -> Result<Inputs> {
        let mut jobs = vec![(Payload::TestResults, self.test_results.as_path())];
        jobs.extend(self.coverage.as_deref().map(|p| (Payload::Coverage, p)));
        jobs.extend(self.warnings.as_deref().map(|p| (Payload::BuildWarnings, p)));

        let contents = group.map_ordered(jobs, |(payload, path)| {
            read_payload(path).map(|content| (payload, content))
        })?;

        let mut inputs = Inputs::default();
        for (payload, content) in contents {
            match payload {
                Payload::TestResults => inputs.test_results = content,
                Payload::Coverage => inputs.coverage = Some(content),
                Payload::BuildWarnings => inputs.warnings = Some(content),
            }
        }
        Ok(inputs)
    }
}

fn read_payload(path: &Path) -> Result<String> {
    tracing::trace!("reading {}", path.display());
    std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Build the report from raw payloads.
pub fn build_report(inputs: &Inputs, config: &Config) -> Result<Report> {
    build_report_with_stats(inputs, config).map(|(report, _)| report)
}

/// Build the report, also returning reconciliation counters.
pub fn build_report_with_stats(inputs: &Inputs, config: &Config) -> Result<(Report, ReconcileStats)> {
    let nodes = decode_test_results(&inputs.test_results)?;
    let coverage = inputs.coverage.as_deref().map(decode_coverage).transpose()?;
    let warnings = inputs.warnings.as_deref().map(decode_build_warnings).transpose()?;
    tracing::trace!("decoded {} top-level test nodes", nodes.len());

    let mut builder = ReportBuilder::new();
    aggregate(&nodes, &mut builder);
    tracing::trace!("aggregated {} modules", builder.module_names().len());

    let mut stats = ReconcileStats::default();
    if let Some(table) = &coverage {
        stats.coverage = reconcile_coverage(&mut builder, table, &config.coverage);
        tracing::debug!("coverage: {:?}", stats.coverage);
    }
    if let Some(issues) = &warnings {
        stats.warnings = reconcile_warnings(
            &mut builder,
            issues,
            &config.warnings,
            &config.coverage.source_extension,
        );
        tracing::debug!("warnings: {:?}", stats.warnings);
    }

    let reported = coverage.as_ref().and_then(|t| t.reported_fraction());
    Ok((builder.finish(reported), stats))
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
