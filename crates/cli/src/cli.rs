// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::format::FormatOptions;
use crate::pipeline::InputPaths;

/// Summarize test results, coverage and build warnings from an xcresult export
#[derive(Parser)]
#[command(name = "xcreport")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "XCREPORT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List modules, suites and tests
    List(ReportArgs),
    /// Count tests by outcome
    Count(ReportArgs),
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Test results JSON (`xcresulttool get test-results tests`)
    #[arg(short, long, value_name = "FILE")]
    pub tests: PathBuf,

    /// Coverage JSON (`xccov view --report --json`)
    #[arg(long, value_name = "FILE")]
    pub coverage: Option<PathBuf>,

    /// Build results JSON (`xcresulttool get build-results`)
    #[arg(long, value_name = "FILE")]
    pub warnings: Option<PathBuf>,

    /// Merge runs of the same test across devices
    #[arg(long)]
    pub filter_devices: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Compact JSON output (single line)
    #[arg(long)]
    pub compact: bool,

    /// Worker threads for reading inputs (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl ReportArgs {
    pub fn input_paths(&self) -> InputPaths {
        InputPaths {
            test_results: self.tests.clone(),
            coverage: self.coverage.clone(),
            warnings: self.warnings.clone(),
        }
    }

    /// Formatter options; `--filter-devices` adds to the config setting.
    pub fn format_options(&self, config: &Config) -> FormatOptions {
        FormatOptions {
            filter_devices: self.filter_devices || config.merge.filter_devices,
            compact: self.compact,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
