// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test report aggregation for xcresult exports.
//!
//! Three independently exported payloads (the test-results tree, the
//! coverage table and the build results) are decoded, folded into a
//! module → suite → test report, and reconciled so that coverage and build
//! warnings sit next to the tests they belong to.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod format;
pub mod model;
pub mod parallel;
pub mod paths;
pub mod pipeline;
pub mod raw;
pub mod reconcile;

pub use cli::{Cli, Command, OutputFormat, ReportArgs};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use model::{Module, RepeatableTest, Report, Status, Suite, Test};
pub use pipeline::{Inputs, build_report};
