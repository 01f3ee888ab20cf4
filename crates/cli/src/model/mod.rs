// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report data model.
//!
//! Modules → suites → repeatable tests → individual test runs. Everything is
//! plain data; the only way to assemble a [`Report`] is through
//! [`ReportBuilder`], and a finished report is read-only.

mod builder;
mod repeatable;
mod report;
mod status;

pub use builder::ReportBuilder;
pub use repeatable::RepeatableTest;
pub use report::{Counts, Coverage, Module, Report, Suite, Warning, merge_warnings};
pub use status::Status;
pub use test::{PathKind, PathNode, Test};

use std::time::Duration;

use serde::Serializer;

/// Serialize a duration as fractional milliseconds.
pub(crate) fn serialize_millis<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

pub(crate) fn serialize_opt_millis<S: Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serialize_millis(d, serializer),
        None => serializer.serialize_none(),
    }
}
