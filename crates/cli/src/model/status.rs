// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use serde::Serialize;

use crate::raw::RawResult;

/// Outcome of a test run, or of a group of runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Success,
    Failure,
    ExpectedFailure,
    Skipped,
    Mixed,
    Unknown,
}

impl Status {
    /// Collapse a set of statuses into one.
    ///
    /// The common status when all agree, [`Status::Mixed`] otherwise, and
    /// [`Status::Success`] for an empty set.
    pub fn combined<I>(statuses: I) -> Status
    where
        I: IntoIterator<Item = Status>,
    {
        let mut iter = statuses.into_iter();
        let Some(first) = iter.next() else {
            return Status::Success;
        };
        if iter.all(|s| s == first) {
            first
        } else {
            Status::Mixed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::ExpectedFailure => "expected failure",
            Status::Skipped => "skipped",
            Status::Mixed => "mixed",
            Status::Unknown => "unknown",
        }
    }
}

impl From<RawResult> for Status {
    fn from(result: RawResult) -> Self {
        match result {
            RawResult::Passed => Status::Success,
            RawResult::Failed => Status::Failure,
            RawResult::Skipped => Status::Skipped,
            RawResult::ExpectedFailure => Status::ExpectedFailure,
            RawResult::Unknown => Status::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
