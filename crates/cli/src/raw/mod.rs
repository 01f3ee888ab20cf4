// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decoders for the three payloads exported from an xcresult bundle.
//!
//! Each payload is fetched independently (test-results tree, coverage table,
//! build results) and decoded here into plain data. Decoding is the only
//! fallible phase of report construction.

pub mod coverage;
pub mod tree;
pub mod warnings;

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

pub use coverage::{CoverageFile, CoverageTable, CoverageTarget, decode_coverage};
pub use tree::{NodeKind, RawNode, RawResult, decode_test_results};
pub use warnings::{BuildIssue, decode_build_warnings};

/// Identifies which raw payload an error or input refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    TestResults,
    Coverage,
    BuildWarnings,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Payload::TestResults => "test results",
            Payload::Coverage => "coverage report",
            Payload::BuildWarnings => "build warnings",
        };
        f.write_str(name)
    }
}

/// Top-level shape of a payload: the tool's own object, or a bare array.
pub(crate) enum Document<O, A> {
    Object(O),
    Array(A),
}

/// Decode a payload after committing to its top-level shape.
///
/// Arrays decode as `A`, anything else as `O`, so field errors surface with
/// serde's own message instead of a generic "no variant matched".
pub(crate) fn decode_document<O, A>(payload: Payload, json: &str) -> Result<Document<O, A>>
where
    O: DeserializeOwned,
    A: DeserializeOwned,
{
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| Error::decode(payload, e))?;
    let document = if value.is_array() {
        serde_json::from_value(value).map(Document::Array)
    } else {
        serde_json::from_value(value).map(Document::Object)
    };
    document.map_err(|e| Error::decode(payload, e))
}
