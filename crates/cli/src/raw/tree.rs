// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw test-results tree.
//!
//! Mirrors the node shape of `xcresulttool get test-results tests`:
//!
//! ```text
//! {
//!   "testNodes": [
//!     { "name": "MyPlan", "nodeType": "Test Plan", "children": [
//!       { "name": "MyAppTests", "nodeType": "Unit test bundle", "children": [
//!         { "name": "LoginTests", "nodeType": "Test Suite", "children": [
//!           { "name": "testLogin()", "nodeType": "Test Case",
//!             "result": "Passed", "durationInSeconds": 0.12 }
//!         ]}
//!       ]}
//!     ]}
//!   ]
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;

use super::{Document, Payload, decode_document};
use crate::error::Result;

/// Kind of a node in the raw tree.
///
/// Unrecognized `nodeType` strings decode to [`NodeKind::Unknown`] rather than
/// failing, since the upstream tool adds kinds between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
    TestPlan,
    TestPlanConfiguration,
    UnitTestBundle,
    UiTestBundle,
    TestSuite,
    TestCase,
    Device,
    Arguments,
    Repetition,
    FailureMessage,
    RuntimeWarning,
    SourceCodeReference,
    Attachment,
    TestValue,
    Unknown,
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Test Plan" => NodeKind::TestPlan,
            "Test Plan Configuration" => NodeKind::TestPlanConfiguration,
            "Unit test bundle" => NodeKind::UnitTestBundle,
            "UI test bundle" => NodeKind::UiTestBundle,
            "Test Suite" => NodeKind::TestSuite,
            "Test Case" => NodeKind::TestCase,
            "Device" => NodeKind::Device,
            "Arguments" => NodeKind::Arguments,
            "Repetition" => NodeKind::Repetition,
            "Failure Message" => NodeKind::FailureMessage,
            "Runtime Warning" => NodeKind::RuntimeWarning,
            "Source Code Reference" => NodeKind::SourceCodeReference,
            "Attachment" => NodeKind::Attachment,
            "Test Value" => NodeKind::TestValue,
            _ => NodeKind::Unknown,
        }
    }
}

impl NodeKind {
    /// Bundles map to report modules.
    pub fn is_bundle(self) -> bool {
        matches!(self, NodeKind::UnitTestBundle | NodeKind::UiTestBundle)
    }
}

/// Recorded outcome of a raw node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RawResult {
    Passed,
    Failed,
    Skipped,
    ExpectedFailure,
    Unknown,
}

impl From<String> for RawResult {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Passed" => RawResult::Passed,
            "Failed" => RawResult::Failed,
            "Skipped" => RawResult::Skipped,
            "Expected Failure" => RawResult::ExpectedFailure,
            _ => RawResult::Unknown,
        }
    }
}

/// One node of the raw test-results tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub name: String,
    #[serde(rename = "nodeType")]
    pub kind: NodeKind,
    #[serde(default)]
    pub result: Option<RawResult>,
    #[serde(default)]
    pub duration_in_seconds: Option<f64>,
    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl RawNode {
    /// Node duration, if reported and representable.
    pub fn duration(&self) -> Option<Duration> {
        self.duration_in_seconds
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Diagnostic text carried by failure-message children, one per line.
    pub fn failure_message(&self) -> Option<String> {
        let lines: Vec<&str> = self
            .children
            .iter()
            .filter(|c| c.kind == NodeKind::FailureMessage)
            .map(|c| c.name.as_str())
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

#[derive(Deserialize)]
struct TestResultsDocument {
    #[serde(rename = "testNodes")]
    test_nodes: Vec<RawNode>,
}

/// Decode the test-results JSON into its top-level nodes.
///
/// Accepts the tool's `{"testNodes": [...]}` document or a bare node array.
pub fn decode_test_results(json: &str) -> Result<Vec<RawNode>> {
    Ok(
        match decode_document::<TestResultsDocument, Vec<RawNode>>(Payload::TestResults, json)? {
            Document::Object(document) => document.test_nodes,
            Document::Array(nodes) => nodes,
        },
    )
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
