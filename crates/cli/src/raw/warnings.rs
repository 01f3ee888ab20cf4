// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build issues as exported by `xcresulttool get build-results`.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

use super::{Document, Payload, decode_document};
use crate::error::Result;

/// One build issue (warning, analyzer warning or error).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildIssue {
    pub issue_type: String,
    pub message: String,
    #[serde(rename = "sourceURL", default)]
    pub source_url: Option<String>,
}

impl BuildIssue {
    /// File name the issue points at.
    ///
    /// The last path component of `sourceURL`, ignoring any query or fragment,
    /// percent-decoded. `None` when the issue has no usable location.
    pub fn file_name(&self) -> Option<String> {
        let url = self.source_url.as_deref()?;
        let url = url.split(['#', '?']).next().unwrap_or(url);
        let last = url.rsplit('/').next()?;
        if last.is_empty() {
            return None;
        }
        Some(percent_decode_str(last).decode_utf8_lossy().into_owned())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildResults {
    warnings: Vec<BuildIssue>,
    #[serde(default)]
    analyzer_warnings: Vec<BuildIssue>,
}

/// Decode the build-results JSON into its warning entries.
///
/// Accepts the full build-results object (warnings followed by analyzer
/// warnings) or a bare array of issues. The object must carry `warnings`.
pub fn decode_build_warnings(json: &str) -> Result<Vec<BuildIssue>> {
    Ok(
        match decode_document::<BuildResults, Vec<BuildIssue>>(Payload::BuildWarnings, json)? {
            Document::Object(BuildResults {
                mut warnings,
                analyzer_warnings,
            }) => {
                warnings.extend(analyzer_warnings);
                warnings
            }
            Document::Array(issues) => issues,
        },
    )
}

#[cfg(test)]
#[path = "warnings_tests.rs"]
mod tests;
