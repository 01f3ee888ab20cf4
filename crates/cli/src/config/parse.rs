// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.

use std::path::Path;

use super::{CoverageConfig, MergeConfig, WarningsConfig};

/// Parse a TOML array of strings into a Vec<String>.
fn parse_string_array(value: Option<&toml::Value>) -> Option<Vec<String>> {
    value?.as_array().map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

/// Parse a TOML string value with a default function.
fn parse_string_or_else<F>(value: Option<&toml::Value>, default: F) -> String
where
    F: FnOnce() -> String,
{
    value
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(default)
}

/// Warn about keys of `table` outside `known`, prefixed with `section`.
fn warn_unknown_fields(path: &Path, section: &str, table: &toml::Table, known: &[&str]) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("{section}.{key}"));
        }
    }
}

pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "xcreport: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Parse `[merge]`.
pub(super) fn parse_merge_config(value: Option<&toml::Value>, path: &Path) -> MergeConfig {
    let Some(toml::Value::Table(t)) = value else {
        return MergeConfig::default();
    };
    warn_unknown_fields(path, "merge", t, &["filter_devices"]);

    MergeConfig {
        filter_devices: t
            .get("filter_devices")
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
    }
}

/// Parse `[coverage]`.
pub(super) fn parse_coverage_config(value: Option<&toml::Value>, path: &Path) -> CoverageConfig {
    let Some(toml::Value::Table(t)) = value else {
        return CoverageConfig::default();
    };
    warn_unknown_fields(
        path,
        "coverage",
        t,
        &[
            "source_extension",
            "test_suffix",
            "bundle_extensions",
            "test_bundle_extensions",
        ],
    );

    CoverageConfig {
        source_extension: parse_string_or_else(
            t.get("source_extension"),
            CoverageConfig::default_source_extension,
        ),
        test_suffix: parse_string_or_else(t.get("test_suffix"), CoverageConfig::default_test_suffix),
        bundle_extensions: parse_string_array(t.get("bundle_extensions"))
            .unwrap_or_else(CoverageConfig::default_bundle_extensions),
        test_bundle_extensions: parse_string_array(t.get("test_bundle_extensions"))
            .unwrap_or_else(CoverageConfig::default_test_bundle_extensions),
    }
}

/// Parse `[warnings]`.
pub(super) fn parse_warnings_config(value: Option<&toml::Value>, path: &Path) -> WarningsConfig {
    let Some(toml::Value::Table(t)) = value else {
        return WarningsConfig::default();
    };
    warn_unknown_fields(path, "warnings", t, &["categories"]);

    WarningsConfig {
        categories: parse_string_array(t.get("categories"))
            .unwrap_or_else(WarningsConfig::default_categories),
    }
}
