// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles xcreport.toml parsing with version validation and unknown key warnings.

mod parse;
mod suggest;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use parse::{parse_coverage_config, parse_merge_config, parse_warnings_config};
use suggest::warn_unknown_section;

pub use suggest::suggest_section_name;

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    merge: Option<toml::Value>,

    #[serde(default)]
    coverage: Option<toml::Value>,

    #[serde(default)]
    warnings: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Merge engine configuration.
    #[serde(default)]
    pub merge: MergeConfig,

    /// Coverage reconciliation configuration.
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// Build warning configuration.
    #[serde(default)]
    pub warnings: WarningsConfig,
}

/// Merge engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeConfig {
    /// Merge runs of the same test across devices.
    #[serde(default)]
    pub filter_devices: bool,
}

/// Coverage reconciliation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CoverageConfig {
    /// Source file extension appended to suite names when matching files.
    #[serde(default = "CoverageConfig::default_source_extension")]
    pub source_extension: String,

    /// Suffix that distinguishes test modules/suites from what they test.
    #[serde(default = "CoverageConfig::default_test_suffix")]
    pub test_suffix: String,

    /// Extensions stripped from coverage target names before matching.
    #[serde(default = "CoverageConfig::default_bundle_extensions")]
    pub bundle_extensions: Vec<String>,

    /// Extensions marking test-bundle targets, which never carry module coverage.
    #[serde(default = "CoverageConfig::default_test_bundle_extensions")]
    pub test_bundle_extensions: Vec<String>,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            source_extension: Self::default_source_extension(),
            test_suffix: Self::default_test_suffix(),
            bundle_extensions: Self::default_bundle_extensions(),
            test_bundle_extensions: Self::default_test_bundle_extensions(),
        }
    }
}

impl CoverageConfig {
    pub(crate) fn default_source_extension() -> String {
        ".swift".to_string()
    }

    pub(crate) fn default_test_suffix() -> String {
        "Tests".to_string()
    }

    pub(crate) fn default_bundle_extensions() -> Vec<String> {
        [".framework", ".app", ".xctest", ".appex", ".bundle", ".dylib", ".a"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub(crate) fn default_test_bundle_extensions() -> Vec<String> {
        vec![".xctest".to_string()]
    }

    /// Whether a coverage target is a test bundle (`FooTests.xctest`).
    pub fn is_test_bundle(&self, target: &str) -> bool {
        self.test_bundle_extensions
            .iter()
            .any(|ext| !ext.is_empty() && target.ends_with(ext.as_str()))
    }
}

/// Build warning configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WarningsConfig {
    /// Issue types treated as warnings; everything else is dropped.
    #[serde(default = "WarningsConfig::default_categories")]
    pub categories: Vec<String>,
}

impl Default for WarningsConfig {
    fn default() -> Self {
        Self {
            categories: Self::default_categories(),
        }
    }
}

impl WarningsConfig {
    pub(crate) fn default_categories() -> Vec<String> {
        [
            "Swift Compiler Warning",
            "Clang Compiler Warning",
            "Deprecation",
            "Warning",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    pub fn is_recognized(&self, issue_type: &str) -> bool {
        self.categories.iter().any(|c| c == issue_type)
    }
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "merge", "coverage", "warnings"];

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_with_warnings(&content, path)
}

fn check_version(version: i64, path: &Path) -> Result<()> {
    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade xcreport to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(())
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;
    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;
    check_version(version, path)?;

    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_section(path, key);
        }
    }

    Ok(Config {
        version: flexible.version,
        merge: parse_merge_config(flexible.merge.as_ref(), path),
        coverage: parse_coverage_config(flexible.coverage.as_ref(), path),
        warnings: parse_warnings_config(flexible.warnings.as_ref(), path),
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
