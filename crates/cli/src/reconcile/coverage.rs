// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage reconciliation.
//!
//! Targets are matched to modules first, then each suite is matched to one
//! source file of its module's target.

use std::collections::{HashMap, HashSet};

use crate::config::CoverageConfig;
use crate::model::ReportBuilder;
use crate::raw::{CoverageFile, CoverageTable, CoverageTarget};

/// Counters describing how coverage entries landed in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageStats {
    pub matched_targets: usize,
    pub synthesized_modules: usize,
    pub unmatched_targets: usize,
    pub skipped_test_bundles: usize,
    pub matched_suites: usize,
    pub unmatched_suites: usize,
}

/// Module predicate: `(module, target, test_suffix)`.
type ModuleMatch = fn(&str, &str, &str) -> bool;

/// Module strategies, strongest first.
const MODULE_STRATEGIES: &[(&str, ModuleMatch)] = &[
    ("exact", module_exact),
    ("suffixed", module_suffixed),
    ("base name", module_base_name),
    ("containment", module_containment),
];

pub(crate) fn module_exact(module: &str, target: &str, _suffix: &str) -> bool {
    module == target
}

pub(crate) fn module_suffixed(module: &str, target: &str, suffix: &str) -> bool {
    !suffix.is_empty() && module.strip_suffix(suffix) == Some(target)
}

pub(crate) fn module_base_name(module: &str, target: &str, suffix: &str) -> bool {
    let base = strip_test_suffix(module, suffix);
    !base.is_empty() && base == strip_test_suffix(target, suffix)
}

pub(crate) fn module_containment(module: &str, target: &str, _suffix: &str) -> bool {
    !module.is_empty() && !target.is_empty() && (module.contains(target) || target.contains(module))
}

/// Names a suite is looked up by.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SuiteKeys<'a> {
    pub suite: &'a str,
    /// Suite name without the test suffix, when it had one.
    pub base: Option<&'a str>,
    pub extension: &'a str,
}

impl<'a> SuiteKeys<'a> {
    pub(crate) fn new(suite: &'a str, config: &'a CoverageConfig) -> Self {
        let base = suite
            .strip_suffix(config.test_suffix.as_str())
            .filter(|b| !config.test_suffix.is_empty() && !b.is_empty());
        Self {
            suite,
            base,
            extension: &config.source_extension,
        }
    }

    fn candidates(&self) -> impl Iterator<Item = &'a str> {
        std::iter::once(self.suite)
            .chain(self.base)
            .filter(|k| !k.is_empty())
    }
}

/// File predicate: `(file name, suite keys)`.
type FileMatch = fn(&str, &SuiteKeys<'_>) -> bool;

/// Suite strategies, strongest first.
const FILE_STRATEGIES: &[(&str, FileMatch)] = &[
    ("exact", file_exact),
    ("extension", file_with_extension),
    ("base name", file_base_name),
    ("containment", file_containment),
    ("stem", file_stem),
];

pub(crate) fn file_exact(file: &str, keys: &SuiteKeys<'_>) -> bool {
    file == keys.suite
}

pub(crate) fn file_with_extension(file: &str, keys: &SuiteKeys<'_>) -> bool {
    !keys.extension.is_empty() && file.strip_suffix(keys.extension) == Some(keys.suite)
}

pub(crate) fn file_base_name(file: &str, keys: &SuiteKeys<'_>) -> bool {
    keys.base.is_some_and(|base| {
        file == base || (!keys.extension.is_empty() && file.strip_suffix(keys.extension) == Some(base))
    })
}

pub(crate) fn file_containment(file: &str, keys: &SuiteKeys<'_>) -> bool {
    !file.is_empty()
        && keys
            .candidates()
            .any(|key| file.contains(key) || key.contains(file))
}

pub(crate) fn file_stem(file: &str, keys: &SuiteKeys<'_>) -> bool {
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    !stem.is_empty() && keys.candidates().any(|key| stem.eq_ignore_ascii_case(key))
}

fn strip_test_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return name;
    }
    name.strip_suffix(suffix).unwrap_or(name)
}

/// Strip one bundle extension (`Foo.framework` → `Foo`).
pub fn normalize_target_name<'a>(name: &'a str, extensions: &[String]) -> &'a str {
    extensions
        .iter()
        .filter(|ext| !ext.is_empty())
        .find_map(|ext| name.strip_suffix(ext.as_str()))
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(name)
}

/// First file matched by the strongest strategy that matches any file.
pub(crate) fn match_file<'f>(
    files: &[&'f CoverageFile],
    keys: &SuiteKeys<'_>,
) -> Option<(&'static str, &'f CoverageFile)> {
    FILE_STRATEGIES.iter().find_map(|(strategy, matches)| {
        files
            .iter()
            .find(|file| matches(&file.name, keys))
            .map(|file| (*strategy, *file))
    })
}

/// A coverage target waiting for a module.
struct Candidate<'t, 'm> {
    target: &'t CoverageTarget,
    name: &'t str,
    module: Option<(&'static str, &'m str)>,
}

/// Assign modules strategy by strategy, so a strong match anywhere in the
/// table beats a weaker one earlier in it. Ties go to the earlier target.
fn claim_modules<'m>(candidates: &mut [Candidate<'_, 'm>], modules: &'m [String], suffix: &str) {
    let mut claimed: HashSet<&str> = HashSet::new();
    for (strategy, matches) in MODULE_STRATEGIES {
        for candidate in candidates.iter_mut().filter(|c| c.module.is_none()) {
            let found = modules
                .iter()
                .find(|m| !claimed.contains(m.as_str()) && matches(m.as_str(), candidate.name, suffix));
            if let Some(module) = found {
                claimed.insert(module.as_str());
                candidate.module = Some((*strategy, module.as_str()));
            }
        }
    }
}

/// Attach target coverage to modules and file coverage to suites.
///
/// Modules that existed before reconciliation are the only ones a target can
/// claim, and each is claimed at most once. Test-bundle targets are skipped.
/// A target with coverage that matches nothing gets a module of its own.
pub fn reconcile_coverage(
    builder: &mut ReportBuilder,
    table: &CoverageTable,
    config: &CoverageConfig,
) -> CoverageStats {
    let mut stats = CoverageStats::default();
    let modules = builder.module_names();

    let mut code_targets: Vec<&CoverageTarget> = Vec::new();
    for target in &table.targets {
        if config.is_test_bundle(&target.name) {
            tracing::debug!("target {} is a test bundle, skipping", target.name);
            stats.skipped_test_bundles += 1;
        } else {
            code_targets.push(target);
        }
    }

    let mut candidates: Vec<Candidate<'_, '_>> = code_targets
        .iter()
        .map(|&target| Candidate {
            target,
            name: normalize_target_name(&target.name, &config.bundle_extensions),
            module: None,
        })
        .collect();
    claim_modules(&mut candidates, &modules, &config.test_suffix);

    let mut module_targets: HashMap<&str, &CoverageTarget> = HashMap::new();
    for Candidate { target, name, module } in &candidates {
        match module {
            Some((strategy, module)) => {
                tracing::debug!("target {} matched module {} ({})", target.name, module, strategy);
                module_targets.insert(*module, *target);
                builder.set_module_coverage(module, target.coverage());
                stats.matched_targets += 1;
            }
            None => match target.coverage() {
                Some(coverage) if !builder.has_module(name) => {
                    tracing::debug!("target {} has no tests, adding coverage-only module", target.name);
                    builder.set_module_coverage(name, Some(coverage));
                    stats.synthesized_modules += 1;
                }
                Some(_) => {
                    tracing::debug!("target {} matched nothing and {} is taken", target.name, name);
                    stats.unmatched_targets += 1;
                }
                None => {
                    tracing::debug!("target {} matched nothing and has no coverage", target.name);
                    stats.unmatched_targets += 1;
                }
            },
        }
    }

    let all_files: Vec<&CoverageFile> = code_targets.iter().flat_map(|t| &t.files).collect();

    for (module, suite) in builder.suite_names() {
        let files: Vec<&CoverageFile> = match module_targets.get(module.as_str()) {
            Some(target) => target.files.iter().collect(),
            None => all_files.clone(),
        };
        let keys = SuiteKeys::new(&suite, config);
        match match_file(&files, &keys) {
            Some((strategy, file)) => {
                tracing::debug!("suite {}/{} matched file {} ({})", module, suite, file.name, strategy);
                builder.set_suite_coverage(&module, &suite, file.coverage());
                stats.matched_suites += 1;
            }
            None => {
                tracing::debug!("suite {}/{} matched no coverage file", module, suite);
                stats.unmatched_suites += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
