// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repeatable tests and the merge engine.
//!
//! A repeatable test keeps every raw run the runner produced: one per device,
//! argument value and retry. `merged_tests` folds those runs back into one
//! outcome per identity path, which is the path with repetition nodes (and
//! optionally device nodes) removed.

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use super::{PathKind, PathNode, Status, Test};

/// All runs of one named test case within a suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepeatableTest {
    name: String,
    tests: Vec<Test>,
}

/// Identity of a run for merging: `(kind, name)` of each retained path node.
type IdentityKey<'a> = Vec<(PathKind, &'a str)>;

impl RepeatableTest {
    pub fn new(name: impl Into<String>, tests: Vec<Test>) -> Self {
        Self {
            name: name.into(),
            tests,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw runs, in the order the runner reported them.
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// Common status of all raw runs, or `mixed` when they disagree.
    pub fn combined_status(&self) -> Status {
        Status::combined(self.tests.iter().map(|t| t.status))
    }

    /// Wall time across every raw run.
    pub fn total_duration(&self) -> Duration {
        sum_durations(self.tests.iter())
    }

    /// Append runs discovered for the same test case elsewhere in the tree.
    pub(crate) fn with_runs(mut self, runs: Vec<Test>) -> Self {
        self.tests.extend(runs);
        self
    }

    /// Collapse raw runs into one test per identity path.
    ///
    /// Runs that differ only by repetition (and by device, when
    /// `filter_devices` is set) merge: durations are summed, the first
    /// message wins, and the status is the terminal identity node's own
    /// result if it recorded one, else the combined status of the runs.
    /// Output follows the first-seen order of identity paths.
    pub fn merged_tests(&self, filter_devices: bool) -> Vec<Test> {
        let mut groups: Vec<Vec<&Test>> = Vec::new();
        let mut index: HashMap<IdentityKey<'_>, usize> = HashMap::new();

        for test in &self.tests {
            let key = identity_key(&test.path, filter_devices);
            match index.get(&key) {
                Some(&i) => groups[i].push(test),
                None => {
                    index.insert(key, groups.len());
                    groups.push(vec![test]);
                }
            }
        }

        groups
            .iter()
            .filter_map(|members| merge_group(members, filter_devices))
            .collect()
    }
}

fn is_identity_node(node: &PathNode, filter_devices: bool) -> bool {
    match node.kind {
        PathKind::Repetition => false,
        PathKind::Device => !filter_devices,
        PathKind::Arguments => true,
    }
}

fn identity_key(path: &[PathNode], filter_devices: bool) -> IdentityKey<'_> {
    debug_assert!(
        path.iter()
            .rev()
            .skip(1)
            .all(|n| n.kind != PathKind::Repetition),
        "repetition must terminate a path"
    );
    path.iter()
        .filter(|n| is_identity_node(n, filter_devices))
        .map(|n| (n.kind, n.name.as_str()))
        .collect()
}

/// Sum of run durations, saturating at `Duration::MAX`.
fn sum_durations<'a>(tests: impl Iterator<Item = &'a Test>) -> Duration {
    tests.fold(Duration::ZERO, |total, t| total.saturating_add(t.duration))
}

fn merge_group(members: &[&Test], filter_devices: bool) -> Option<Test> {
    let (first, _) = members.split_first()?;
    let duration = sum_durations(members.iter().copied());

    let path: Vec<PathNode> = first
        .path
        .iter()
        .filter(|n| is_identity_node(n, filter_devices))
        .map(|n| PathNode {
            duration: Some(duration),
            ..n.clone()
        })
        .collect();

    let terminal = path.last();
    let status = terminal
        .and_then(|n| n.result)
        .unwrap_or_else(|| Status::combined(members.iter().map(|t| t.status)));
    let message = members
        .iter()
        .find_map(|t| t.message.clone())
        .or_else(|| terminal.and_then(|n| n.message.clone()));

    Some(Test {
        status,
        duration,
        message,
        path,
    })
}

#[cfg(test)]
#[path = "repeatable_tests.rs"]
mod tests;
