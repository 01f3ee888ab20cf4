// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Path extraction.
//!
//! A test case node fans out into devices, argument values and repetitions.
//! Every terminal execution becomes one [`Test`] whose `path` records the
//! structural nodes it ran under, in pre-order.

use std::time::Duration;

use crate::model::{PathKind, PathNode, Status, Test};
use crate::raw::RawNode;

/// Extract one test per terminal execution of a test case.
///
/// A test case without any device, arguments or repetition children yields a
/// single test built from its own result, with an empty path.
pub fn extract_tests(case: &RawNode) -> Vec<Test> {
    let paths = extract_paths(&case.children);
    if paths.is_empty() {
        return vec![case_test(case)];
    }

    let single = paths.len() == 1;
    paths
        .into_iter()
        .map(|path| test_from_path(case, path, single))
        .collect()
}

/// Walk `children` and return every structural path, left to right.
///
/// Paths end at a repetition, at an arguments node without repetition
/// descendants, or at a device with no structural children.
pub fn extract_paths(children: &[RawNode]) -> Vec<Vec<PathNode>> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    collect(children, &mut prefix, &mut out);
    out
}

fn collect(children: &[RawNode], prefix: &mut Vec<PathNode>, out: &mut Vec<Vec<PathNode>>) {
    for child in children {
        let Some(kind) = PathKind::from_node_kind(child.kind) else {
            continue;
        };
        prefix.push(path_node(child, kind));
        match kind {
            PathKind::Repetition => out.push(prefix.clone()),
            PathKind::Arguments => {
                if has_repetition(&child.children) {
                    collect(&child.children, prefix, out);
                } else {
                    out.push(prefix.clone());
                }
            }
            PathKind::Device => {
                let before = out.len();
                collect(&child.children, prefix, out);
                if out.len() == before {
                    out.push(prefix.clone());
                }
            }
        }
        prefix.pop();
    }
}

/// Whether any structural descendant is a repetition.
fn has_repetition(children: &[RawNode]) -> bool {
    children
        .iter()
        .any(|child| match PathKind::from_node_kind(child.kind) {
            Some(PathKind::Repetition) => true,
            Some(_) => has_repetition(&child.children),
            None => false,
        })
}

fn path_node(node: &RawNode, kind: PathKind) -> PathNode {
    PathNode {
        name: node.name.clone(),
        kind,
        result: node.result.map(Status::from),
        duration: node.duration(),
        message: node.failure_message(),
    }
}

fn case_status(case: &RawNode) -> Status {
    case.result.map(Status::from).unwrap_or(Status::Unknown)
}

fn case_test(case: &RawNode) -> Test {
    Test::new(case_status(case), case.duration().unwrap_or(Duration::ZERO))
        .with_message(case.failure_message())
}

fn test_from_path(case: &RawNode, path: Vec<PathNode>, single: bool) -> Test {
    let terminal = path.last();
    let status = terminal
        .and_then(|n| n.result)
        .unwrap_or_else(|| case_status(case));
    let duration = terminal
        .and_then(|n| n.duration)
        .or_else(|| if single { case.duration() } else { None })
        .unwrap_or(Duration::ZERO);
    let message = terminal
        .and_then(|n| n.message.clone())
        .or_else(|| if single { case.failure_message() } else { None });

    Test::new(status, duration)
        .with_message(message)
        .with_path(path)
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
