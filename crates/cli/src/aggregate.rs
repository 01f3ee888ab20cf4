// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test aggregation.
//!
//! Walks the raw tree and files every test case under its module (test
//! bundle) and suite. Test plans, plan configurations and unrecognized nodes
//! are transparent containers.

use crate::model::ReportBuilder;
use crate::paths::extract_tests;
use crate::raw::{NodeKind, RawNode};

/// Module name for test cases found outside any bundle or test plan.
pub const DEFAULT_MODULE: &str = "Tests";

#[derive(Debug, Clone, Copy, Default)]
struct Scope<'a> {
    plan: Option<&'a str>,
    module: Option<&'a str>,
    suite: Option<&'a str>,
}

impl<'a> Scope<'a> {
    fn module(&self) -> &'a str {
        self.module.or(self.plan).unwrap_or(DEFAULT_MODULE)
    }

    /// Test cases directly under a bundle land in a suite named after it.
    fn suite(&self) -> &'a str {
        self.suite.unwrap_or_else(|| self.module())
    }
}

/// Add every test case in `nodes` to `builder`.
pub fn aggregate(nodes: &[RawNode], builder: &mut ReportBuilder) {
    for node in nodes {
        walk(node, Scope::default(), builder);
    }
}

fn walk<'a>(node: &'a RawNode, scope: Scope<'a>, builder: &mut ReportBuilder) {
    let scope = match node.kind {
        NodeKind::TestCase => {
            let tests = extract_tests(node);
            tracing::trace!(
                "{} / {} / {}: {} run(s)",
                scope.module(),
                scope.suite(),
                node.name,
                tests.len()
            );
            builder.add_runs(scope.module(), scope.suite(), &node.name, tests);
            return;
        }
        NodeKind::UnitTestBundle | NodeKind::UiTestBundle => {
            builder.ensure_module(&node.name);
            Scope {
                module: Some(node.name.as_str()),
                suite: None,
                ..scope
            }
        }
        NodeKind::TestSuite => {
            let scope = Scope {
                suite: Some(node.name.as_str()),
                ..scope
            };
            builder.ensure_suite(scope.module(), &node.name);
            scope
        }
        NodeKind::TestPlan => Scope {
            plan: Some(node.name.as_str()),
            ..scope
        },
        NodeKind::TestPlanConfiguration | NodeKind::Device | NodeKind::Unknown => scope,
        NodeKind::Arguments
        | NodeKind::Repetition
        | NodeKind::FailureMessage
        | NodeKind::RuntimeWarning
        | NodeKind::SourceCodeReference
        | NodeKind::Attachment
        | NodeKind::TestValue => return,
    };

    for child in &node.children {
        walk(child, scope, builder);
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
