// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for formatter tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use crate::model::{Coverage, PathNode, Report, ReportBuilder, Status, Test, Warning};

fn retry(name: &str, status: Status, millis: u64, message: Option<&str>) -> Test {
    let duration = Duration::from_millis(millis);
    Test::new(status, duration)
        .with_message(message.map(String::from))
        .with_path(vec![
            PathNode::device("iPhone 15"),
            PathNode::repetition(name)
                .with_result(status)
                .with_duration(duration),
        ])
}

/// One module, one suite, a passing test and a retried flaky test.
pub fn sample_report() -> Report {
    let mut builder = ReportBuilder::new();
    builder.add_runs(
        "AppTests",
        "LoginTests",
        "testLogin()",
        vec![Test::new(Status::Success, Duration::from_millis(250))],
    );
    builder.add_runs(
        "AppTests",
        "LoginTests",
        "testLogout()",
        vec![
            retry("First Run", Status::Failure, 100, Some("XCTAssertTrue failed")),
            retry("Retry 1", Status::Success, 50, None),
        ],
    );
    builder.set_module_coverage("AppTests", Coverage::new(50, 80));
    builder.set_suite_coverage("AppTests", "LoginTests", Coverage::new(30, 40));
    builder.add_suite_warnings(
        "AppTests",
        "LoginTests",
        vec![Warning::new("Swift Compiler Warning", "unused variable 'x'")],
    );
    builder.finish(Some(0.6))
}

pub fn empty_report() -> Report {
    ReportBuilder::new().finish(None)
}
