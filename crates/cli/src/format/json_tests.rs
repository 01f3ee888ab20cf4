// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::format::test_support::{empty_report, sample_report};

fn render(view: View, options: FormatOptions) -> serde_json::Value {
    let output = JsonFormatter::new(view, options).format(&sample_report()).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn list_includes_tree() {
    let value = render(View::List, FormatOptions::default());

    let module = &value["modules"][0];
    assert_eq!(module["name"], "AppTests");
    assert_eq!(module["coverage"]["coveredLines"], 50);

    let suite = &module["suites"][0];
    assert_eq!(suite["name"], "LoginTests");
    assert_eq!(suite["warnings"][0]["kind"], "Swift Compiler Warning");
    assert_eq!(suite["counts"]["mixed"], 1);

    let logout = &suite["tests"][1];
    assert_eq!(logout["name"], "testLogout()");
    assert_eq!(logout["status"], "mixed");
    assert_eq!(logout["runs"], 2);
    assert_eq!(logout["durationMs"], 150.0);
    assert_eq!(logout["merged"][0]["status"], "mixed");
    assert_eq!(logout["merged"][0]["path"][0]["kind"], "device");
    assert_eq!(logout["merged"][0]["path"][0]["durationMs"], 150.0);
}

#[test]
fn count_has_no_tree() {
    let value = render(View::Count, FormatOptions::default());

    assert!(value.get("modules").is_none());
    assert_eq!(value["counts"]["total"], 2);
    assert_eq!(value["counts"]["expectedFailure"], 0);
    assert_eq!(value["coverage"], 0.6);
}

#[test]
fn absent_coverage_is_null() {
    let output = JsonFormatter::new(View::Count, FormatOptions::default())
        .format(&empty_report())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(value["coverage"].is_null());
}

#[test]
fn compact_is_single_line() {
    let options = FormatOptions {
        compact: true,
        ..FormatOptions::default()
    };
    let output = JsonFormatter::new(View::List, options)
        .format(&sample_report())
        .unwrap();
    assert_eq!(output.lines().count(), 1);
}
