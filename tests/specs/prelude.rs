// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running `xcreport list` and `xcreport count`
//! against the payload fixtures in `tests/fixtures/xcresult`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::PathBuf;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the xcreport binary
pub fn xcreport_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("xcreport"))
}

/// Path to a payload in `tests/fixtures/xcresult`.
pub fn payload(name: &str) -> PathBuf {
    fixture("xcresult").join(name)
}

/// Builder for `xcreport list` against the fixture payloads
pub fn list() -> Run<Text> {
    Run::new("list")
}

/// Builder for `xcreport count` against the fixture payloads
pub fn count() -> Run<Text> {
    Run::new("count")
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// Fluent builder for one report invocation.
///
/// Runs inside a fresh directory that is its own git root, so config
/// discovery only sees what the test writes.
pub struct Run<Mode = Text> {
    command: &'static str,
    dir: tempfile::TempDir,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl Run<Text> {
    fn new(command: &'static str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let tests = payload("tests.json");
        Self {
            command,
            dir,
            args: vec!["--tests".to_string(), tests.display().to_string()],
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    pub fn json(self) -> Run<Json> {
        Run {
            command: self.command,
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        self.run(Some(0))
    }

    pub fn exits(self, code: i32) -> RunAssert {
        self.run(Some(code))
    }
}

#[allow(dead_code)]
impl Run<Json> {
    /// Run, expect success, and parse stdout.
    pub fn passes(self) -> serde_json::Value {
        let output = self.run(Some(0));
        serde_json::from_slice(&output.output.stdout).expect("stdout should be valid JSON")
    }
}

#[allow(dead_code)]
impl<Mode: 'static> Run<Mode> {
    /// Add the coverage fixture
    pub fn coverage(self) -> Self {
        let path = payload("coverage.json");
        self.args(&["--coverage", &path.display().to_string()])
    }

    /// Add the build warnings fixture
    pub fn warnings(self) -> Self {
        let path = payload("warnings.json");
        self.args(&["--warnings", &path.display().to_string()])
    }

    /// Write `xcreport.toml` into the working directory
    pub fn config(self, content: &str) -> Self {
        std::fs::write(self.dir.path().join("xcreport.toml"), content).unwrap();
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    fn run(self, code: Option<i32>) -> RunAssert {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = xcreport_cmd();
        cmd.arg(self.command);
        if is_json {
            cmd.args(["-o", "json"]);
        }
        cmd.args(&self.args);
        cmd.current_dir(self.dir.path());
        cmd.env_remove("XCREPORT_CONFIG");
        cmd.env_remove("XCREPORT_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("command should run");
        if let Some(code) = code {
            assert_eq!(
                output.status.code(),
                Some(code),
                "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        RunAssert { output }
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}
