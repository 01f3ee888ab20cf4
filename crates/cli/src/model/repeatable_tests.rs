// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use proptest::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn run(status: Status, millis: u64, path: Vec<PathNode>) -> Test {
    Test::new(status, ms(millis)).with_path(path)
}

fn device() -> PathNode {
    PathNode::device("iPhone 13")
}

fn rep(name: &str, status: Status, millis: u64) -> PathNode {
    PathNode::repetition(name)
        .with_result(status)
        .with_duration(ms(millis))
}

#[test]
fn empty_test_merges_to_nothing() {
    let test = RepeatableTest::new("testNothing()", Vec::new());
    assert!(test.merged_tests(false).is_empty());
    assert_eq!(test.combined_status(), Status::Success);
}

#[test]
fn repetitions_on_one_device_merge_into_one() {
    let test = RepeatableTest::new(
        "testExample()",
        vec![
            run(
                Status::Success,
                100,
                vec![device(), rep("First Run", Status::Success, 100)],
            ),
            run(
                Status::Success,
                50,
                vec![device(), rep("Retry 1", Status::Success, 50)],
            ),
            run(
                Status::Success,
                30,
                vec![device(), rep("Retry 2", Status::Success, 30)],
            ),
        ],
    );

    let merged = test.merged_tests(false);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].status, Status::Success);
    // Repetition durations add up: 100 + 50 + 30.
    assert_eq!(merged[0].duration, ms(180));
    assert_eq!(merged[0].path, vec![device().with_duration(ms(180))]);
}

#[test]
fn huge_repetition_durations_saturate() {
    let huge = Duration::from_secs(u64::MAX / 2 + 1);
    let long_rep = |name: &str| {
        Test::new(Status::Success, huge).with_path(vec![
            device(),
            PathNode::repetition(name)
                .with_result(Status::Success)
                .with_duration(huge),
        ])
    };
    let test = RepeatableTest::new("testForever()", vec![long_rep("First Run"), long_rep("Retry 1")]);

    assert_eq!(test.total_duration(), Duration::MAX);
    let merged = test.merged_tests(false);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].duration, Duration::MAX);
}

#[test]
fn disagreeing_repetitions_without_terminal_result_are_mixed() {
    let args = PathNode::arguments("false");
    let test = RepeatableTest::new(
        "testToggle(_:)",
        vec![
            run(
                Status::Success,
                20,
                vec![
                    device(),
                    args.clone(),
                    rep("First Run", Status::Success, 20),
                ],
            ),
            run(
                Status::Failure,
                25,
                vec![device(), args.clone(), rep("Retry 1", Status::Failure, 25)],
            )
            .with_message(Some("XCTAssertTrue failed".to_string())),
        ],
    );

    let merged = test.merged_tests(false);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].status, Status::Mixed);
    assert_eq!(merged[0].duration, ms(45));
    assert_eq!(merged[0].message.as_deref(), Some("XCTAssertTrue failed"));
    assert_eq!(merged[0].path_label(), "iPhone 13 > false");
}

#[test]
fn distinct_arguments_never_merge() {
    let test = RepeatableTest::new(
        "testToggle(_:)",
        vec![
            run(
                Status::Failure,
                10,
                vec![
                    device(),
                    PathNode::arguments("false").with_result(Status::Failure),
                    rep("First Run", Status::Failure, 10),
                ],
            ),
            run(
                Status::Failure,
                12,
                vec![
                    device(),
                    PathNode::arguments("false").with_result(Status::Failure),
                    rep("Retry 1", Status::Failure, 12),
                ],
            ),
            run(
                Status::Success,
                8,
                vec![
                    device(),
                    PathNode::arguments("true").with_result(Status::Success),
                ],
            ),
        ],
    );

    let merged = test.merged_tests(false);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].status, Status::Failure);
    assert_eq!(merged[0].duration, ms(22));
    assert_eq!(merged[0].path_label(), "iPhone 13 > false");
    assert_eq!(merged[1].status, Status::Success);
    assert_eq!(merged[1].duration, ms(8));
    assert_eq!(merged[1].path_label(), "iPhone 13 > true");
    assert_eq!(test.combined_status(), Status::Mixed);
}

#[test]
fn terminal_node_result_wins_over_runs() {
    let test = RepeatableTest::new(
        "testFlaky()",
        vec![
            run(
                Status::Failure,
                5,
                vec![
                    PathNode::device("iPad").with_result(Status::Success),
                    rep("First Run", Status::Failure, 5),
                ],
            ),
            run(
                Status::Success,
                5,
                vec![
                    PathNode::device("iPad").with_result(Status::Success),
                    rep("Retry 1", Status::Success, 5),
                ],
            ),
        ],
    );

    let merged = test.merged_tests(false);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].status, Status::Success);
}

#[test]
fn filtering_devices_merges_across_devices() {
    let test = RepeatableTest::new(
        "testLaunch()",
        vec![
            run(
                Status::Success,
                40,
                vec![PathNode::device("iPhone 15").with_result(Status::Success)],
            ),
            run(
                Status::Failure,
                60,
                vec![PathNode::device("iPad Air").with_result(Status::Failure)],
            ),
        ],
    );

    assert_eq!(test.merged_tests(false).len(), 2);

    let merged = test.merged_tests(true);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].status, Status::Mixed);
    assert_eq!(merged[0].duration, ms(100));
    assert!(merged[0].path.is_empty());
}

#[test]
fn single_run_is_unchanged_apart_from_path_durations() {
    let original = run(
        Status::Skipped,
        7,
        vec![
            PathNode::arguments("42")
                .with_result(Status::Skipped)
                .with_message("not on CI"),
        ],
    )
    .with_message(Some("not on CI".to_string()));
    let test = RepeatableTest::new("testValue(_:)", vec![original.clone()]);

    let merged = test.merged_tests(false);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].status, original.status);
    assert_eq!(merged[0].duration, original.duration);
    assert_eq!(merged[0].message, original.message);
    assert_eq!(merged[0].path[0].duration, Some(ms(7)));
    assert_eq!(merged[0].path[0].message.as_deref(), Some("not on CI"));
}

#[test]
fn message_falls_back_to_terminal_node() {
    let test = RepeatableTest::new(
        "testArg(_:)",
        vec![run(
            Status::Failure,
            3,
            vec![
                PathNode::arguments("1")
                    .with_result(Status::Failure)
                    .with_message("argument failed"),
            ],
        )],
    );
    let merged = test.merged_tests(false);
    assert_eq!(merged[0].message.as_deref(), Some("argument failed"));
}

#[test]
fn preserves_first_seen_order() {
    let test = RepeatableTest::new(
        "testOrder(_:)",
        vec![
            run(Status::Success, 1, vec![PathNode::arguments("b")]),
            run(Status::Success, 1, vec![PathNode::arguments("a")]),
            run(Status::Success, 1, vec![PathNode::arguments("b")]),
        ],
    );
    let names: Vec<String> = test
        .merged_tests(false)
        .iter()
        .map(|t| t.path_label())
        .collect();
    assert_eq!(names, vec!["b", "a"]);
}

proptest! {
    #[test]
    fn repetitions_of_one_path_sum_durations(durations in prop::collection::vec(0u64..10_000, 1..20)) {
        let runs: Vec<Test> = durations
            .iter()
            .enumerate()
            .map(|(i, d)| run(Status::Success, *d, vec![device(), rep(&format!("Retry {i}"), Status::Success, *d)]))
            .collect();
        let test = RepeatableTest::new("testProp()", runs);

        let merged = test.merged_tests(false);
        prop_assert_eq!(merged.len(), 1);
        prop_assert_eq!(merged[0].duration, ms(durations.iter().sum()));
        prop_assert_eq!(merged[0].duration, test.total_duration());
    }

    #[test]
    fn merged_duration_is_conserved(
        args in prop::collection::vec((0usize..4, 0u64..1_000), 0..30),
        filter_devices in any::<bool>(),
    ) {
        let runs: Vec<Test> = args
            .iter()
            .map(|(arg, d)| run(Status::Success, *d, vec![device(), PathNode::arguments(arg.to_string())]))
            .collect();
        let test = RepeatableTest::new("testConserve(_:)", runs);

        let merged = test.merged_tests(filter_devices);
        let distinct: std::collections::BTreeSet<_> = args.iter().map(|(a, _)| *a).collect();
        prop_assert_eq!(merged.len(), distinct.len());
        let total: Duration = merged.iter().map(|t| t.duration).sum();
        prop_assert_eq!(total, test.total_duration());
    }
}
