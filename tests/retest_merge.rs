//! Merging partitioned runs and their reruns, using report fixtures.
//!
//! all-last-failed.json = part1 + part2 (+ part2-rerun-failed)
//! all-passed.json      = part1 + part2 + part2-rerun-passed
//!
//! Features covered by the fixtures:
//!
//! Feature: Product categories
//!   Background:
//!     Given Open Home page
//!   Scenario: All categories are displayed on site
//!     When  Get list of existing products
//!     Then  List of categories is displayed on Home page and contains all values
//!
//! Feature: Home page
//!   Scenario: Open Home page
//!     Given Open Home page

use std::path::PathBuf;

use cukemerge::engine::{MergeOptions, ReportMergeEngine};
use cukemerge::error::MergeError;
use cukemerge::ingest;
use cukemerge::model::{Feature, Source, Status};
use cukemerge::reduce::ReducingMethod;
use cukemerge::report::result::ReportResult;

const ALL_FAILED: &str = "timestamped/all-last-failed.json";
const ALL_PASSED: &str = "timestamped/all-passed.json";
const PART_ONE: &str = "timestamped/part1.json";
const PART_TWO: &str = "timestamped/part2.json";
const PART_TWO_RERUN_FAILED: &str = "timestamped/part2-rerun-failed.json";
const PART_TWO_RERUN_PASSED: &str = "timestamped/part2-rerun-passed.json";
const SAMPLE: &str = "legacy/sample.json";
const SAMPLE_FAILED: &str = "legacy/sample-failed.json";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sources(names: &[&str]) -> Vec<Source> {
    let paths: Vec<_> = names.iter().map(|n| fixture(n)).collect();
    ingest::load_sources(&paths, false).expect("fixtures load")
}

fn merge(method: ReducingMethod, names: &[&str]) -> Result<ReportResult, MergeError> {
    ReportMergeEngine::new(method, MergeOptions::default()).build(&sources(names))
}

fn single(name: &str) -> ReportResult {
    merge(ReducingMethod::None, &[name]).expect("single report merges")
}

/// Feature identity with scenario names and statuses, sorted. Timestamps,
/// durations and run metadata are left out.
fn shape(features: &[Feature]) -> Vec<(String, String, Vec<(String, Status)>)> {
    let mut shape: Vec<_> = features
        .iter()
        .map(|f| {
            let scenarios = f
                .scenarios()
                .iter()
                .map(|s| (s.name().to_string(), s.status()))
                .collect();
            (f.uri().to_string(), f.name().to_string(), scenarios)
        })
        .collect();
    shape.sort();
    shape
}

#[test]
fn all_failed_file_is_valid_report() {
    assert_eq!(single(ALL_FAILED).features().len(), 2);
}

#[test]
fn part_one_is_valid_report() {
    assert_eq!(single(PART_ONE).features().len(), 1);
}

#[test]
fn part_two_is_valid_report() {
    let result = single(PART_TWO);
    assert_eq!(result.features().len(), 1);
    assert_eq!(result.failed_scenarios(), 1);
}

#[test]
fn parts_with_failed_rerun_count_one_failure() {
    let result = merge(
        ReducingMethod::MergeWithRetest,
        &[PART_ONE, PART_TWO, PART_TWO_RERUN_FAILED],
    )
    .unwrap();

    assert_eq!(result.features().len(), 2);
    assert_eq!(result.failed_scenarios(), 1);
    assert_eq!(result.summary().scenarios.total, 2);
}

#[test]
fn parts_with_failed_rerun_equal_all_in_one_failed() {
    let merged = merge(
        ReducingMethod::MergeWithRetest,
        &[PART_ONE, PART_TWO, PART_TWO_RERUN_FAILED],
    )
    .unwrap();
    let all_in_one = single(ALL_FAILED);

    assert_eq!(shape(merged.features()), shape(all_in_one.features()));
}

#[test]
fn parts_with_passed_rerun_equal_all_in_one_passed() {
    let merged = merge(
        ReducingMethod::MergeWithRetest,
        &[PART_ONE, PART_TWO, PART_TWO_RERUN_PASSED],
    )
    .unwrap();
    let all_in_one = single(ALL_PASSED);

    assert_eq!(merged.features().len(), 2);
    assert_eq!(merged.failed_scenarios(), 0);
    assert_eq!(shape(merged.features()), shape(all_in_one.features()));
    assert_eq!(merged.summary().scenarios, all_in_one.summary().scenarios);
    assert_eq!(merged.summary().steps, all_in_one.summary().steps);
}

#[test]
fn rerun_keeps_first_seen_feature_order() {
    let merged = merge(
        ReducingMethod::MergeWithRetest,
        &[PART_ONE, PART_TWO, PART_TWO_RERUN_PASSED],
    )
    .unwrap();

    let names: Vec<_> = merged.features().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["Home page", "Product categories"]);

    let rerun = &merged.features()[1].scenarios()[0];
    assert_eq!(rerun.status(), Status::Passed);
    assert_eq!(rerun.background().len(), 1, "background travels with the rerun");
    assert_eq!(
        rerun.start_timestamp().unwrap().to_rfc3339(),
        "2021-03-18T13:50:02.341+00:00"
    );
}

#[test]
fn concatenation_double_counts_reruns() {
    let result = merge(
        ReducingMethod::None,
        &[PART_ONE, PART_TWO, PART_TWO_RERUN_PASSED],
    )
    .unwrap();

    assert_eq!(result.features().len(), 3);
    assert_eq!(result.summary().scenarios.total, 3);
    assert_eq!(result.failed_scenarios(), 1);
}

#[test]
fn merge_by_id_folds_features_but_keeps_every_attempt() {
    let result = merge(
        ReducingMethod::MergeById,
        &[PART_ONE, PART_TWO, PART_TWO_RERUN_PASSED],
    )
    .unwrap();

    assert_eq!(result.features().len(), 2);
    assert_eq!(result.features()[1].scenarios().len(), 2);
    assert_eq!(result.failed_scenarios(), 1);
}

#[test]
fn retest_over_legacy_full_reports_is_invalid_configuration() {
    let err = merge(ReducingMethod::MergeWithRetest, &[SAMPLE_FAILED, SAMPLE]).unwrap_err();

    match err {
        MergeError::InvalidConfiguration { method, source_label, reason } => {
            assert_eq!(method, ReducingMethod::MergeWithRetest);
            assert!(source_label.ends_with("sample-failed.json"));
            assert!(reason.contains("start_timestamp"));
        }
        other => panic!("expected InvalidConfiguration, got {other}"),
    }
}

#[test]
fn incompatible_later_report_rejects_whole_merge() {
    let err = merge(ReducingMethod::MergeWithRetest, &[PART_ONE, PART_TWO, SAMPLE]).unwrap_err();

    match err {
        MergeError::InvalidConfiguration { source_label, reason, .. } => {
            assert!(source_label.ends_with("sample.json"));
            assert!(!source_label.ends_with("sample-failed.json"));
            assert!(reason.contains("start_timestamp"));
        }
        other => panic!("expected InvalidConfiguration, got {other}"),
    }
}

#[test]
fn legacy_reports_merge_when_timestamps_are_not_required() {
    let mut options = MergeOptions::default();
    options.retest_policy.require_start_timestamp = false;

    let result = ReportMergeEngine::new(ReducingMethod::MergeWithRetest, options)
        .build(&sources(&[SAMPLE_FAILED, SAMPLE]))
        .unwrap();

    assert_eq!(result.features().len(), 2);
    assert_eq!(result.summary().scenarios.total, 4);
    assert_eq!(result.failed_scenarios(), 2);
    assert_eq!(result.summary().steps.undefined, 1);
}

#[test]
fn directory_input_is_merged_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    for (target, source) in [
        ("01-part1.json", PART_ONE),
        ("02-part2.json", PART_TWO),
        ("03-rerun.json", PART_TWO_RERUN_PASSED),
    ] {
        std::fs::copy(fixture(source), dir.path().join(target)).unwrap();
    }

    let sources = ingest::load_sources(&[dir.path().to_path_buf()], false).unwrap();
    let result = ReportMergeEngine::new(ReducingMethod::MergeWithRetest, MergeOptions::default())
        .build(&sources)
        .unwrap();

    assert_eq!(result.features().len(), 2);
    assert!(!result.has_failures());
}
