//! Property tests for the reduction strategies.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use cukemerge::engine::{MergeOptions, ReportMergeEngine};
use cukemerge::model::{Feature, Scenario, Source, Status, Step};
use cukemerge::reduce::ReducingMethod;

/// feature number → scenario number → outcome
type RawSource = BTreeMap<u8, BTreeMap<u8, Status>>;

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        3 => Just(Status::Passed),
        2 => Just(Status::Failed),
        1 => Just(Status::Skipped),
    ]
}

fn arb_raw_source() -> impl Strategy<Value = RawSource> {
    proptest::collection::btree_map(
        0u8..5,
        proptest::collection::btree_map(0u8..5, arb_status(), 0..5),
        0..5,
    )
}

fn arb_sources() -> impl Strategy<Value = Vec<RawSource>> {
    proptest::collection::vec(arb_raw_source(), 1..6)
}

fn build_sources(raw: &[RawSource]) -> Vec<Source> {
    raw.iter()
        .enumerate()
        .map(|(index, features)| {
            let features = features
                .iter()
                .map(|(f, scenarios)| {
                    let scenarios = scenarios
                        .iter()
                        .map(|(s, status)| {
                            Scenario::new(
                                format!("scenario {s}"),
                                vec![Step::new("Then ", "outcome", *status)],
                            )
                            .with_id(format!("feature-{f};scenario-{s}"))
                            .with_start_timestamp(
                                Utc.with_ymd_and_hms(2024, 1, 1, 0, index as u32, 0).unwrap(),
                            )
                        })
                        .collect();
                    Feature::new(format!("features/{f}.feature"), format!("Feature {f}"), scenarios)
                })
                .collect();
            Source::new(index, format!("run-{index}.json"), features)
        })
        .collect()
}

fn engine(method: ReducingMethod) -> ReportMergeEngine {
    ReportMergeEngine::new(method, MergeOptions::default())
}

fn statuses(features: &[Feature]) -> Vec<(String, Vec<(String, Status)>)> {
    features
        .iter()
        .map(|f| {
            (
                f.name().to_string(),
                f.scenarios()
                    .iter()
                    .map(|s| (s.name().to_string(), s.status()))
                    .collect(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn concatenation_keeps_every_feature(raw in arb_sources()) {
        let sources = build_sources(&raw);
        let expected: usize = sources.iter().map(|s| s.features.len()).sum();

        let result = engine(ReducingMethod::None).build(&sources).unwrap();
        prop_assert_eq!(result.features().len(), expected);
    }

    #[test]
    fn retest_counts_each_scenario_identity_once(raw in arb_sources()) {
        let sources = build_sources(&raw);
        let distinct: HashSet<(u8, u8)> = raw
            .iter()
            .flat_map(|src| src.iter().flat_map(|(f, ss)| ss.keys().map(move |s| (*f, *s))))
            .collect();
        let distinct_features: HashSet<u8> =
            raw.iter().flat_map(|src| src.keys().copied()).collect();

        let result = engine(ReducingMethod::MergeWithRetest).build(&sources).unwrap();
        let counts = result.summary().scenarios;
        prop_assert_eq!(counts.total, distinct.len());
        prop_assert_eq!(counts.passed + counts.failed + counts.skipped, counts.total);
        prop_assert_eq!(result.features().len(), distinct_features.len());
    }

    #[test]
    fn retest_latest_attempt_wins(raw in arb_sources()) {
        let sources = build_sources(&raw);
        let mut latest: HashMap<(String, String), Status> = HashMap::new();
        for src in &raw {
            for (f, scenarios) in src {
                for (s, status) in scenarios {
                    latest.insert((format!("Feature {f}"), format!("scenario {s}")), *status);
                }
            }
        }

        let result = engine(ReducingMethod::MergeWithRetest).build(&sources).unwrap();
        for feature in result.features() {
            for scenario in feature.scenarios() {
                let key = (feature.name().to_string(), scenario.name().to_string());
                prop_assert_eq!(Some(&scenario.status()), latest.get(&key));
            }
        }
    }

    #[test]
    fn retest_of_single_source_is_identity(raw in arb_raw_source()) {
        let sources = build_sources(std::slice::from_ref(&raw));

        let result = engine(ReducingMethod::MergeWithRetest).build(&sources).unwrap();
        prop_assert_eq!(statuses(result.features()), statuses(&sources[0].features));
    }

    #[test]
    fn merges_are_deterministic(raw in arb_sources()) {
        let sources = build_sources(&raw);
        for method in ReducingMethod::ALL {
            let first = engine(method).build(&sources).unwrap();
            let second = engine(method).build(&sources).unwrap();
            prop_assert_eq!(first.fingerprint(), second.fingerprint());
            prop_assert_eq!(statuses(first.features()), statuses(second.features()));
        }
    }
}
