use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::MergeResult;
use crate::model::{Feature, FeatureId, Scenario, ScenarioKey, Source};
use crate::reduce::{
    check_feature_identities, invalid, ReducingMethod, ReductionStrategy, RetestPolicy,
};

/// Reconciles reruns: later reports override earlier ones scenario by
/// scenario. A rerun replaces the earlier attempt whether it passed or not.
///
/// Feature metadata (description, tags) is kept from the first report that
/// mentions the feature; only scenarios are replaced.
pub struct RetestMerge {
    policy: RetestPolicy,
}

/// Working state of one feature during a merge
struct FeatureSlot<'a> {
    template: &'a Feature,
    scenarios: Vec<&'a Scenario>,
    by_key: HashMap<ScenarioKey, usize>,
}

impl<'a> FeatureSlot<'a> {
    fn new(template: &'a Feature) -> Self {
        FeatureSlot {
            template,
            scenarios: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Append a new scenario or replace the one with the same identity.
    /// Returns true on replacement.
    fn upsert(&mut self, scenario: &'a Scenario) -> bool {
        match self.by_key.get(&scenario.key()) {
            Some(&pos) => {
                self.scenarios[pos] = scenario;
                true
            }
            None => {
                self.by_key.insert(scenario.key(), self.scenarios.len());
                self.scenarios.push(scenario);
                false
            }
        }
    }

    fn freeze(self) -> Feature {
        let scenarios = self.scenarios.into_iter().cloned().collect();
        self.template.with_scenarios(scenarios)
    }
}

impl RetestMerge {
    pub fn new(policy: RetestPolicy) -> Self {
        RetestMerge { policy }
    }

    fn check_source(&self, source: &Source) -> MergeResult<()> {
        let method = self.method();
        check_feature_identities(method, source)?;

        for feature in &source.features {
            let mut keys = HashSet::new();
            for scenario in feature.scenarios() {
                let key = scenario.key();
                if key.is_blank() {
                    return Err(invalid(
                        method,
                        source,
                        format!(
                            "feature '{}' has a scenario with neither name nor id",
                            feature.name()
                        ),
                    ));
                }
                if self.policy.require_start_timestamp && scenario.start_timestamp().is_none() {
                    return Err(invalid(
                        method,
                        source,
                        format!(
                            "scenario '{key}' in feature '{}' has no start_timestamp; \
                             retest merging needs reports from a runner that records one",
                            feature.name()
                        ),
                    ));
                }
                if !keys.insert(key.clone()) {
                    return Err(invalid(
                        method,
                        source,
                        format!("scenario '{key}' appears twice in feature '{}'", feature.name()),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl ReductionStrategy for RetestMerge {
    fn method(&self) -> ReducingMethod {
        ReducingMethod::MergeWithRetest
    }

    fn description(&self) -> &str {
        "Reconciles reruns: the latest report's outcome of each scenario wins"
    }

    fn validate(&self, sources: &[Source]) -> MergeResult<()> {
        for source in sources {
            self.check_source(source)?;
        }
        Ok(())
    }

    fn reduce(&self, sources: &[Source]) -> Vec<Feature> {
        let mut slots: Vec<FeatureSlot<'_>> = Vec::new();
        let mut index: HashMap<FeatureId, usize> = HashMap::new();

        for source in sources {
            let mut replaced = 0usize;
            for feature in &source.features {
                let pos = *index.entry(feature.identity()).or_insert_with(|| {
                    slots.push(FeatureSlot::new(feature));
                    slots.len() - 1
                });
                let slot = &mut slots[pos];
                for scenario in feature.scenarios() {
                    if slot.upsert(scenario) {
                        replaced += 1;
                    }
                }
            }
            debug!(
                "Source #{} ({}): {} scenarios superseded earlier attempts",
                source.index, source.label, replaced
            );
        }

        slots.into_iter().map(FeatureSlot::freeze).collect()
    }
}
