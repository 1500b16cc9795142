use std::collections::HashMap;

use crate::error::MergeResult;
use crate::model::{Feature, FeatureId, Scenario, Source};
use crate::reduce::{check_feature_identities, ReducingMethod, ReductionStrategy};

/// Folds features sharing an identity into the first-seen one. Scenarios
/// are appended, never reconciled, so a rerun is counted twice.
pub struct MergeById;

impl ReductionStrategy for MergeById {
    fn method(&self) -> ReducingMethod {
        ReducingMethod::MergeById
    }

    fn description(&self) -> &str {
        "Merges features with the same uri and name, keeping every scenario"
    }

    fn validate(&self, sources: &[Source]) -> MergeResult<()> {
        for source in sources {
            check_feature_identities(self.method(), source)?;
        }
        Ok(())
    }

    fn reduce(&self, sources: &[Source]) -> Vec<Feature> {
        let mut order: Vec<(&Feature, Vec<Scenario>)> = Vec::new();
        let mut index: HashMap<FeatureId, usize> = HashMap::new();

        for feature in sources.iter().flat_map(|s| s.features.iter()) {
            match index.get(&feature.identity()) {
                Some(&slot) => order[slot].1.extend(feature.scenarios().iter().cloned()),
                None => {
                    index.insert(feature.identity(), order.len());
                    order.push((feature, feature.scenarios().to_vec()));
                }
            }
        }

        order
            .into_iter()
            .map(|(template, scenarios)| template.with_scenarios(scenarios))
            .collect()
    }
}
