use crate::model::{Feature, Source};
use crate::reduce::{ReducingMethod, ReductionStrategy};

/// Treats every report as independent: features are listed as-is, in
/// source order, without any deduplication.
pub struct Concatenate;

impl ReductionStrategy for Concatenate {
    fn method(&self) -> ReducingMethod {
        ReducingMethod::None
    }

    fn description(&self) -> &str {
        "Lists every report's features as-is, without deduplication"
    }

    fn reduce(&self, sources: &[Source]) -> Vec<Feature> {
        sources
            .iter()
            .flat_map(|s| s.features.iter().cloned())
            .collect()
    }
}
