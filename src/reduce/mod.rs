pub mod by_id;
pub mod concat;
pub mod retest;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};
use crate::model::{Feature, Source};

/// Selects how same-identity records from different reports are combined
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReducingMethod {
    /// Concatenate every report's features, no deduplication
    #[default]
    None,
    /// Reconcile reruns: the latest report's scenario outcome wins
    MergeWithRetest,
    /// Merge features with the same identity, keep every scenario
    MergeById,
}

impl ReducingMethod {
    pub const ALL: [ReducingMethod; 3] = [
        ReducingMethod::None,
        ReducingMethod::MergeWithRetest,
        ReducingMethod::MergeById,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReducingMethod::None => "none",
            ReducingMethod::MergeWithRetest => "merge-with-retest",
            ReducingMethod::MergeById => "merge-by-id",
        }
    }

    /// Instantiate the strategy for this method. Chosen once per engine.
    pub fn strategy(&self, policy: RetestPolicy) -> Box<dyn ReductionStrategy> {
        match self {
            ReducingMethod::None => Box::new(concat::Concatenate),
            ReducingMethod::MergeWithRetest => Box::new(retest::RetestMerge::new(policy)),
            ReducingMethod::MergeById => Box::new(by_id::MergeById),
        }
    }
}

impl std::fmt::Display for ReducingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compatibility requirements applied before a retest merge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetestPolicy {
    /// Every scenario must carry a start timestamp. Reports written by
    /// runners that predate rerun support lack it.
    pub require_start_timestamp: bool,
}

impl Default for RetestPolicy {
    fn default() -> Self {
        RetestPolicy {
            require_start_timestamp: true,
        }
    }
}

/// A policy combining the features of several ordered reports into one list.
pub trait ReductionStrategy: Send + Sync {
    fn method(&self) -> ReducingMethod;

    /// Short description of what this strategy does
    fn description(&self) -> &str;

    /// Reject report sets this strategy cannot interpret. Runs before `reduce`.
    fn validate(&self, _sources: &[Source]) -> MergeResult<()> {
        Ok(())
    }

    /// Combine sources, given in merge order, into one ordered feature list
    fn reduce(&self, sources: &[Source]) -> Vec<Feature>;
}

/// Every available strategy, with default policies
pub fn all_strategies() -> Vec<Box<dyn ReductionStrategy>> {
    ReducingMethod::ALL
        .iter()
        .map(|m| m.strategy(RetestPolicy::default()))
        .collect()
}

pub(crate) fn invalid(method: ReducingMethod, source: &Source, reason: String) -> MergeError {
    MergeError::InvalidConfiguration {
        method,
        source_label: source.label.clone(),
        reason,
    }
}

/// Features must be identifiable and unique within each source
pub(crate) fn check_feature_identities(method: ReducingMethod, source: &Source) -> MergeResult<()> {
    let mut seen = HashSet::new();
    for (position, feature) in source.features.iter().enumerate() {
        let id = feature.identity();
        if id.is_blank() {
            return Err(invalid(
                method,
                source,
                format!("feature #{} has neither uri nor name", position + 1),
            ));
        }
        if !seen.insert(id.clone()) {
            return Err(invalid(
                method,
                source,
                format!("feature '{id}' appears more than once"),
            ));
        }
    }
    Ok(())
}
