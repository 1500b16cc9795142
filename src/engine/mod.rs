use std::time::Instant;

use tracing::{debug, info};

use crate::error::{MergeError, MergeResult};
use crate::model::Source;
use crate::reduce::{ReducingMethod, ReductionStrategy, RetestPolicy};
use crate::report::result::ReportResult;

/// Engine options besides the reducing method
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Drop reports that contain no features before merging
    pub skip_empty_sources: bool,

    /// Compatibility requirements for `merge-with-retest`
    pub retest_policy: RetestPolicy,
}

/// The merge engine. Validates the report list against the selected
/// strategy, applies it and freezes the outcome into a [`ReportResult`].
pub struct ReportMergeEngine {
    strategy: Box<dyn ReductionStrategy>,
    skip_empty_sources: bool,
}

impl ReportMergeEngine {
    pub fn new(method: ReducingMethod, options: MergeOptions) -> Self {
        ReportMergeEngine {
            strategy: method.strategy(options.retest_policy),
            skip_empty_sources: options.skip_empty_sources,
        }
    }

    pub fn method(&self) -> ReducingMethod {
        self.strategy.method()
    }

    /// Merge `sources`, earliest attempt first. Inputs are not modified.
    pub fn build(&self, sources: &[Source]) -> MergeResult<ReportResult> {
        let start = Instant::now();

        if sources.is_empty() {
            return Err(MergeError::EmptyInput);
        }

        let kept: Vec<Source>;
        let sources = if self.skip_empty_sources {
            kept = sources.iter().filter(|s| !s.is_empty()).cloned().collect();
            let skipped = sources.len() - kept.len();
            if skipped > 0 {
                info!("Skipped {} empty reports", skipped);
            }
            if kept.is_empty() {
                return Err(MergeError::EmptyInput);
            }
            kept.as_slice()
        } else {
            sources
        };

        info!(
            "Merging {} reports with '{}'",
            sources.len(),
            self.strategy.method()
        );

        self.strategy.validate(sources)?;
        debug!("Reports are compatible with '{}'", self.strategy.method());

        let input_scenarios: usize = sources.iter().map(Source::scenario_count).sum();
        let features = self.strategy.reduce(sources);
        let result = ReportResult::new(self.strategy.method(), features);

        info!(
            "Merged {} scenarios into {} features / {} scenarios in {:.2?}",
            input_scenarios,
            result.features().len(),
            result.summary().scenarios.total,
            start.elapsed()
        );

        Ok(result)
    }
}
