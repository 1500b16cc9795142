use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::model::{Feature, Status};
use crate::reduce::ReducingMethod;

/// Scenario counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ScenarioCounts {
    fn add(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Passed => self.passed += 1,
            Status::Skipped => self.skipped += 1,
            _ => self.failed += 1,
        }
    }
}

/// Step counts by status, background steps included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pending: usize,
    pub undefined: usize,
    pub ambiguous: usize,
}

impl StepCounts {
    fn add(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Skipped => self.skipped += 1,
            Status::Pending => self.pending += 1,
            Status::Undefined => self.undefined += 1,
            Status::Ambiguous => self.ambiguous += 1,
        }
    }
}

/// Aggregate counters over a set of features
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub features: usize,
    pub scenarios: ScenarioCounts,
    pub steps: StepCounts,
    /// Sum of step and hook durations in nanoseconds
    pub duration_ns: u64,
}

impl Summary {
    pub fn from_features<'a, I>(features: I) -> Self
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        let mut summary = Summary::default();
        for feature in features {
            summary.features += 1;
            for scenario in feature.scenarios() {
                summary.scenarios.add(scenario.status());
                summary.duration_ns += scenario.duration();
                for step in scenario.all_steps() {
                    summary.steps.add(step.status);
                }
            }
        }
        summary
    }
}

/// Counters scoped to one merged feature
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSummary {
    pub uri: String,
    pub name: String,
    pub status: Status,
    pub scenarios: ScenarioCounts,
    pub steps: StepCounts,
    pub duration_ns: u64,
}

/// The merged report. Built once by the engine, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResult {
    version: String,
    generated_at: DateTime<Utc>,
    reducing_method: ReducingMethod,
    fingerprint: String,
    summary: Summary,
    feature_summaries: Vec<FeatureSummary>,
    features: Vec<Feature>,
}

impl ReportResult {
    pub(crate) fn new(reducing_method: ReducingMethod, features: Vec<Feature>) -> Self {
        let summary = Summary::from_features(&features);
        let feature_summaries = features
            .iter()
            .map(|f| {
                let s = Summary::from_features(std::iter::once(f));
                FeatureSummary {
                    uri: f.uri().to_string(),
                    name: f.name().to_string(),
                    status: f.status(),
                    scenarios: s.scenarios,
                    steps: s.steps,
                    duration_ns: s.duration_ns,
                }
            })
            .collect();

        ReportResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            reducing_method,
            fingerprint: fingerprint(&features),
            summary,
            feature_summaries,
            features,
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn feature_summaries(&self) -> &[FeatureSummary] {
        &self.feature_summaries
    }

    pub fn reducing_method(&self) -> ReducingMethod {
        self.reducing_method
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Digest of feature/scenario identities and statuses, in order.
    /// Independent of timestamps, so equal merges give equal fingerprints.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn failed_scenarios(&self) -> usize {
        self.summary.scenarios.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed_scenarios() > 0
    }
}

fn fingerprint(features: &[Feature]) -> String {
    let mut hasher = Sha256::new();
    for feature in features {
        hasher.update(feature.uri().as_bytes());
        hasher.update([0]);
        hasher.update(feature.name().as_bytes());
        hasher.update([b'\n']);
        for scenario in feature.scenarios() {
            hasher.update(scenario.name().as_bytes());
            hasher.update([0]);
            hasher.update(scenario.id().unwrap_or_default().as_bytes());
            hasher.update([0]);
            hasher.update(scenario.status().as_str().as_bytes());
            hasher.update([b'\n']);
        }
    }
    format!("{:x}", hasher.finalize())
}
