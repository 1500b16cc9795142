pub mod status;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use status::Status;

/// Stable identity of a feature across re-executions of the same suite
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FeatureId {
    pub uri: String,
    pub name: String,
}

impl FeatureId {
    /// A feature with neither uri nor name cannot be matched across reports
    pub fn is_blank(&self) -> bool {
        self.uri.trim().is_empty() && self.name.trim().is_empty()
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.uri.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.uri)
        }
    }
}

/// Identity of a scenario within its feature.
///
/// The discriminator is the runner's element id, which tells scenario
/// outline rows apart (`feature;scenario;;2`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScenarioKey {
    pub name: String,
    pub discriminator: Option<String>,
}

impl ScenarioKey {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self
                .discriminator
                .as_deref()
                .map_or(true, |d| d.trim().is_empty())
    }
}

impl std::fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.discriminator {
            Some(d) => write!(f, "{} [{}]", self.name, d),
            None => write!(f, "{}", self.name),
        }
    }
}

/// An attachment embedded in a step. Data is carried through undecoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embedding {
    pub mime_type: String,
    pub data: String,
}

/// A single executed step
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// Step keyword, e.g. "Given "
    pub keyword: String,

    /// Step text
    pub name: String,

    /// Line in the feature file
    pub line: Option<u32>,

    pub status: Status,

    /// Duration in nanoseconds
    pub duration: Option<u64>,

    pub error_message: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeddings: Vec<Embedding>,
}

impl Step {
    pub fn new(keyword: impl Into<String>, name: impl Into<String>, status: Status) -> Self {
        Step {
            keyword: keyword.into(),
            name: name.into(),
            line: None,
            status,
            duration: None,
            error_message: None,
            embeddings: Vec::new(),
        }
    }
}

/// Result of a before/after hook
#[derive(Debug, Clone, Serialize)]
pub struct Hook {
    pub status: Status,
    pub duration: Option<u64>,
    pub error_message: Option<String>,
}

/// One executed test case. Its status is derived once, at construction.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    name: String,
    id: Option<String>,
    keyword: String,
    line: Option<u32>,
    tags: Vec<String>,
    start_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    background: Vec<Step>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    before: Vec<Hook>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    after: Vec<Hook>,
    steps: Vec<Step>,
    status: Status,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        let mut scenario = Scenario {
            name: name.into(),
            id: None,
            keyword: "Scenario".to_string(),
            line: None,
            tags: Vec::new(),
            start_timestamp: None,
            background: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
            steps,
            status: Status::Passed,
        };
        scenario.status = scenario.derive_status();
        scenario
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_start_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.start_timestamp = Some(at);
        self
    }

    /// Attach the steps of the background element that ran before this scenario
    pub fn with_background(mut self, background: Vec<Step>) -> Self {
        self.background = background;
        self.status = self.derive_status();
        self
    }

    pub fn with_hooks(mut self, before: Vec<Hook>, after: Vec<Hook>) -> Self {
        self.before = before;
        self.after = after;
        self.status = self.derive_status();
        self
    }

    fn derive_status(&self) -> Status {
        let hook_failed = self
            .before
            .iter()
            .chain(self.after.iter())
            .any(|h| h.status.is_failing());
        if hook_failed {
            return Status::Failed;
        }

        Status::derive(
            self.background
                .iter()
                .chain(self.steps.iter())
                .map(|s| s.status),
        )
    }

    pub fn key(&self) -> ScenarioKey {
        ScenarioKey {
            name: self.name.clone(),
            discriminator: self.id.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn start_timestamp(&self) -> Option<DateTime<Utc>> {
        self.start_timestamp
    }

    pub fn background(&self) -> &[Step] {
        &self.background
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Background steps followed by the scenario's own steps
    pub fn all_steps(&self) -> impl Iterator<Item = &Step> {
        self.background.iter().chain(self.steps.iter())
    }

    /// `Passed`, `Failed` or `Skipped`
    pub fn status(&self) -> Status {
        self.status
    }

    /// Total duration of hooks and steps in nanoseconds
    pub fn duration(&self) -> u64 {
        let steps: u64 = self.all_steps().filter_map(|s| s.duration).sum();
        let hooks: u64 = self
            .before
            .iter()
            .chain(self.after.iter())
            .filter_map(|h| h.duration)
            .sum();
        steps + hooks
    }
}

/// A named, uri-identified group of scenarios
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    uri: String,
    id: Option<String>,
    name: String,
    keyword: String,
    description: Option<String>,
    tags: Vec<String>,
    scenarios: Vec<Scenario>,
    status: Status,
}

impl Feature {
    pub fn new(uri: impl Into<String>, name: impl Into<String>, scenarios: Vec<Scenario>) -> Self {
        let status = Status::derive(scenarios.iter().map(|s| s.status()));
        Feature {
            uri: uri.into(),
            id: None,
            name: name.into(),
            keyword: "Feature".to_string(),
            description: None,
            tags: Vec::new(),
            scenarios,
            status,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Same feature metadata carrying a different set of scenarios
    pub fn with_scenarios(&self, scenarios: Vec<Scenario>) -> Self {
        let status = Status::derive(scenarios.iter().map(|s| s.status()));
        Feature {
            uri: self.uri.clone(),
            id: self.id.clone(),
            name: self.name.clone(),
            keyword: self.keyword.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            scenarios,
            status,
        }
    }

    pub fn identity(&self) -> FeatureId {
        FeatureId {
            uri: self.uri.clone(),
            name: self.name.clone(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// One ingested report, tagged with its position in the merge order
#[derive(Debug, Clone)]
pub struct Source {
    /// Position in the list handed to the engine (0-based)
    pub index: usize,

    /// Where the report came from, used in diagnostics
    pub label: String,

    pub features: Vec<Feature>,
}

impl Source {
    pub fn new(index: usize, label: impl Into<String>, features: Vec<Feature>) -> Self {
        Source {
            index,
            label: label.into(),
            features,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn scenario_count(&self) -> usize {
        self.features.iter().map(|f| f.scenarios().len()).sum()
    }
}
