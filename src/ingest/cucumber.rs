//! Serde shape of a Cucumber JSON report and its conversion into the
//! record model.
//!
//! Only the fields merging and summaries need are read; unknown fields are
//! ignored so reports from different runner versions load alike.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{Embedding, Feature, Hook, Scenario, Status, Step};

#[derive(Debug, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
pub struct RawTag {
    pub name: String,
}

/// A scenario or background entry of a feature
#[derive(Debug, Deserialize)]
pub struct RawElement {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    /// "scenario", "scenario_outline" or "background"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub start_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub before: Vec<RawHook>,
    #[serde(default)]
    pub after: Vec<RawHook>,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub result: Option<RawResult>,
    #[serde(default)]
    pub embeddings: Vec<RawEmbedding>,
}

#[derive(Debug, Deserialize)]
pub struct RawHook {
    #[serde(default)]
    pub result: Option<RawResult>,
}

#[derive(Debug, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Older runners write `mime_type`, newer ones `media.type`
#[derive(Debug, Deserialize)]
pub struct RawEmbedding {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub media: Option<RawMedia>,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct RawMedia {
    #[serde(rename = "type")]
    pub kind: String,
}

fn tag_names(tags: Vec<RawTag>) -> Vec<String> {
    tags.into_iter().map(|t| t.name).collect()
}

impl RawResult {
    fn status(&self) -> Status {
        Status::from_str(&self.status)
    }
}

impl From<RawEmbedding> for Embedding {
    fn from(raw: RawEmbedding) -> Self {
        let mime_type = raw
            .mime_type
            .or_else(|| raw.media.map(|m| m.kind))
            .unwrap_or_default();
        Embedding {
            mime_type,
            data: raw.data,
        }
    }
}

impl From<RawStep> for Step {
    fn from(raw: RawStep) -> Self {
        let (status, duration, error_message) = match raw.result {
            Some(r) => (r.status(), r.duration, r.error_message),
            None => (Status::Undefined, None, None),
        };
        Step {
            keyword: raw.keyword,
            name: raw.name,
            line: raw.line,
            status,
            duration,
            error_message,
            embeddings: raw.embeddings.into_iter().map(Embedding::from).collect(),
        }
    }
}

impl From<RawHook> for Hook {
    fn from(raw: RawHook) -> Self {
        match raw.result {
            Some(r) => Hook {
                status: r.status(),
                duration: r.duration,
                error_message: r.error_message,
            },
            None => Hook {
                status: Status::Undefined,
                duration: None,
                error_message: None,
            },
        }
    }
}

impl RawElement {
    fn is_background(&self) -> bool {
        self.kind.eq_ignore_ascii_case("background")
    }

    fn into_scenario(self, background: Vec<Step>) -> Scenario {
        let steps = self.steps.into_iter().map(Step::from).collect();
        let before = self.before.into_iter().map(Hook::from).collect();
        let after = self.after.into_iter().map(Hook::from).collect();

        let mut scenario = Scenario::new(self.name, steps)
            .with_tags(tag_names(self.tags))
            .with_background(background)
            .with_hooks(before, after);
        if let Some(id) = self.id {
            scenario = scenario.with_id(id);
        }
        if let Some(keyword) = self.keyword {
            scenario = scenario.with_keyword(keyword);
        }
        if let Some(line) = self.line {
            scenario = scenario.with_line(line);
        }
        if let Some(at) = self.start_timestamp {
            scenario = scenario.with_start_timestamp(at);
        }
        scenario
    }
}

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        // A background element belongs to the scenario that follows it
        let mut scenarios = Vec::new();
        let mut background: Vec<Step> = Vec::new();
        for element in raw.elements {
            if element.is_background() {
                background = element.steps.into_iter().map(Step::from).collect();
            } else {
                scenarios.push(element.into_scenario(std::mem::take(&mut background)));
            }
        }

        let mut feature = Feature::new(raw.uri, raw.name, scenarios).with_tags(tag_names(raw.tags));
        if let Some(id) = raw.id {
            feature = feature.with_id(id);
        }
        if let Some(keyword) = raw.keyword {
            feature = feature.with_keyword(keyword);
        }
        if let Some(description) = raw.description.filter(|d| !d.trim().is_empty()) {
            feature = feature.with_description(description);
        }
        feature
    }
}

/// Parse a Cucumber JSON document. Blank input is an empty report.
pub fn parse_features(content: &str) -> Result<Vec<Feature>, serde_json::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawFeature> = serde_json::from_str(content)?;
    Ok(raw.into_iter().map(Feature::from).collect())
}
