use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::MergeOptions;
use crate::reduce::{ReducingMethod, RetestPolicy};

pub const CONFIG_FILE: &str = ".cukemerge.toml";

/// cukemerge configuration (loaded from .cukemerge.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CukemergeConfig {
    #[serde(default)]
    pub merge: MergeConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Reducing method used when the CLI does not name one
    #[serde(default)]
    pub reducing_method: ReducingMethod,

    /// Drop reports without features before merging
    #[serde(default)]
    pub skip_empty_sources: bool,

    /// Reject retest merges of reports lacking scenario start timestamps
    #[serde(default = "default_true")]
    pub require_start_timestamp: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            reducing_method: ReducingMethod::default(),
            skip_empty_sources: false,
            require_start_timestamp: true,
        }
    }
}

impl MergeConfig {
    pub fn options(&self) -> MergeOptions {
        MergeOptions {
            skip_empty_sources: self.skip_empty_sources,
            retest_policy: RetestPolicy {
                require_start_timestamp: self.require_start_timestamp,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: default_format(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> String {
    "terminal".to_string()
}

impl CukemergeConfig {
    /// Load .cukemerge.toml from the given directory or its parents.
    ///
    /// `Ok(None)` when no file exists. A file that exists but does not
    /// parse, or names unknown keys, is an error: falling back to defaults
    /// would silently change the reducing method.
    pub fn load(start: &Path) -> Result<Option<Self>> {
        let Some(config_path) = find_config_file(start) else {
            return Ok(None);
        };
        debug!("Found config: {}", config_path.display());

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config = toml::from_str::<CukemergeConfig>(&content)
            .with_context(|| format!("invalid {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }
}

/// Walk up from `start` to find .cukemerge.toml
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let config = current.join(CONFIG_FILE);
        if config.exists() {
            return Some(config);
        }
        if !current.pop() {
            return None;
        }
    }
}

const DEFAULT_CONFIG: &str = r#"# cukemerge configuration

[merge]
# How reports are combined: "none", "merge-with-retest" or "merge-by-id"
reducing_method = "merge-with-retest"

# Drop reports that contain no features (e.g. a rerun with nothing to rerun)
skip_empty_sources = false

# Retest merging needs scenario start timestamps to tell a rerun-capable
# report apart from an unrelated full run. Set to false for runners that
# do not record them.
require_start_timestamp = true

[output]
# Default output format: "terminal" or "json"
format = "terminal"
"#;

/// Write a default .cukemerge.toml into `dir`. Returns false if one exists.
pub fn write_default_config(dir: &Path) -> Result<bool> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Ok(false);
    }
    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(true)
}

/// Create a default .cukemerge.toml in the current directory
pub fn init_config() -> Result<()> {
    if write_default_config(&std::env::current_dir()?)? {
        println!("✅ Created {}", CONFIG_FILE);
        println!("   Edit it to choose how reports are merged.");
    } else {
        println!("⚠️  {} already exists in this directory", CONFIG_FILE);
    }
    Ok(())
}
