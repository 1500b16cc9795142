use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::MergeArgs;
use crate::config::CukemergeConfig;
use crate::engine::{MergeOptions, ReportMergeEngine};
use crate::ingest;
use crate::reduce::ReducingMethod;
use crate::report::result::ReportResult;

/// A merge request with CLI flags and config file resolved.
/// CLI flags win over the config file.
#[derive(Debug, Clone)]
pub struct MergeRun {
    pub paths: Vec<PathBuf>,
    pub recursive: bool,
    pub method: ReducingMethod,
    pub options: MergeOptions,
    pub format: String,
}

impl MergeRun {
    pub fn new(args: &MergeArgs) -> Result<Self> {
        Self::from_dir(args, &std::env::current_dir()?)
    }

    /// Resolve `args` against the config file found from `dir` upwards.
    /// An unreadable or invalid config file is an error, never a fallback.
    pub fn from_dir(args: &MergeArgs, dir: &Path) -> Result<Self> {
        let config = if args.no_config {
            None
        } else {
            CukemergeConfig::load(dir)?
        };
        Ok(Self::resolve(args, config.unwrap_or_default()))
    }

    pub fn resolve(args: &MergeArgs, config: CukemergeConfig) -> Self {
        let method = args.method.unwrap_or(config.merge.reducing_method);

        let mut options = config.merge.options();
        if args.skip_empty {
            options.skip_empty_sources = true;
        }
        if args.allow_missing_timestamps {
            options.retest_policy.require_start_timestamp = false;
        }

        MergeRun {
            paths: args.paths.clone(),
            recursive: args.recursive,
            method,
            options,
            format: args.format.clone().unwrap_or(config.output.format),
        }
    }

    /// Load the reports and merge them
    pub fn run(&self) -> Result<ReportResult> {
        let sources = ingest::load_sources(&self.paths, self.recursive)
            .context("failed to load reports")?;

        info!("Using reducing method '{}'", self.method);

        let engine = ReportMergeEngine::new(self.method, self.options);
        let result = engine.build(&sources).context("failed to merge reports")?;
        Ok(result)
    }
}
