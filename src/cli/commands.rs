use clap::Subcommand;
use std::path::PathBuf;

use crate::reduce::ReducingMethod;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge reports into one result
    Merge(MergeArgs),

    /// Initialize a .cukemerge.toml config file in the current directory
    Init,

    /// List the available reducing methods
    ListMethods,
}

#[derive(clap::Args, Debug, Clone)]
pub struct MergeArgs {
    /// Report files or directories, earliest run first
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// How reports are combined (overrides .cukemerge.toml)
    #[arg(short, long, value_enum)]
    pub method: Option<ReducingMethod>,

    /// Output format: "terminal" or "json"
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write the merged report as JSON to this file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Drop reports that contain no features
    #[arg(long)]
    pub skip_empty: bool,

    /// Allow retest merging of reports without scenario start timestamps
    #[arg(long)]
    pub allow_missing_timestamps: bool,

    /// Read report directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Exit with code 1 if the merged report has failed scenarios
    #[arg(long)]
    pub fail_on_failed: bool,

    /// Ignore .cukemerge.toml config files
    #[arg(long)]
    pub no_config: bool,
}
