pub mod commands;
pub mod merge;

use clap::Parser;

pub use commands::{Commands, MergeArgs};

/// cukemerge — merge Cucumber JSON reports
///
/// Combines the reports of partitioned runs and their reruns into one
/// result, so a retried scenario is counted once with its latest outcome.
#[derive(Parser, Debug)]
#[command(
    name = "cukemerge",
    version,
    about = "🥒 cukemerge — merge Cucumber JSON reports and reconcile reruns",
    long_about = "cukemerge merges Cucumber JSON reports.\nReports are read in the order given: list the original runs first and their reruns after.\n\nWith --method merge-with-retest a rerun's outcome replaces the earlier attempt."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
