//! Error types for report ingestion and merging.

use std::path::PathBuf;

use thiserror::Error;

use crate::reduce::ReducingMethod;

/// Errors produced by the merge engine.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The configured strategy cannot interpret the supplied reports.
    #[error("reducing method '{method}' cannot be applied to report '{source_label}': {reason}")]
    InvalidConfiguration {
        method: ReducingMethod,
        source_label: String,
        reason: String,
    },

    /// A merge needs at least one report.
    #[error("no reports to merge")]
    EmptyInput,
}

/// Errors produced while loading reports from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A directory argument contained no JSON reports.
    #[error("no JSON reports found in {}", path.display())]
    NoReports { path: PathBuf },
}

pub type MergeResult<T> = std::result::Result<T, MergeError>;
