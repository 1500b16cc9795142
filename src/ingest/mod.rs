pub mod cucumber;
pub mod file_walker;

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::IngestError;
use crate::model::Source;

/// Load one report file as the source at position `index`
pub fn load_source(index: usize, path: &Path) -> Result<Source, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let features = cucumber::parse_features(&content).map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Loaded {}: {} features, {} scenarios",
        path.display(),
        features.len(),
        features.iter().map(|f| f.scenarios().len()).sum::<usize>()
    );

    Ok(Source::new(index, path.display().to_string(), features))
}

/// Expand `paths` and parse every report in parallel.
///
/// The returned sources keep the expanded path order, which is the merge
/// order: earlier runs first, reruns after.
pub fn load_sources(paths: &[PathBuf], recursive: bool) -> Result<Vec<Source>, IngestError> {
    let start = Instant::now();
    let files = file_walker::expand_paths(paths, recursive)?;

    info!("Loading {} reports", files.len());

    let sources = files
        .par_iter()
        .enumerate()
        .map(|(index, path)| load_source(index, path))
        .collect::<Result<Vec<_>, _>>()?;

    info!("Loaded {} reports in {:.2?}", sources.len(), start.elapsed());

    Ok(sources)
}
