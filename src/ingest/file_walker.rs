use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::error::IngestError;

/// Expand report arguments into the list of JSON files to load.
///
/// - Files are kept as given, in argument order
/// - Directories are expanded to their `*.json` files, sorted by path
/// - Only the top level of a directory is read unless `recursive` is set
/// - Hidden files and symlinks are skipped; .gitignore is not consulted,
///   since report directories are usually ignored build output
pub fn expand_paths(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = walk_reports(path, recursive);
            if found.is_empty() {
                return Err(IngestError::NoReports { path: path.clone() });
            }
            debug!("{} reports in {}", found.len(), path.display());
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

fn walk_reports(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(root);

    builder
        .standard_filters(false)
        .hidden(true)          // skip hidden files
        .follow_links(false)   // don't follow symlinks
        .max_depth(if recursive { None } else { Some(1) });

    let mut files = Vec::new();

    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                    continue;
                }

                let path = entry.path();
                if is_json_report(path) {
                    files.push(path.to_path_buf());
                } else {
                    debug!("Not a report: {}", path.display());
                }
            }
            Err(e) => {
                debug!("Walk error: {}", e);
            }
        }
    }

    files.sort();
    files
}

fn is_json_report(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
