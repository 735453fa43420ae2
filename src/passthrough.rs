//! Directories copied into the output without template processing.

use crate::config::BuildConfig;
use crate::error::Result;
use crate::ext::PathExt;
use crate::site::operation::BuildOperation;
use log::warn;
use walkdir::WalkDir;

/// Plans a copy for every file under each passthrough directory.
///
/// `<input>/assets/css/site.css` lands at `<output>/assets/css/site.css`.
/// Directories that do not exist are reported and skipped.
pub fn plan_passthrough(config: &BuildConfig) -> Result<Vec<BuildOperation>> {
    let mut operations = Vec::new();

    for dir in &config.passthrough {
        let source_root = config.input.join(dir);
        if !source_root.is_dir() {
            warn!("Passthrough directory {} does not exist, skipping", source_root.display());
            continue;
        }

        for entry in WalkDir::new(&source_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().relative_to(&config.input);
            operations.push(BuildOperation::Copy {
                source: entry.path().to_path_buf(),
                target: config.output.join(rel),
            });
        }
    }
    Ok(operations)
}
