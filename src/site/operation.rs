use std::path::PathBuf;

/// One filesystem effect of a build, decided before anything is written.
#[derive(Debug, PartialEq)]
pub enum BuildOperation {
    /// Rendered page content
    Write { source: PathBuf, target: PathBuf, content: String },
    /// Passthrough file
    Copy { source: PathBuf, target: PathBuf },
    /// A page that renders but is not written (`permalink: false`)
    Skip { source: PathBuf },
}

impl BuildOperation {
    /// Returns the target path for this operation, used for duplicate checks.
    pub fn target_path(&self) -> Option<&PathBuf> {
        match self {
            BuildOperation::Write { target, .. } => Some(target),
            BuildOperation::Copy { target, .. } => Some(target),
            BuildOperation::Skip { .. } => None,
        }
    }

    pub fn source_path(&self) -> &PathBuf {
        match self {
            BuildOperation::Write { source, .. }
            | BuildOperation::Copy { source, .. }
            | BuildOperation::Skip { source } => source,
        }
    }

    /// Gets a message describing the operation.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            BuildOperation::Write { source, target, .. } => {
                format!("{prefix}Writing '{}' from '{}'", target.display(), source.display())
            }
            BuildOperation::Copy { source, target } => {
                format!("{prefix}Copying '{}' to '{}'", source.display(), target.display())
            }
            BuildOperation::Skip { source } => {
                format!("{prefix}Skipping '{}' (permalink is false)", source.display())
            }
        }
    }
}
