use crate::constants::IGNORE_FILE;
use crate::error::Result;
use crate::ext::PathExt;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Default patterns to always ignore during page discovery
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/node_modules",
    "**/node_modules/**",
    "**/.git",
    "**/.git/**",
    "**/.DS_Store",
    "**/.kilnignore",
];

/// Reads `.kilnignore` from the project root into a set of glob patterns.
///
/// Patterns are relative to the project root and matched with
/// [`is_ignored`]. Blank lines and `#` comments are skipped.
pub fn parse_ignore_file<P: AsRef<Path>>(root: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let ignore_path = root.as_ref().join(IGNORE_FILE);

    let mut patterns: Vec<String> =
        DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect();

    if let Ok(contents) = read_to_string(&ignore_path) {
        patterns.extend(
            contents
                .lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(|line| line.trim_start_matches("./").trim_end_matches('/').to_string()),
        );
    } else {
        debug!("No {IGNORE_FILE} file found, using default patterns.");
    }

    for pattern in &patterns {
        debug!("Adding ignore pattern: {pattern} to globset");
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Whether `path` (absolute, under `root`) matches the ignore set, either
/// directly or through one of its parent directories.
pub fn is_ignored(ignore: &GlobSet, root: &Path, path: &Path) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return false;
    };
    rel.ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .any(|p| ignore.is_match(p.to_slash_string()))
}
