use kiln::cli::{run, BuildArgs};
use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Relative paths of every file below `dir`, sorted.
fn files_under(dir: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect()
}

fn show(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => format!("(binary, {} bytes)", bytes.len()),
    }
}

/// Prints which files exist on only one side and, for shared files, both
/// contents when they differ.
///
/// # Arguments
/// * `actual` - The directory the build wrote.
/// * `expected` - The directory with expected output.
pub fn print_dir_diff(actual: &Path, expected: &Path) {
    let actual_files = files_under(actual);
    let expected_files = files_under(expected);

    println!("\n=== Site output comparison ===");
    println!("Actual:   {}", actual.display());
    println!("Expected: {}", expected.display());

    for file in actual_files.difference(&expected_files) {
        println!("  + {}", file.display());
    }
    for file in expected_files.difference(&actual_files) {
        println!("  - {}", file.display());
    }
    for file in actual_files.intersection(&expected_files) {
        let got = fs::read(actual.join(file)).unwrap();
        let want = fs::read(expected.join(file)).unwrap();
        if got != want {
            println!("\n  ~ {}", file.display());
            println!("  --- actual:\n{}", show(&got));
            println!("  --- expected:\n{}", show(&want));
        }
    }
    println!("=== End of comparison ===\n");
}

/// Builds the site at `site_root` into a temporary directory, prints any
/// differences against `expected_dir` and asserts the trees are identical.
///
/// # Arguments
/// * `site_root` - Project root holding the configuration and sources.
/// * `expected_dir` - Path to the directory with expected output.
pub fn build_and_assert(site_root: &str, expected_dir: &str) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let output = tmp_dir.path().join("_site");
    run(build_args(site_root, &output)).unwrap();
    let result = dir_diff::is_different(&output, expected_dir);
    match result {
        Ok(different) => {
            if different {
                print_dir_diff(&output, expected_dir.as_ref());
                panic!("Directories differ. See above for details.");
            }
        }
        Err(e) => {
            debug!("Error comparing directories: {e}");
        }
    }
    assert!(!dir_diff::is_different(&output, expected_dir).unwrap());
}

/// Arguments for a plain build of `site_root` into `output`.
pub fn build_args(site_root: &str, output: &Path) -> BuildArgs {
    BuildArgs {
        root: PathBuf::from(site_root),
        input: None,
        output: Some(output.to_path_buf()),
        clean: false,
        dry_run: false,
    }
}
