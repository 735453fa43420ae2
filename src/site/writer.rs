use crate::error::{Error, Result};
use crate::site::operation::BuildOperation;
use std::path::Path;

/// Applies build operations to the filesystem.
pub struct OutputWriter {
    dry_run: bool,
}

impl OutputWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Applies every operation in order, logging each one.
    ///
    /// # Returns
    /// * `Result<usize>` - The number of files written or copied
    pub fn apply_all(&self, operations: &[BuildOperation]) -> Result<usize> {
        let mut written = 0;
        for operation in operations {
            match operation {
                BuildOperation::Write { target, content, .. } => {
                    self.write_file(content, target)?;
                    written += 1;
                }
                BuildOperation::Copy { source, target } => {
                    self.copy_file(source, target)?;
                    written += 1;
                }
                BuildOperation::Skip { .. } => {}
            }
            log::info!("{}", operation.get_message(self.dry_run));
        }
        Ok(written)
    }

    /// Removes the output directory before a clean build.
    pub fn clean<P: AsRef<Path>>(&self, output: P) -> Result<()> {
        let output = output.as_ref();
        if self.dry_run || !output.exists() {
            return Ok(());
        }
        log::info!("Removing '{}'", output.display());
        std::fs::remove_dir_all(output).map_err(Error::from)
    }

    /// Copy a file from source to destination, creating parent directories if needed.
    fn copy_file<P: AsRef<Path>>(&self, source_path: P, dest_path: P) -> Result<()> {
        let dest_path = dest_path.as_ref();

        if self.dry_run {
            return Ok(());
        }

        if let Some(parent) = dest_path.parent() {
            self.create_dir_all(parent)?;
        }

        Ok(std::fs::copy(source_path.as_ref(), dest_path).map(|_| ())?)
    }

    /// Write content to a file, creating parent directories if needed.
    fn write_file<P: AsRef<Path>>(&self, content: &str, dest_path: P) -> Result<()> {
        let dest_path = dest_path.as_ref();

        if self.dry_run {
            return Ok(());
        }

        if let Some(parent) = dest_path.parent() {
            self.create_dir_all(parent)?;
        }

        std::fs::write(dest_path, content).map_err(Error::from)
    }

    fn create_dir_all<P: AsRef<Path>>(&self, dest_path: P) -> Result<()> {
        std::fs::create_dir_all(dest_path.as_ref()).map_err(Error::from)
    }
}
