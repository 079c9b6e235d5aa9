//! File writer for generated schema files.
//!
//! Writes one file per declaration into a flat output directory, creating
//! the directory if needed, with dry-run support.

use crate::error::{CliResult, WriteError};
use std::path::{Path, PathBuf};
use zodgen::GeneratedFile;

/// Result of writing one generated file.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run - content was not written.
    DryRun {
        /// Path where content would have been written.
        path: PathBuf,
        /// Content that would have been written.
        content: String,
    },
}

/// File writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    /// Whether to run in dry-run mode.
    dry_run: bool,
}

impl FileWriter {
    /// Create a new file writer.
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write every generated file into `dir`.
    ///
    /// The directory is created if absent. In dry-run mode nothing touches
    /// the filesystem.
    pub fn write_all(&self, dir: &Path, files: &[GeneratedFile]) -> CliResult<Vec<WriteResult>> {
        if !self.dry_run && !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        files
            .iter()
            .map(|file| self.write_file(dir, file))
            .collect()
    }

    fn write_file(&self, dir: &Path, file: &GeneratedFile) -> CliResult<WriteResult> {
        let path = dir.join(&file.file_name);

        if self.dry_run {
            return Ok(WriteResult::DryRun {
                path,
                content: file.content.clone(),
            });
        }

        std::fs::write(&path, &file.content).map_err(|source| WriteError::WriteFile {
            path: path.clone(),
            source,
        })?;

        Ok(WriteResult::Written {
            path,
            bytes: file.content.len(),
        })
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the write was performed (not dry-run).
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Get the number of bytes written (0 for dry-run).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::DryRun { .. } => 0,
        }
    }
}
