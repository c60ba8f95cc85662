//! Materializing a project document onto disk
//!
//! - `TreeWriter` - creates the root, intermediate directories and files
//! - `progress` - the `WriteProgress` callback and its console implementation

mod progress;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::WriterConfig;
use crate::document::{DocumentEntry, ProjectDocument};
use crate::error::WriteError;

pub use progress::{ConsoleProgress, SilentProgress, WriteProgress};

/// What a write run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub created_dirs: Vec<PathBuf>,
    /// List positions of skipped entries
    pub skipped: Vec<usize>,
}

/// Writes the entries of a [`ProjectDocument`] under a root directory.
///
/// An existing root is reused as-is; files already present are overwritten
/// and everything else is left alone. There is no rollback: if an entry
/// fails, the files written before it remain.
pub struct TreeWriter {
    root: PathBuf,
}

impl TreeWriter {
    /// Writer rooted at `config.output_dir`.
    pub fn new(config: WriterConfig) -> Self {
        Self {
            root: config.output_dir,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write<P: WriteProgress>(
        &self,
        document: &ProjectDocument,
        progress: &mut P,
    ) -> Result<WriteReport, WriteError> {
        let mut report = WriteReport::default();

        if !self.root.is_dir() {
            fs::create_dir_all(&self.root).map_err(|error| WriteError::UnableToCreateRoot {
                path: self.root.clone(),
                error,
            })?;
            progress
                .directory_created(&self.root)
                .map_err(WriteError::Progress)?;
            report.created_dirs.push(self.root.clone());
        }

        for entry in &document.entries {
            match entry {
                DocumentEntry::Invalid {
                    index,
                    name,
                    reason,
                } => {
                    warn!(index, name = name.as_deref().unwrap_or(""), %reason, "skipping entry");
                    progress
                        .entry_skipped(*index, name.as_deref(), reason)
                        .map_err(WriteError::Progress)?;
                    report.skipped.push(*index);
                }
                DocumentEntry::File(file) => {
                    let target = self.root.join(&file.name);

                    if let Some(parent) = target.parent().filter(|p| !p.is_dir()) {
                        let missing = missing_ancestors(parent);
                        fs::create_dir_all(parent).map_err(|error| {
                            WriteError::UnableToCreateDirectory {
                                path: parent.to_path_buf(),
                                error,
                            }
                        })?;
                        for dir in missing {
                            progress
                                .directory_created(&dir)
                                .map_err(WriteError::Progress)?;
                            report.created_dirs.push(dir);
                        }
                    }

                    fs::write(&target, &file.content).map_err(|error| {
                        WriteError::UnableToWriteFile {
                            path: target.clone(),
                            error,
                        }
                    })?;
                    debug!(path = %target.display(), bytes = file.content.len(), "wrote file");
                    progress
                        .file_written(&target, file.content.len())
                        .map_err(WriteError::Progress)?;
                    report.written.push(target);
                }
            }
        }

        progress.finish(&report).map_err(WriteError::Progress)?;
        Ok(report)
    }
}

/// Directories from the outermost missing one down to `dir`, in creation order.
fn missing_ancestors(dir: &Path) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|path| !path.as_os_str().is_empty() && !path.exists())
        .map(Path::to_path_buf)
        .collect();
    missing.reverse();
    missing
}
