//! Configuration types for the tree reader and writer

use std::path::PathBuf;

/// File name the reader's JSON is saved under, next to the executable.
pub const STRUCTURE_FILE_NAME: &str = "project-structure.json";

/// Directory the writer materializes into when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "generated-project";

/// Top-level key holding the writer's list of entries.
pub const PROJECT_FILES_KEY: &str = "project_files";

/// Configuration for directory reading behavior.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Follow symbolic links instead of skipping them.
    /// Cycles are recorded as unreadable entries rather than descended into.
    pub follow_symlinks: bool,
    /// Entry names (or globs) to leave out of the output
    pub ignore_patterns: Vec<String>,
    /// File name the JSON is saved under when no explicit path is given
    pub structure_file_name: String,
}

impl ReaderConfig {
    /// Default save location: `structure_file_name` in the directory holding
    /// the running executable, or the working directory if that is unknown.
    pub fn structure_file_path(&self) -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(&self.structure_file_name)))
            .unwrap_or_else(|| PathBuf::from(&self.structure_file_name))
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
            structure_file_name: STRUCTURE_FILE_NAME.to_string(),
        }
    }
}

/// Configuration for materializing a document onto disk.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Key under which the entry list is expected
    pub files_key: String,
    /// Root directory the entries are written under
    pub output_dir: PathBuf,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            files_key: PROJECT_FILES_KEY.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
