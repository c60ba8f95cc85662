//! Error types for loading and materializing project documents

use std::path::PathBuf;

use thiserror::Error;

/// An error that prevents a project document from being loaded.
///
/// All of these are raised before anything is written to disk.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input file does not exist.
    #[error("input file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    /// The input file exists but could not be read.
    #[error("unable to read input file: {}", .path.display())]
    UnableToReadInput {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// The input is not well-formed JSON.
    #[error("invalid JSON")]
    MalformedJson {
        #[source]
        error: serde_json::Error,
    },

    /// The top-level value has no entry list under the expected key.
    #[error("missing required top-level key \"{key}\"")]
    MissingProjectFiles { key: String },

    /// The expected key is present but does not hold a list.
    #[error("top-level key \"{key}\" must be a list")]
    ProjectFilesNotAList { key: String },
}

/// An error that aborts materializing a document.
///
/// Files written before the failure are left in place.
#[derive(Error, Debug)]
pub enum WriteError {
    /// The destination root could not be created.
    #[error("unable to create output directory: {}", .path.display())]
    UnableToCreateRoot {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// An intermediate directory for an entry could not be created.
    #[error("unable to create directory: {}", .path.display())]
    UnableToCreateDirectory {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// An entry's file could not be written.
    #[error("unable to write file: {}", .path.display())]
    UnableToWriteFile {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Reporting progress failed (e.g. stdout closed).
    #[error("unable to report progress")]
    Progress(#[source] std::io::Error),
}
