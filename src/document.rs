//! Writer input documents: a flat list of `{name, content}` entries
//!
//! The whole document is parsed and validated up front, so that structural
//! problems are reported before anything touches the disk. Individual entries
//! that are malformed are kept as [`DocumentEntry::Invalid`] so the writer can
//! report and skip them in list order.

use std::fs;
use std::io;
use std::path::{Component, Path};

use serde_json::Value;

use crate::config::WriterConfig;
use crate::error::DocumentError;

/// A single file to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Relative path, `/`-separated
    pub name: String,
    pub content: String,
}

/// Why an entry is skipped instead of written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingName,
    MissingContent,
    /// Absolute path or `..` component; writing it would leave the root.
    EscapesRoot,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "entry is not an object"),
            SkipReason::MissingName => write!(f, "missing \"name\""),
            SkipReason::MissingContent => write!(f, "missing \"content\""),
            SkipReason::EscapesRoot => write!(f, "path escapes the output directory"),
        }
    }
}

/// One element of the entry list, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEntry {
    File(FileEntry),
    Invalid {
        /// Position in the list
        index: usize,
        /// The entry's name, when it had a usable one
        name: Option<String>,
        reason: SkipReason,
    },
}

/// A parsed writer input document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDocument {
    pub entries: Vec<DocumentEntry>,
}

impl ProjectDocument {
    /// Load and validate a document from a file.
    pub fn from_path(path: &Path, config: &WriterConfig) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => DocumentError::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => DocumentError::UnableToReadInput {
                path: path.to_path_buf(),
                error,
            },
        })?;
        Self::from_json_str(&text, config)
    }

    /// Parse and validate a document from JSON text.
    pub fn from_json_str(text: &str, config: &WriterConfig) -> Result<Self, DocumentError> {
        let value: Value =
            serde_json::from_str(text).map_err(|error| DocumentError::MalformedJson { error })?;
        Self::from_value(&value, config)
    }

    /// Validate an already-parsed JSON value.
    pub fn from_value(value: &Value, config: &WriterConfig) -> Result<Self, DocumentError> {
        let key = &config.files_key;
        let list = value
            .get(key)
            .ok_or_else(|| DocumentError::MissingProjectFiles { key: key.clone() })?
            .as_array()
            .ok_or_else(|| DocumentError::ProjectFilesNotAList { key: key.clone() })?;

        let entries = list
            .iter()
            .enumerate()
            .map(|(index, raw)| parse_entry(index, raw))
            .collect();

        Ok(Self { entries })
    }

    /// Entries that will actually be written.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            DocumentEntry::File(file) => Some(file),
            DocumentEntry::Invalid { .. } => None,
        })
    }
}

fn parse_entry(index: usize, raw: &Value) -> DocumentEntry {
    let invalid = |name: Option<&str>, reason| DocumentEntry::Invalid {
        index,
        name: name.map(str::to_string),
        reason,
    };

    let Some(object) = raw.as_object() else {
        return invalid(None, SkipReason::NotAnObject);
    };

    let name = match object.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name,
        _ => return invalid(None, SkipReason::MissingName),
    };

    let Some(content) = object.get("content").and_then(Value::as_str) else {
        return invalid(Some(name), SkipReason::MissingContent);
    };

    if !stays_within_root(name) {
        return invalid(Some(name), SkipReason::EscapesRoot);
    }

    DocumentEntry::File(FileEntry {
        name: name.to_string(),
        content: content.to_string(),
    })
}

/// A name may only contain normal components (and `.`).
pub fn stays_within_root(name: &str) -> bool {
    let path = Path::new(name);
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}
