//! dirjson - convert a directory tree to JSON and back
//!
//! - [`TreeReader`] reads a directory into a nested [`TreeNode`] (`dir2json`)
//! - [`TreeWriter`] materializes a flat [`ProjectDocument`] onto disk (`json2dir`)

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod tree;
pub mod writer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ReaderConfig, WriterConfig};
pub use document::{DocumentEntry, FileEntry, ProjectDocument, SkipReason};
pub use error::{DocumentError, WriteError};
pub use output::{print_json, save_json, to_pretty_json};
pub use tree::{TreeNode, TreeReader};
pub use writer::{ConsoleProgress, SilentProgress, TreeWriter, WriteProgress, WriteReport};
