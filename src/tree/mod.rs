//! Directory tree reading
//!
//! This module turns a directory on disk into a [`TreeNode`]: directories become
//! nested mappings, regular files become their UTF-8 contents, and entries that
//! cannot be read become error markers without aborting the rest of the walk.

mod node;
mod reader;
mod utils;

// Re-export public types
pub use node::{TreeNode, UNREADABLE_PREFIX};
pub use reader::{SYMLINK_CYCLE_MESSAGE, TreeReader};
pub use utils::{glob_match, should_ignore_name};
