//! In-memory representation of a directory tree

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Prefix of the string an unreadable entry serializes to.
pub const UNREADABLE_PREFIX: &str = "Error reading file: ";

/// A file, a directory of named children, or a marker for an entry that
/// could not be read.
///
/// Serializes to the reader's output schema: files become JSON strings,
/// directories become objects keyed by entry name, and unreadable entries
/// become an `"Error reading file: ..."` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File(String),
    Directory(BTreeMap<String, TreeNode>),
    Unreadable(String),
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }

    pub fn is_unreadable(&self) -> bool {
        matches!(self, TreeNode::Unreadable(_))
    }

    /// Look up a child by a `/`-separated relative path.
    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self, |node, part| match node {
                TreeNode::Directory(children) => children.get(part),
                _ => None,
            })
    }

    /// Number of readable files anywhere under this node.
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::File(_) => 1,
            TreeNode::Directory(children) => children.values().map(TreeNode::file_count).sum(),
            TreeNode::Unreadable(_) => 0,
        }
    }

    /// Flatten into `(relative path, content)` pairs, sorted by path.
    ///
    /// Paths use `/` as separator, matching the writer's entry names.
    /// Unreadable entries are left out.
    pub fn files(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_files("", &mut out);
        out
    }

    fn collect_files<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        match self {
            TreeNode::File(content) => out.push((prefix.to_string(), content)),
            TreeNode::Directory(children) => {
                for (name, child) in children {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{}/{}", prefix, name)
                    };
                    child.collect_files(&path, out);
                }
            }
            TreeNode::Unreadable(_) => {}
        }
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeNode::File(content) => serializer.serialize_str(content),
            TreeNode::Directory(children) => children.serialize(serializer),
            TreeNode::Unreadable(reason) => {
                serializer.serialize_str(&format!("{}{}", UNREADABLE_PREFIX, reason))
            }
        }
    }
}
