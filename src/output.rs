//! JSON output formatting

use std::fs;
use std::io;
use std::path::Path;

use crate::tree::TreeNode;

/// Render a tree as pretty-printed (2-space indented) JSON.
pub fn to_pretty_json(node: &TreeNode) -> io::Result<String> {
    serde_json::to_string_pretty(node).map_err(io::Error::other)
}

/// Print tree node as pretty-printed JSON to stdout.
pub fn print_json(node: &TreeNode) -> io::Result<()> {
    let json = to_pretty_json(node)?;
    println!("{}", json);
    Ok(())
}

/// Save tree node as pretty-printed JSON to a file, with a trailing newline.
pub fn save_json(node: &TreeNode, path: &Path) -> io::Result<()> {
    let mut json = to_pretty_json(node)?;
    json.push('\n');
    fs::write(path, json)
}
