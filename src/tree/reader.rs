//! TreeReader - reads a directory and its file contents into memory

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::ReaderConfig;

use super::node::TreeNode;
use super::utils::{entry_name, should_ignore_name};

/// Message recorded for a directory symlink that points back at one of its ancestors.
pub const SYMLINK_CYCLE_MESSAGE: &str = "symlink cycle detected";

/// Reads a whole directory tree, file contents included, into a [`TreeNode`].
///
/// Failures never escape `read`: an entry that cannot be read becomes a
/// [`TreeNode::Unreadable`] marker in place, and a root that cannot be listed
/// is returned as a single marker.
pub struct TreeReader {
    config: ReaderConfig,
}

impl TreeReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn read(&self, root: &Path) -> TreeNode {
        let mut ancestors = Vec::new();
        match self.read_dir(root, &mut ancestors) {
            Ok(children) => TreeNode::Directory(children),
            Err(e) => {
                warn!(path = %root.display(), error = %e, "cannot read root directory");
                TreeNode::Unreadable(e.to_string())
            }
        }
    }

    /// List a directory and read each entry. Only the listing itself can fail.
    fn read_dir(
        &self,
        path: &Path,
        ancestors: &mut Vec<PathBuf>,
    ) -> io::Result<BTreeMap<String, TreeNode>> {
        let entries = fs::read_dir(path)?;

        // Ancestors are only tracked when links are followed; otherwise
        // the walk cannot revisit a directory.
        let tracked = if self.config.follow_symlinks {
            ancestors.push(fs::canonicalize(path)?);
            true
        } else {
            false
        };

        let mut children = BTreeMap::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(dir = %path.display(), error = %e, "skipping unlistable entry");
                    continue;
                }
            };
            let entry_path = entry.path();
            let name = entry_name(&entry.file_name());

            if should_ignore_name(&name, &self.config.ignore_patterns) {
                debug!(path = %entry_path.display(), "ignored");
                continue;
            }

            if let Some(node) = self.read_entry(&entry_path, ancestors) {
                if children.contains_key(&name) {
                    // Only possible when an escaped name equals a literal one
                    warn!(
                        path = %entry_path.display(),
                        "entry name collides with a sibling, keeping the first"
                    );
                    continue;
                }
                children.insert(name, node);
            }
        }

        if tracked {
            ancestors.pop();
        }
        Ok(children)
    }

    /// Read a single entry. `None` means the entry is left out of the tree.
    fn read_entry(&self, path: &Path, ancestors: &mut Vec<PathBuf>) -> Option<TreeNode> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) => return Some(unreadable(path, e)),
        };

        let file_type = if metadata.file_type().is_symlink() {
            if !self.config.follow_symlinks {
                debug!(path = %path.display(), "skipping symlink");
                return None;
            }
            match fs::metadata(path) {
                Ok(target) => target.file_type(),
                Err(e) => return Some(unreadable(path, e)),
            }
        } else {
            metadata.file_type()
        };

        if file_type.is_dir() {
            if self.config.follow_symlinks && self.is_cycle(path, ancestors) {
                warn!(path = %path.display(), "{}", SYMLINK_CYCLE_MESSAGE);
                return Some(TreeNode::Unreadable(SYMLINK_CYCLE_MESSAGE.to_string()));
            }
            return Some(match self.read_dir(path, ancestors) {
                Ok(children) => TreeNode::Directory(children),
                Err(e) => unreadable(path, e),
            });
        }

        if file_type.is_file() {
            return Some(match fs::read_to_string(path) {
                Ok(content) => TreeNode::File(content),
                Err(e) => unreadable(path, e),
            });
        }

        warn!(path = %path.display(), "skipping special file");
        None
    }

    fn is_cycle(&self, path: &Path, ancestors: &[PathBuf]) -> bool {
        fs::canonicalize(path).is_ok_and(|real| ancestors.contains(&real))
    }
}

fn unreadable(path: &Path, error: io::Error) -> TreeNode {
    warn!(path = %path.display(), error = %error, "cannot read entry");
    TreeNode::Unreadable(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::{PermissionsExt, symlink};

    /// Remove all permissions; returns false when they are not enforced (e.g. running as root).
    fn lock(path: &Path) -> bool {
        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
        fs::File::open(path).is_err()
    }

    fn unlock(path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    fn read(dir: &TestDir) -> TreeNode {
        TreeReader::new(ReaderConfig::default()).read(dir.path())
    }

    #[test]
    fn test_reads_nested_files() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "hi");
        dir.add_file("sub/b.txt", "yo");
        dir.add_file("sub/deeper/c.md", "# title\n");

        let tree = read(&dir);
        assert_eq!(
            tree.files(),
            vec![
                ("a.txt".to_string(), "hi"),
                ("sub/b.txt".to_string(), "yo"),
                ("sub/deeper/c.md".to_string(), "# title\n"),
            ]
        );
    }

    #[test]
    fn test_empty_directory_is_empty_mapping() {
        let dir = TestDir::new();
        dir.add_dir("empty");

        let tree = read(&dir);
        assert_eq!(tree.get("empty"), Some(&TreeNode::Directory(BTreeMap::new())));
    }

    #[test]
    fn test_missing_root_is_single_marker() {
        let dir = TestDir::new();
        let tree = TreeReader::new(ReaderConfig::default()).read(&dir.path().join("nope"));
        assert!(tree.is_unreadable());
    }

    #[test]
    fn test_file_root_is_single_marker() {
        let dir = TestDir::new();
        let file = dir.add_file("plain.txt", "x");
        let tree = TreeReader::new(ReaderConfig::default()).read(&file);
        assert!(tree.is_unreadable());
    }

    #[test]
    fn test_invalid_utf8_file_is_isolated() {
        let dir = TestDir::new();
        dir.add_file("good.txt", "fine");
        dir.add_bytes("bad.bin", &[0xff, 0xfe, 0x00, 0x80]);
        dir.add_file("other/also_good.txt", "ok");

        let tree = read(&dir);
        assert_eq!(tree.get("good.txt"), Some(&TreeNode::File("fine".to_string())));
        assert_eq!(
            tree.get("other/also_good.txt"),
            Some(&TreeNode::File("ok".to_string()))
        );
        assert!(tree.get("bad.bin").unwrap().is_unreadable());
    }

    #[test]
    fn test_ignore_patterns() {
        let dir = TestDir::new();
        dir.add_file("keep.rs", "fn main() {}");
        dir.add_file("debug.log", "noise");
        dir.add_file("node_modules/pkg/index.js", "module.exports = 1;");

        let config = ReaderConfig {
            ignore_patterns: vec!["*.log".to_string(), "node_modules".to_string()],
            ..Default::default()
        };
        let tree = TreeReader::new(config).read(dir.path());
        assert_eq!(tree.files(), vec![("keep.rs".to_string(), "fn main() {}")]);
    }

    #[test]
    fn test_symlinks_skipped_by_default() {
        let dir = TestDir::new();
        dir.add_file("real/file.txt", "data");
        symlink(dir.path().join("real"), dir.path().join("link")).unwrap();
        symlink(dir.path().join("real/file.txt"), dir.path().join("file_link")).unwrap();

        let tree = read(&dir);
        assert!(tree.get("link").is_none());
        assert!(tree.get("file_link").is_none());
        assert_eq!(tree.get("real/file.txt"), Some(&TreeNode::File("data".to_string())));
    }

    #[test]
    fn test_follow_symlinks_reads_targets() {
        let dir = TestDir::new();
        dir.add_file("real/file.txt", "data");
        symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let config = ReaderConfig {
            follow_symlinks: true,
            ..Default::default()
        };
        let tree = TreeReader::new(config).read(dir.path());
        assert_eq!(tree.get("link/file.txt"), Some(&TreeNode::File("data".to_string())));
    }

    #[test]
    fn test_follow_symlinks_stops_at_cycle() {
        let dir = TestDir::new();
        dir.add_file("sub/file.txt", "data");
        symlink("..", dir.path().join("sub/parent")).unwrap();

        let config = ReaderConfig {
            follow_symlinks: true,
            ..Default::default()
        };
        let tree = TreeReader::new(config).read(dir.path());
        assert_eq!(
            tree.get("sub/parent"),
            Some(&TreeNode::Unreadable(SYMLINK_CYCLE_MESSAGE.to_string()))
        );
        assert_eq!(tree.get("sub/file.txt"), Some(&TreeNode::File("data".to_string())));
    }

    #[test]
    fn test_follow_broken_symlink_is_marker() {
        let dir = TestDir::new();
        dir.add_file("real.txt", "x");
        symlink("nonexistent.txt", dir.path().join("broken")).unwrap();

        let config = ReaderConfig {
            follow_symlinks: true,
            ..Default::default()
        };
        let tree = TreeReader::new(config).read(dir.path());
        assert!(tree.get("broken").unwrap().is_unreadable());
        assert_eq!(tree.get("real.txt"), Some(&TreeNode::File("x".to_string())));
    }

    #[test]
    fn test_non_utf8_names_are_kept_apart() {
        let dir = TestDir::new();
        fs::write(dir.path().join(std::ffi::OsStr::from_bytes(b"a\xff")), "one").unwrap();
        fs::write(dir.path().join(std::ffi::OsStr::from_bytes(b"a\xfe")), "two").unwrap();

        let tree = read(&dir);
        assert_eq!(tree.file_count(), 2);
        assert_eq!(tree.get("a\\xff"), Some(&TreeNode::File("one".to_string())));
        assert_eq!(tree.get("a\\xfe"), Some(&TreeNode::File("two".to_string())));
    }

    #[test]
    fn test_permission_denied_file_is_isolated() {
        let dir = TestDir::new();
        dir.add_file("good.txt", "fine");
        let locked = dir.add_file("locked.txt", "secret");
        if !lock(&locked) {
            unlock(&locked, 0o644);
            return;
        }

        let tree = read(&dir);
        unlock(&locked, 0o644);

        assert!(tree.get("locked.txt").unwrap().is_unreadable());
        assert_eq!(tree.get("good.txt"), Some(&TreeNode::File("fine".to_string())));
    }

    #[test]
    fn test_unlistable_subdirectory_is_isolated() {
        let dir = TestDir::new();
        dir.add_file("good.txt", "fine");
        dir.add_file("other/kept.txt", "ok");
        dir.add_file("private/hidden.txt", "secret");
        let private = dir.path().join("private");
        if !lock(&private) {
            unlock(&private, 0o755);
            return;
        }

        let tree = read(&dir);
        unlock(&private, 0o755);

        assert!(tree.get("private").unwrap().is_unreadable());
        assert_eq!(tree.get("good.txt"), Some(&TreeNode::File("fine".to_string())));
        assert_eq!(tree.get("other/kept.txt"), Some(&TreeNode::File("ok".to_string())));
    }
}
