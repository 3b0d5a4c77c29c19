//! Project root discovery.
//!
//! A zettelkasten is any directory holding a `.zk-root` file. Every path inside
//! it belongs to the nearest such directory above it (or itself).

use crate::error::{Result, ZkError};
use std::path::{Component, Path, PathBuf};

pub const ZK_ROOT_FILENAME: &str = ".zk-root";

/// Lexically normalize a path: drops `.` segments and trailing separators,
/// folds `..` into its parent. Does not touch the filesystem, so symlinks are
/// left as they are.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the filesystem root stays at the root
                let after_parent =
                    matches!(out.components().next_back(), Some(Component::ParentDir));
                if after_parent || (!out.pop() && !out.has_root()) {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// True for `/` on unix-likes and `C:\` style volume roots on Windows.
pub fn is_filesystem_root(path: &Path) -> bool {
    path.has_root() && path.parent().is_none()
}

/// Find the nearest directory, starting at `start` and walking up, that
/// contains a `.zk-root` file.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut current = normalize(start);

    loop {
        if current.join(ZK_ROOT_FILENAME).exists() {
            tracing::debug!(root = %current.display(), "found zettelkasten root");
            return Ok(current);
        }

        if is_filesystem_root(&current) {
            break;
        }

        match current.parent() {
            Some(parent) if parent != current && !parent.as_os_str().is_empty() => {
                current = parent.to_path_buf();
            }
            _ => break,
        }
    }

    Err(ZkError::RootNotFound {
        start: start.to_path_buf(),
    })
}
