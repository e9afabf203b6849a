//! Path normalization utilities
//!
//! Banner paths use '/' as separator and are relative to the root when possible.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Path shown in a file banner: relative to root when under it, raw otherwise
pub fn display_path(path: &Path, root: &Path) -> String {
    make_relative(path, root).unwrap_or_else(|| normalize_path(path))
}

/// Resolve a possibly-relative path against the root
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
