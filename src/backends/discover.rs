//! File discovery backend
//!
//! Uses walkdir for raw traversal and the ignore crate when ignore files should
//! be honored.

use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::model::{CodematError, DiscoveredFile};
use crate::core::paths::display_path;

/// Default accepted suffixes
pub const DEFAULT_ACCEPT: &[&str] = &[".ts", ".tsx"];

/// Default excluded suffixes (declaration-only files)
pub const DEFAULT_EXCLUDE: &[&str] = &[".d.ts"];

/// Suffix-based file name filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixFilter {
    accept: Vec<String>,
    exclude: Vec<String>,
}

impl SuffixFilter {
    /// Build a filter, rejecting empty suffixes (they would match everything)
    pub fn new<S: AsRef<str>>(accept: &[S], exclude: &[S]) -> Result<Self, CodematError> {
        let collect = |suffixes: &[S]| {
            suffixes
                .iter()
                .map(|s| {
                    let s: &str = s.as_ref();
                    let s = s.trim();
                    if s.is_empty() {
                        Err(CodematError::InvalidSuffix(s.to_string()))
                    } else {
                        Ok(s.to_string())
                    }
                })
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(Self {
            accept: collect(accept)?,
            exclude: collect(exclude)?,
        })
    }

    /// Whether a file name is accepted
    ///
    /// Compares raw bytes, so names that are not valid UTF-8 still match.
    pub fn matches(&self, file_name: impl AsRef<OsStr>) -> bool {
        let name = file_name.as_ref().as_encoded_bytes();
        let ends_with = |suffix: &String| name.ends_with(suffix.as_bytes());
        self.accept.iter().any(ends_with) && !self.exclude.iter().any(ends_with)
    }
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self {
            accept: DEFAULT_ACCEPT.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Traversal options
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Honor .gitignore/.ignore files
    pub respect_ignore: bool,
}

/// Discover files under `src_dir` that pass `filter`, sorted by display path
///
/// Display paths are relative to `root` when the file lies under it.
pub fn discover_files(
    root: &Path,
    src_dir: &Path,
    filter: &SuffixFilter,
    options: WalkOptions,
) -> Result<Vec<DiscoveredFile>, CodematError> {
    if !src_dir.is_dir() {
        return Err(CodematError::MissingRootDirectory {
            path: src_dir.to_path_buf(),
        });
    }

    let walked = if options.respect_ignore {
        walk_with_ignore(src_dir)
    } else {
        walk_all(src_dir)
    };

    for err in &walked.errors {
        warn!("{}", err);
    }

    let mut files: Vec<DiscoveredFile> = walked
        .paths
        .into_iter()
        .filter(|path| {
            path.file_name()
                .map(|name| filter.matches(name))
                .unwrap_or(false)
        })
        .map(|path| {
            let shown = display_path(&path, root);
            debug!(path = %shown, "discovered file");
            DiscoveredFile::new(path, shown)
        })
        .collect();

    files.sort_by(|a, b| a.display.cmp(&b.display));
    Ok(files)
}

/// Non-directory entries found by a walk, plus the entries that could not be visited
#[derive(Debug, Default)]
struct Walked {
    paths: Vec<PathBuf>,
    errors: Vec<CodematError>,
}

impl Walked {
    fn push_error(&mut self, dir: &Path, path: Option<&Path>, message: String) {
        self.errors.push(CodematError::Walk {
            path: path.unwrap_or(dir).to_path_buf(),
            message,
        });
    }
}

/// Directories and symlinks to directories are descended into (or not) by the
/// walker; everything else, dangling symlinks included, is a candidate file.
fn is_candidate(file_type_is_dir: bool, path: &Path) -> bool {
    !file_type_is_dir && !path.is_dir()
}

/// Every non-directory entry under `dir`
fn walk_all(dir: &Path) -> Walked {
    let mut walked = Walked::default();

    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                walked.push_error(dir, e.path(), e.to_string());
                continue;
            }
        };

        if is_candidate(entry.file_type().is_dir(), entry.path()) {
            walked.paths.push(entry.into_path());
        }
    }

    walked
}

/// Non-directory entries under `dir`, minus whatever ignore files exclude
fn walk_with_ignore(dir: &Path) -> Walked {
    let mut builder = WalkBuilder::new(dir);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false);

    let mut walked = Walked::default();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                walked.push_error(dir, None, e.to_string());
                continue;
            }
        };

        let candidate = entry
            .file_type()
            .map(|ft| is_candidate(ft.is_dir(), entry.path()))
            .unwrap_or(false);
        if candidate {
            walked.paths.push(entry.into_path());
        }
    }

    walked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn displays(files: &[DiscoveredFile]) -> Vec<&str> {
        files.iter().map(|f| f.display.as_str()).collect()
    }

    #[test]
    fn test_filter_defaults() {
        let filter = SuffixFilter::default();
        assert!(filter.matches("app.ts"));
        assert!(filter.matches("Button.tsx"));
        assert!(!filter.matches("global.d.ts"));
        assert!(!filter.matches("index.js"));
        assert!(!filter.matches("types.d.tsx.bak"));
        // .d.tsx is not declaration-only
        assert!(filter.matches("weird.d.tsx"));
    }

    #[test]
    fn test_filter_rejects_empty_suffix() {
        let err = SuffixFilter::new(&[".ts", " "], &[]).unwrap_err();
        assert!(matches!(err, CodematError::InvalidSuffix(_)));
    }

    #[test]
    fn test_filter_custom_suffixes() {
        let filter = SuffixFilter::new(&[".js", ".jsx"], &[".min.js"]).unwrap();
        assert!(filter.matches("a.js"));
        assert!(filter.matches("b.jsx"));
        assert!(!filter.matches("vendor.min.js"));
        assert!(!filter.matches("c.ts"));
    }

    #[test]
    fn test_discover_recursive_sorted() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("src/z.ts"), "z");
        write_file(&root.join("src/a/b/deep.tsx"), "d");
        write_file(&root.join("src/a/types.d.ts"), "t");
        write_file(&root.join("src/a/readme.md"), "m");
        write_file(&root.join("src/a-b.ts"), "ab");
        write_file(&root.join("other/outside.ts"), "o");

        let files = discover_files(
            root,
            &root.join("src"),
            &SuffixFilter::default(),
            WalkOptions::default(),
        )
        .unwrap();

        // byte order on the path string: '-' sorts before '/'
        assert_eq!(
            displays(&files),
            vec!["src/a-b.ts", "src/a/b/deep.tsx", "src/z.ts"]
        );
        assert!(files.iter().all(|f| f.path.starts_with(root)));
    }

    #[test]
    fn test_discover_missing_root() {
        let temp = tempdir().unwrap();
        let err = discover_files(
            temp.path(),
            &temp.path().join("src"),
            &SuffixFilter::default(),
            WalkOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CodematError::MissingRootDirectory { .. }));
    }

    #[test]
    fn test_discover_root_is_file() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src"), "not a dir");
        let err = discover_files(
            temp.path(),
            &temp.path().join("src"),
            &SuffixFilter::default(),
            WalkOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CodematError::MissingRootDirectory { .. }));
    }

    #[test]
    fn test_discover_empty_dir() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        let files = discover_files(
            temp.path(),
            &temp.path().join("src"),
            &SuffixFilter::default(),
            WalkOptions::default(),
        )
        .unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_includes_hidden_and_ignored_by_default() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("src/.gitignore"), "generated/\n");
        write_file(&root.join("src/generated/api.ts"), "g");
        write_file(&root.join("src/.hidden/x.ts"), "h");
        write_file(&root.join("src/main.ts"), "m");

        let files = discover_files(
            root,
            &root.join("src"),
            &SuffixFilter::default(),
            WalkOptions::default(),
        )
        .unwrap();
        assert_eq!(
            displays(&files),
            vec!["src/.hidden/x.ts", "src/generated/api.ts", "src/main.ts"]
        );
    }

    #[test]
    fn test_discover_respects_ignore_files() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("src/.gitignore"), "generated/\n");
        write_file(&root.join("src/generated/api.ts"), "g");
        write_file(&root.join("src/main.ts"), "m");

        let files = discover_files(
            root,
            &root.join("src"),
            &SuffixFilter::default(),
            WalkOptions {
                respect_ignore: true,
            },
        )
        .unwrap();
        assert_eq!(displays(&files), vec!["src/main.ts"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_filter_matches_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let filter = SuffixFilter::default();
        assert!(filter.matches(OsStr::from_bytes(b"caf\xe9.ts")));
        assert!(!filter.matches(OsStr::from_bytes(b"caf\xe9.d.ts")));
        assert!(!filter.matches(OsStr::from_bytes(b"caf\xe9.js")));
    }

    // macOS rejects file names that are not valid UTF-8
    #[cfg(target_os = "linux")]
    #[test]
    fn test_discover_non_utf8_name() {
        use std::os::unix::ffi::OsStrExt;

        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("src/ok.ts"), "ok");
        write_file(
            &root.join("src").join(OsStr::from_bytes(b"caf\xe9.ts")),
            "latin-1 name",
        );

        let files = discover_files(
            root,
            &root.join("src"),
            &SuffixFilter::default(),
            WalkOptions::default(),
        )
        .unwrap();
        assert_eq!(files.len(), 2);
        assert!(files
            .iter()
            .any(|f| f.path.file_name() == Some(OsStr::from_bytes(b"caf\xe9.ts"))));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_dangling_symlink() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("src")).unwrap();
        std::os::unix::fs::symlink("gone.ts", root.join("src/link.ts")).unwrap();

        for respect_ignore in [false, true] {
            let files = discover_files(
                root,
                &root.join("src"),
                &SuffixFilter::default(),
                WalkOptions { respect_ignore },
            )
            .unwrap();
            assert_eq!(displays(&files), vec!["src/link.ts"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_symlinked_dir_is_not_a_file() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("lib/inner.ts"), "i");
        write_file(&root.join("src/main.ts"), "m");
        std::os::unix::fs::symlink(root.join("lib"), root.join("src/linked.ts")).unwrap();

        for respect_ignore in [false, true] {
            let files = discover_files(
                root,
                &root.join("src"),
                &SuffixFilter::default(),
                WalkOptions { respect_ignore },
            )
            .unwrap();
            assert_eq!(displays(&files), vec!["src/main.ts"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_dir_is_recorded_and_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = temp.path();
        let locked = root.join("src/locked");
        write_file(&locked.join("hidden.ts"), "h");
        write_file(&root.join("src/ok.ts"), "ok");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind privileged users
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let walked = walk_all(&root.join("src"));
        let ignore_walked = walk_with_ignore(&root.join("src"));
        let files = discover_files(
            root,
            &root.join("src"),
            &SuffixFilter::default(),
            WalkOptions::default(),
        );
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(walked.errors.len(), 1);
        assert!(matches!(walked.errors[0], CodematError::Walk { .. }));
        assert!(walked.errors[0].to_string().contains("locked"));
        assert!(!ignore_walked.errors.is_empty());
        assert_eq!(displays(&files.unwrap()), vec!["src/ok.ts"]);
    }
}
