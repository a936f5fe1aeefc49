//! The ordered set of search directories and its recursive expansion.

use std::io::ErrorKind;

use indexmap::IndexSet;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::base::{SearchPath, normalize};
use crate::config::AutoloadConfig;
use crate::error::{AutoloadError, Result};

/// Ordered, deduplicated set of search directories.
///
/// Registration order is resolution priority: the first directory holding an
/// accepted candidate wins. Entries are only ever appended; [`clear`](Self::clear)
/// is the only way to remove them.
#[derive(Clone, Debug)]
pub struct DirectoryRegistry {
    dirs: IndexSet<SearchPath>,
    excluded: Vec<String>,
}

impl Default for DirectoryRegistry {
    fn default() -> Self {
        Self::with_excluded(AutoloadConfig::default().excluded_dirs)
    }
}

impl DirectoryRegistry {
    /// Create an empty registry that skips `trunk` directories during
    /// recursive registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that skips directories with these names
    /// (and their subtrees) during recursive registration.
    pub fn with_excluded<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dirs: IndexSet::new(),
            excluded: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Register a search directory, optionally with all of its subdirectories.
    ///
    /// The path is normalized first and must name an existing directory.
    /// Registering a path that is already present (exact string match) is a
    /// no-op, and its subtree is not walked again.
    pub fn register(&mut self, path: &str, recursive: bool) -> Result<()> {
        let target = normalize(path);
        if !std::path::Path::new(&target).is_dir() {
            return Err(AutoloadError::DirectoryNotFound(target));
        }
        if !self.insert(&target) {
            trace!(dir = %target, "directory already registered");
            return Ok(());
        }
        debug!(dir = %target, recursive, "registered search directory");

        if recursive {
            self.register_subdirectories(&target)?;
        }
        Ok(())
    }

    /// Walk `root` depth-first, registering every child directory in listing order.
    fn register_subdirectories(&mut self, root: &str) -> Result<()> {
        let mut entries = WalkDir::new(root).min_depth(1).follow_links(true).into_iter();

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => {
                    warn!(path = ?err.path(), "skipping symlink loop");
                    continue;
                }
                Err(err) if is_dangling_symlink(&err) => {
                    warn!(path = ?err.path(), "skipping dangling symlink");
                    continue;
                }
                Err(err) => {
                    let path = err.path().map(ToOwned::to_owned).unwrap_or_else(|| root.into());
                    return Err(AutoloadError::ListDirectory { path, source: err });
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.file_name().to_str().is_some_and(|name| self.is_excluded(name)) {
                trace!(dir = %entry.path().display(), "skipping excluded directory");
                entries.skip_current_dir();
                continue;
            }
            let Some(child) = entry.path().to_str() else {
                warn!(dir = %entry.path().display(), "skipping non UTF-8 directory name");
                entries.skip_current_dir();
                continue;
            };
            if self.insert(child) {
                debug!(dir = %child, "registered search subdirectory");
            } else {
                entries.skip_current_dir();
            }
        }
        Ok(())
    }

    /// Append `dir` unless present. Returns whether it was added.
    fn insert(&mut self, dir: &str) -> bool {
        if self.dirs.contains(dir) {
            return false;
        }
        self.dirs.insert(SearchPath::new(dir))
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|excluded| excluded == name)
    }

    /// Remove every registered directory.
    pub fn clear(&mut self) {
        self.dirs.clear();
    }

    /// Check whether a normalized path is registered.
    pub fn contains(&self, dir: &str) -> bool {
        self.dirs.contains(dir)
    }

    /// Iterate over registered directories in priority order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &SearchPath> + '_ {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// A followed symlink whose target does not exist. Not a directory, so skipped.
fn is_dangling_symlink(err: &walkdir::Error) -> bool {
    let not_found = err.io_error().is_some_and(|io| io.kind() == ErrorKind::NotFound);
    not_found
        && err
            .path()
            .and_then(|path| path.symlink_metadata().ok())
            .is_some_and(|meta| meta.file_type().is_symlink())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn registered(registry: &DirectoryRegistry) -> Vec<String> {
        registry.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_register_missing_directory() {
        let mut registry = DirectoryRegistry::new();
        let err = registry.register("/definitely/not/here//", false).unwrap_err();
        assert!(matches!(err, AutoloadError::DirectoryNotFound(ref p) if p == "/definitely/not/here"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_file_is_not_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Widget.php");
        fs::write(&file, "<?php").unwrap();

        let mut registry = DirectoryRegistry::new();
        let err = registry.register(file.to_str().unwrap(), false).unwrap_err();
        assert!(matches!(err, AutoloadError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_register_dedup_after_normalization() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();

        let mut registry = DirectoryRegistry::new();
        registry.register(&format!("{root}//b/"), false).unwrap();
        registry.register(&format!("{root}/b"), false).unwrap();

        assert_eq!(registered(&registry), vec![format!("{root}/b")]);
    }

    #[test]
    fn test_register_non_recursive_ignores_children() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("child")).unwrap();

        let mut registry = DirectoryRegistry::new();
        registry.register(tmp.path().to_str().unwrap(), false).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_recursive_skips_excluded_subtree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();
        fs::create_dir_all(tmp.path().join("app/ui")).unwrap();
        fs::create_dir_all(tmp.path().join("trunk/nested")).unwrap();
        fs::write(tmp.path().join("app/Widget.php"), "<?php").unwrap();

        let mut registry = DirectoryRegistry::with_excluded(["trunk"]);
        registry.register(root, true).unwrap();

        let dirs = registered(&registry);
        assert_eq!(dirs[0], root);
        assert!(dirs.contains(&format!("{root}/app")));
        assert!(dirs.contains(&format!("{root}/app/ui")));
        assert!(!dirs.iter().any(|d| d.contains("/trunk")));
        assert_eq!(dirs.len(), 3);
    }

    #[test]
    fn test_register_recursive_parent_before_child() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();
        fs::create_dir_all(tmp.path().join("a/b/c")).unwrap();

        let mut registry = DirectoryRegistry::new();
        registry.register(root, true).unwrap();

        assert_eq!(
            registered(&registry),
            vec![
                root.to_string(),
                format!("{root}/a"),
                format!("{root}/a/b"),
                format!("{root}/a/b/c"),
            ]
        );
    }

    #[test]
    fn test_default_registry_excludes_trunk() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();
        fs::create_dir_all(tmp.path().join("trunk/app")).unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();

        let mut registry = DirectoryRegistry::new();
        registry.register(root, true).unwrap();

        assert_eq!(registered(&registry), vec![root.to_string(), format!("{root}/src")]);
        assert_eq!(
            registered(&DirectoryRegistry::default()),
            Vec::<String>::new()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_str().unwrap();
        fs::create_dir(tmp.path().join("app")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("stale")).unwrap();

        let mut registry = DirectoryRegistry::new();
        registry.register(root, true).unwrap();

        assert_eq!(registered(&registry), vec![root.to_string(), format!("{root}/app")]);
    }

    #[test]
    fn test_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let mut registry = DirectoryRegistry::new();
        registry.register(tmp.path().to_str().unwrap(), false).unwrap();
        registry.clear();
        assert!(registry.is_empty());
    }
}
