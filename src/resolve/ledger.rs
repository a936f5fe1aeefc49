//! Names and files the resolver has already loaded.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use crate::base::SymbolicName;

/// Record of what the resolver has already loaded.
///
/// A name is a member iff a resolution of that name completed. Files are
/// tracked separately so a file is handed to the loader at most once, even
/// when two names are accepted for it.
#[derive(Clone, Debug, Default)]
pub struct LoadLedger {
    names: FxHashSet<SymbolicName>,
    files: IndexSet<PathBuf>,
}

impl LoadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Mark a name as resolved. Returns `false` if it already was.
    pub fn record(&mut self, name: SymbolicName) -> bool {
        self.names.insert(name)
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Mark a file as loaded. Returns `false` if it already was.
    pub fn record_file(&mut self, path: PathBuf) -> bool {
        self.files.insert(path)
    }

    /// Resolved names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &SymbolicName> + '_ {
        self.names.iter()
    }

    /// Loaded files, in load order.
    pub fn files(&self) -> impl ExactSizeIterator<Item = &Path> + '_ {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
