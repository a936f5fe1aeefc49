//! Source loaders: what "loading" a resolved file means to the host.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::trace;

use crate::base::{FileId, SymbolicName};
use crate::error::LoadError;

/// Loads a source unit once the resolver has located and verified it.
///
/// The resolver calls [`load`](Self::load) at most once per file. Returning
/// an error aborts the resolution and leaves the name unresolved.
///
/// Closures with the matching signature implement this trait:
///
/// ```
/// use autoload::{Resolver, SymbolicName};
/// use autoload::error::LoadError;
/// use std::path::Path;
///
/// let resolver = Resolver::new(|name: &SymbolicName, path: &Path| -> Result<(), LoadError> {
///     println!("loading {name} from {}", path.display());
///     Ok(())
/// });
/// assert!(resolver.is_ok());
/// ```
pub trait SourceLoader {
    fn load(&mut self, name: &SymbolicName, path: &Path) -> Result<(), LoadError>;
}

impl<F> SourceLoader for F
where
    F: FnMut(&SymbolicName, &Path) -> Result<(), LoadError>,
{
    fn load(&mut self, name: &SymbolicName, path: &Path) -> Result<(), LoadError> {
        self(name, path)
    }
}

/// Default loader: reads each loaded file's text into memory.
///
/// Thread-safe via internal locking; the host reads it back through
/// [`Resolver::loader`](crate::Resolver::loader).
#[derive(Debug, Default)]
pub struct SourceStore {
    inner: RwLock<SourceStoreInner>,
}

#[derive(Debug, Default)]
struct SourceStoreInner {
    /// Path → FileId
    path_to_id: IndexMap<PathBuf, FileId>,
    /// FileId → (defining name, contents)
    sources: IndexMap<FileId, LoadedSource>,
}

/// A file read by a [`SourceStore`].
#[derive(Clone, Debug)]
pub struct LoadedSource {
    /// The name whose resolution loaded this file.
    pub name: SymbolicName,
    pub path: PathBuf,
    pub text: Arc<str>,
}

impl SourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path` and store its text under a fresh [`FileId`].
    ///
    /// Reading an already stored path returns the existing id without
    /// touching the file again.
    pub fn read(&self, name: &SymbolicName, path: &Path) -> std::io::Result<FileId> {
        if let Some(&id) = self.inner.read().path_to_id.get(path) {
            return Ok(id);
        }

        let text = std::fs::read_to_string(path)?;

        let mut inner = self.inner.write();
        if let Some(&id) = inner.path_to_id.get(path) {
            return Ok(id);
        }
        let id = FileId::new(inner.sources.len() as u32);
        inner.path_to_id.insert(path.to_owned(), id);
        inner.sources.insert(
            id,
            LoadedSource {
                name: name.clone(),
                path: path.to_owned(),
                text: Arc::from(text),
            },
        );
        trace!(%name, path = %path.display(), %id, "stored source");
        Ok(id)
    }

    /// Get the id assigned to a path.
    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.inner.read().path_to_id.get(path).copied()
    }

    /// Get a loaded source by id.
    pub fn get(&self, file: FileId) -> Option<LoadedSource> {
        self.inner.read().sources.get(&file).cloned()
    }

    /// Get the text of a loaded file.
    pub fn contents(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().sources.get(&file).map(|s| s.text.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.read().sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All file ids in load order.
    pub fn files(&self) -> Vec<FileId> {
        self.inner.read().sources.keys().copied().collect()
    }
}

impl SourceLoader for SourceStore {
    fn load(&mut self, name: &SymbolicName, path: &Path) -> Result<(), LoadError> {
        self.read(name, path)?;
        Ok(())
    }
}
