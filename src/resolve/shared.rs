//! A lock-guarded resolver that can be cloned across threads.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::resolver::{Resolution, Resolver};
use crate::base::{SearchPath, SymbolicName};
use crate::error::Result;
use crate::project::{SourceLoader, SourceStore};

/// A [`Resolver`] behind a single lock, for hosts that resolve from several threads.
///
/// One mutex guards both the directory registry and the load ledger, so a
/// registration never interleaves with a resolution. The lock is held for the
/// whole of a `resolve` call, loader included.
#[derive(Debug)]
pub struct SharedResolver<L = SourceStore> {
    inner: Arc<Mutex<Resolver<L>>>,
}

impl<L> Clone for SharedResolver<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: SourceLoader> SharedResolver<L> {
    pub fn new(resolver: Resolver<L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resolver)),
        }
    }

    /// Lock the resolver for a sequence of operations.
    pub fn lock(&self) -> MutexGuard<'_, Resolver<L>> {
        self.inner.lock()
    }

    pub fn register(&self, path: &str, recursive: bool) -> Result<()> {
        self.inner.lock().register(path, recursive)
    }

    pub fn reset_directories(&self) {
        self.inner.lock().reset_directories();
    }

    pub fn registered_directories(&self) -> Vec<SearchPath> {
        self.inner.lock().registered_directories().cloned().collect()
    }

    pub fn loaded_names(&self) -> Vec<SymbolicName> {
        self.inner.lock().loaded_names().cloned().collect()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.inner.lock().is_loaded(name)
    }

    pub fn resolve(&self, name: &str) -> Result<Resolution> {
        self.inner.lock().resolve(name)
    }
}
