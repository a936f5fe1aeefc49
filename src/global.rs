//! A process-wide resolver for hosts that want a single implicit instance.
//!
//! The instance is created on the first [`register`] call and lives for the
//! rest of the process. Hosts that can pass a [`Resolver`] around should do
//! that instead.

use std::sync::OnceLock;

use crate::base::{SearchPath, SymbolicName};
use crate::error::{AutoloadError, Result};
use crate::project::SourceStore;
use crate::resolve::{Resolution, Resolver, SharedResolver};

static INSTANCE: OnceLock<SharedResolver<SourceStore>> = OnceLock::new();

/// The process-wide resolver, if one has been created.
pub fn instance() -> Option<&'static SharedResolver<SourceStore>> {
    INSTANCE.get()
}

fn get_or_create() -> Result<&'static SharedResolver<SourceStore>> {
    if let Some(shared) = INSTANCE.get() {
        return Ok(shared);
    }
    let shared = SharedResolver::new(Resolver::new(SourceStore::new())?);
    Ok(INSTANCE.get_or_init(|| shared))
}

/// Register a search directory, creating the process-wide resolver if needed.
pub fn register(path: &str, recursive: bool) -> Result<()> {
    get_or_create()?.register(path, recursive)
}

/// Clear the registered directories.
///
/// Does nothing when no resolver has been created yet; resolved names are
/// kept either way.
pub fn reset_directories() {
    let Some(shared) = INSTANCE.get() else {
        return;
    };
    shared.reset_directories();
}

/// Snapshot of the process-wide search directories, in priority order.
///
/// Empty when no resolver has been created yet.
pub fn registered_directories() -> Vec<SearchPath> {
    INSTANCE.get().map(SharedResolver::registered_directories).unwrap_or_default()
}

/// Snapshot of every name the process-wide resolver has loaded.
///
/// Empty when no resolver has been created yet.
pub fn loaded_names() -> Vec<SymbolicName> {
    INSTANCE.get().map(SharedResolver::loaded_names).unwrap_or_default()
}

/// Resolve a name through the process-wide resolver.
///
/// Before any registration there is nothing to search, so every name fails
/// with [`AutoloadError::ClassNotFound`].
pub fn resolve(name: &str) -> Result<Resolution> {
    match INSTANCE.get() {
        Some(shared) => shared.resolve(name),
        None => Err(AutoloadError::ClassNotFound(name.to_string())),
    }
}
