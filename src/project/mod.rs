//! Search directories and source loading.

mod directory_registry;
mod source_store;

pub use directory_registry::DirectoryRegistry;
pub use source_store::{LoadedSource, SourceLoader, SourceStore};
