//! Error types for registration and resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Error reported by a [`SourceLoader`](crate::project::SourceLoader).
pub type LoadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the autoloader.
///
/// Unreadable candidates, scope mismatches and already-loaded names are not
/// errors; the resolver recovers from those by moving on to the next
/// directory (or doing nothing).
#[derive(Debug, Error)]
pub enum AutoloadError {
    /// A registered path does not name an existing directory.
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    /// Every registered directory was searched without an accepted candidate.
    #[error("class not found: {0}")]
    ClassNotFound(String),

    /// A directory could not be listed while expanding a recursive registration.
    #[error("failed to list directory {path}: {source}")]
    ListDirectory {
        /// Directory whose listing failed.
        path: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// The loader rejected a verified candidate.
    #[error("failed to load {name} from {path}: {source}")]
    Load {
        /// The symbolic name being resolved.
        name: String,
        /// The candidate file handed to the loader.
        path: PathBuf,
        /// The loader's error.
        #[source]
        source: LoadError,
    },

    /// A declaration pattern built from the configuration failed to compile.
    #[error("invalid declaration pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AutoloadError>;
