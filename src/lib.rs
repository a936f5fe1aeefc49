//! # scope-autoload
//!
//! Lazy resolution of scope-qualified class names (`app\ui\Widget`) to the
//! source files that define them.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! global  → optional process-wide instance
//!   ↓
//! resolve → Resolver, scope verification, load ledger
//!   ↓
//! project → search directory registry, source loaders
//!   ↓
//! base    → Primitives (SearchPath, SymbolicName, FileId)
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use autoload::{Resolver, SourceStore};
//!
//! let mut resolver = Resolver::new(SourceStore::new())?;
//! resolver.register("lib/", true)?;
//!
//! // Later, when the host meets a name it has no definition for:
//! resolver.resolve(r"app\ui\Widget")?;
//! # Ok::<(), autoload::AutoloadError>(())
//! ```

/// Foundation types: SearchPath, SymbolicName, FileId
pub mod base;

pub mod config;
pub mod error;
pub mod global;

/// Search directories and source loaders
pub mod project;

/// Resolver, scope verification and load ledger
pub mod resolve;

pub use base::{FileId, SearchPath, SymbolicName};
pub use config::AutoloadConfig;
pub use error::{AutoloadError, Result};
pub use project::{DirectoryRegistry, SourceLoader, SourceStore};
pub use resolve::{Resolution, Resolver, SharedResolver};
