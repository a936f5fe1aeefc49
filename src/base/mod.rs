//! Foundation types for the autoloader.
//!
//! - [`SearchPath`] / [`normalize`] - registered directories
//! - [`SymbolicName`] - scope-qualified names split into scope and bare name
//! - [`FileId`] - handles to loaded source files
//!
//! This module has NO dependencies on other autoload modules.

mod file_id;
mod search_path;
mod symbolic_name;

pub use file_id::FileId;
pub use search_path::{PATH_SEPARATOR, SearchPath, normalize};
pub use symbolic_name::{SCOPE_SEPARATOR, SymbolicName};
