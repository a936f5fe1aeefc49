//! Search directory paths and their normalization.

use std::borrow::Borrow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Separator used when normalizing and joining search paths.
pub const PATH_SEPARATOR: char = '/';

/// Canonicalize a raw directory path string.
///
/// Every run of separators collapses to one, then a single trailing
/// separator is stripped. This is a purely textual transform: nothing is
/// resolved against the file system, so `a/./b` and `a/b` stay distinct.
///
/// ```
/// use autoload::base::normalize;
///
/// assert_eq!(normalize("lib//app///ui/"), "lib/app/ui");
/// assert_eq!(normalize("/"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_sep = false;
    for ch in raw.chars() {
        let is_sep = ch == PATH_SEPARATOR;
        if !(is_sep && prev_sep) {
            out.push(ch);
        }
        prev_sep = is_sep;
    }
    if out.ends_with(PATH_SEPARATOR) {
        out.pop();
    }
    out
}

/// A registered search directory.
///
/// Always holds a normalized path string. Equality is exact string equality,
/// so two spellings of the same directory (`lib/../lib` and `lib`) are
/// distinct entries.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchPath(Arc<str>);

impl SearchPath {
    /// Create a search path from a raw string, normalizing it.
    pub fn new(raw: &str) -> Self {
        Self(Arc::from(normalize(raw)))
    }

    /// The normalized path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path as a file system path.
    pub fn as_path(&self) -> &Path {
        Path::new(&*self.0)
    }

    /// Build `<dir>/<file_name>`.
    pub fn join(&self, file_name: &str) -> String {
        format!("{}{}{}", self.0, PATH_SEPARATOR, file_name)
    }
}

impl Borrow<str> for SearchPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for SearchPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl PartialEq<str> for SearchPath {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SearchPath {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Debug for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchPath({:?})", &*self.0)
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
