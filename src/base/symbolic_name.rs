//! Symbolic (scope-qualified) names.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

/// The default scope separator, as in `app\ui\Widget`.
pub const SCOPE_SEPARATOR: char = '\\';

/// A scope-qualified identifier such as `app\ui\Widget`.
///
/// The last segment is the bare name (`Widget`) and everything before the
/// final separator is the expected scope (`app\ui`). A name with no
/// separator has an empty scope.
///
/// Equality and hashing only consider the full text, so a `SymbolicName`
/// can be looked up in sets by `&str`.
#[derive(Clone)]
pub struct SymbolicName {
    full: SmolStr,
    /// Byte offset of the final separator, if any.
    split: Option<usize>,
    separator: char,
}

impl SymbolicName {
    /// Parse a name using the default `\` separator.
    pub fn new(raw: &str) -> Self {
        Self::with_separator(raw, SCOPE_SEPARATOR)
    }

    /// Parse a name using a custom separator.
    ///
    /// A single leading separator (a fully-qualified spelling like
    /// `\app\Widget`) is dropped.
    pub fn with_separator(raw: &str, separator: char) -> Self {
        let raw = raw.strip_prefix(separator).unwrap_or(raw);
        Self {
            full: SmolStr::new(raw),
            split: raw.rfind(separator),
            separator,
        }
    }

    /// The full name text.
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// The last segment.
    pub fn bare_name(&self) -> &str {
        match self.split {
            Some(pos) => &self.full[pos + self.separator.len_utf8()..],
            None => &self.full,
        }
    }

    /// The scope segments joined by the separator; empty for unscoped names.
    pub fn scope(&self) -> &str {
        match self.split {
            Some(pos) => &self.full[..pos],
            None => "",
        }
    }

    /// Iterate over the scope segments.
    pub fn scope_segments(&self) -> impl Iterator<Item = &str> {
        let scope = self.scope();
        scope.split(self.separator).filter(move |_| !scope.is_empty())
    }

    pub fn separator(&self) -> char {
        self.separator
    }
}

impl PartialEq for SymbolicName {
    fn eq(&self, other: &Self) -> bool {
        self.full == other.full
    }
}

impl Eq for SymbolicName {}

impl Hash for SymbolicName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl Borrow<str> for SymbolicName {
    fn borrow(&self) -> &str {
        &self.full
    }
}

impl From<&str> for SymbolicName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Debug for SymbolicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolicName({:?})", self.as_str())
    }
}

impl fmt::Display for SymbolicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}
