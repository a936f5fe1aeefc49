//! Resolver configuration.

/// Settings that describe the source layout the resolver searches.
///
/// The defaults describe PHP-style sources: `Widget.php` files whose header
/// carries a `namespace app\ui;` line ahead of the `class Widget` line.
///
/// ```
/// use autoload::AutoloadConfig;
///
/// let config = AutoloadConfig::default()
///     .with_extension("src")
///     .with_type_keywords(["class", "interface", "trait"]);
/// assert_eq!(config.extension, "src");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoloadConfig {
    /// Extension (without the dot) appended to a bare name to build a candidate file name.
    pub extension: String,
    /// Keyword introducing a scope declaration line.
    pub scope_keyword: String,
    /// Keywords introducing a type declaration line. A type line seen before
    /// any scope line ends the header scan.
    pub type_keywords: Vec<String>,
    /// Directory names skipped, with their whole subtree, by recursive registration.
    pub excluded_dirs: Vec<String>,
    /// Segment separator inside symbolic names.
    pub separator: char,
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            extension: "php".to_string(),
            scope_keyword: "namespace".to_string(),
            type_keywords: vec!["class".to_string()],
            excluded_dirs: vec!["trunk".to_string()],
            separator: '\\',
        }
    }
}

impl AutoloadConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.strip_prefix('.').unwrap_or(&extension).to_string();
        self
    }

    /// Set the scope declaration keyword.
    pub fn with_scope_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.scope_keyword = keyword.into();
        self
    }

    /// Replace the type declaration keywords.
    pub fn with_type_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the directory names excluded from recursive registration.
    pub fn with_excluded_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_dirs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the symbolic name separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Whether recursive registration skips a directory with this name.
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.excluded_dirs.iter().any(|name| name == dir_name)
    }
}
