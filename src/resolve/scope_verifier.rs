//! Textual scope verification of candidate files.
//!
//! A candidate is accepted when the first scope declaration in its header
//! names the expected scope. The file is scanned line by line and never
//! parsed; the scan ends at the first scope line or at a type declaration
//! line, whichever comes first.
//!
//! The scope test is a substring match, not an equality check: the expected
//! scope must appear somewhere on the declaration line preceded by
//! whitespace and followed by `;`. Hosts relying on it should be aware that
//! `namespace outer; use inner;` on a single line matches the scope `inner`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::{Regex, RegexBuilder};
use tracing::{trace, warn};

use crate::config::AutoloadConfig;
use crate::error::Result;

/// Checks candidate files for a matching scope declaration.
#[derive(Clone, Debug)]
pub struct ScopeVerifier {
    /// `^\s*<scope-keyword>\s`
    scope_decl: Regex,
    /// `^\s*(<type-keyword>|...)\s`, absent when no type keywords are configured
    type_decl: Option<Regex>,
}

/// A compiled test for one expected scope.
#[derive(Clone, Debug)]
pub struct ScopePattern {
    scope: String,
    regex: Regex,
}

impl ScopePattern {
    /// Compile the test `\s<scope>;` with the scope taken literally.
    pub fn new(scope: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"\s{};", regex::escape(scope)))?;
        Ok(Self {
            scope: scope.to_string(),
            regex,
        })
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Whether a scope declaration line names this scope.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl ScopeVerifier {
    /// Build the declaration patterns from the configured keywords.
    pub fn new(config: &AutoloadConfig) -> Result<Self> {
        let scope_decl = keyword_line(std::slice::from_ref(&config.scope_keyword))?;
        let type_decl = if config.type_keywords.is_empty() {
            None
        } else {
            Some(keyword_line(&config.type_keywords)?)
        };
        Ok(Self {
            scope_decl,
            type_decl,
        })
    }

    /// Check whether `file_path` declares `expected_scope`.
    ///
    /// Unreadable files never match.
    pub fn matches(&self, file_path: &Path, expected_scope: &str) -> bool {
        match ScopePattern::new(expected_scope) {
            Ok(pattern) => self.matches_pattern(file_path, &pattern),
            Err(err) => {
                warn!(scope = expected_scope, %err, "cannot build scope pattern");
                false
            }
        }
    }

    /// Check a file against a precompiled scope pattern.
    pub fn matches_pattern(&self, file_path: &Path, pattern: &ScopePattern) -> bool {
        let file = match File::open(file_path) {
            Ok(file) => file,
            Err(err) => {
                trace!(path = %file_path.display(), %err, "candidate not readable");
                return false;
            }
        };
        let matched = self.scan(BufReader::new(file), pattern);
        trace!(
            path = %file_path.display(),
            scope = pattern.scope(),
            matched,
            "verified candidate scope"
        );
        matched
    }

    /// Scan a header up to the first scope or type declaration line.
    pub fn scan<R: BufRead>(&self, mut reader: R, pattern: &ScopePattern) -> bool {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => return false,
                Ok(_) => {}
                Err(err) => {
                    trace!(%err, "read error while scanning header");
                    return false;
                }
            }
            let line = String::from_utf8_lossy(&buf);

            if self.type_decl.as_ref().is_some_and(|re| re.is_match(&line)) {
                return false;
            }
            if self.scope_decl.is_match(&line) {
                return pattern.is_match(&line);
            }
        }
    }
}

/// `^\s*(?:kw1|kw2)\s`, case-insensitive, keywords taken literally.
fn keyword_line(keywords: &[String]) -> Result<Regex> {
    let alternatives = keywords
        .iter()
        .map(|kw| regex::escape(kw))
        .collect::<Vec<_>>()
        .join("|");
    let regex = RegexBuilder::new(&format!(r"^\s*(?:{alternatives})\s"))
        .case_insensitive(true)
        .build()?;
    Ok(regex)
}
