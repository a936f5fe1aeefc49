//! Name-driven resolution: candidate lookup across the registered
//! directories, scope verification and the once-only load step.

use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use super::ledger::LoadLedger;
use super::scope_verifier::{ScopePattern, ScopeVerifier};
use crate::base::{SearchPath, SymbolicName};
use crate::config::AutoloadConfig;
use crate::error::{AutoloadError, Result};
use crate::project::{DirectoryRegistry, SourceLoader, SourceStore};

/// Outcome of a successful [`Resolver::resolve`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The name was resolved by an earlier call; nothing was done.
    AlreadyLoaded,
    /// The file was located, verified and handed to the loader.
    Loaded { path: PathBuf },
    /// The accepted file had already been loaded for another name; the
    /// loader was not called again.
    Reused { path: PathBuf },
}

impl Resolution {
    /// The accepted file, if this call located one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Resolution::AlreadyLoaded => None,
            Resolution::Loaded { path } | Resolution::Reused { path } => Some(path),
        }
    }
}

/// Lazily resolves symbolic names to source files.
///
/// The host registers search directories, then calls [`resolve`](Self::resolve)
/// whenever it meets a name it has no definition for. Each name is loaded at
/// most once per resolver.
///
/// ```no_run
/// use autoload::{Resolver, SourceStore};
///
/// let mut resolver = Resolver::new(SourceStore::new())?;
/// resolver.register("/srv/app/lib", true)?;
/// resolver.resolve(r"app\ui\Widget")?;
/// assert!(resolver.is_loaded(r"app\ui\Widget"));
/// # Ok::<(), autoload::AutoloadError>(())
/// ```
#[derive(Debug)]
pub struct Resolver<L = SourceStore> {
    config: AutoloadConfig,
    directories: DirectoryRegistry,
    verifier: ScopeVerifier,
    ledger: LoadLedger,
    loader: L,
}

impl<L: SourceLoader> Resolver<L> {
    /// Create a resolver with the default configuration.
    pub fn new(loader: L) -> Result<Self> {
        Self::with_config(AutoloadConfig::default(), loader)
    }

    pub fn with_config(config: AutoloadConfig, loader: L) -> Result<Self> {
        Ok(Self {
            verifier: ScopeVerifier::new(&config)?,
            directories: DirectoryRegistry::with_excluded(config.excluded_dirs.iter().cloned()),
            ledger: LoadLedger::new(),
            config,
            loader,
        })
    }

    /// Register a search directory. See [`DirectoryRegistry::register`].
    pub fn register(&mut self, path: &str, recursive: bool) -> Result<()> {
        self.directories.register(path, recursive)
    }

    /// Forget every search directory. Resolved names stay resolved.
    pub fn reset_directories(&mut self) {
        debug!(count = self.directories.len(), "resetting search directories");
        self.directories.clear();
    }

    /// Registered directories in priority order.
    pub fn registered_directories(&self) -> impl ExactSizeIterator<Item = &SearchPath> + '_ {
        self.directories.iter()
    }

    /// Names resolved so far, in no particular order.
    pub fn loaded_names(&self) -> impl Iterator<Item = &SymbolicName> + '_ {
        self.ledger.names()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.ledger.contains(self.parse(name).as_str())
    }

    /// Files handed to the loader, in load order.
    pub fn loaded_files(&self) -> impl ExactSizeIterator<Item = &Path> + '_ {
        self.ledger.files()
    }

    pub fn config(&self) -> &AutoloadConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Find the file `resolve` would accept for `name`, without loading it.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.find_candidate(&self.parse(name))
    }

    /// Resolve `name`, loading its defining file if this is the first request.
    ///
    /// Directories are searched in registration order and the first candidate
    /// `<dir>/<bare name>.<extension>` whose header declares the name's scope
    /// wins. A failed resolution is not remembered; the next call searches
    /// again.
    pub fn resolve(&mut self, name: &str) -> Result<Resolution> {
        let name = self.parse(name);
        if self.ledger.contains(name.as_str()) {
            trace!(%name, "already loaded");
            return Ok(Resolution::AlreadyLoaded);
        }

        let Some(path) = self.find_candidate(&name) else {
            debug!(%name, dirs = self.directories.len(), "class not found");
            return Err(AutoloadError::ClassNotFound(name.to_string()));
        };

        if self.ledger.contains_file(&path) {
            debug!(%name, path = %path.display(), "file already loaded for another name");
            self.ledger.record(name);
            return Ok(Resolution::Reused { path });
        }

        if let Err(source) = self.loader.load(&name, &path) {
            return Err(AutoloadError::Load {
                name: name.to_string(),
                path,
                source,
            });
        }
        debug!(%name, path = %path.display(), "loaded");
        self.ledger.record_file(path.clone());
        self.ledger.record(name);
        Ok(Resolution::Loaded { path })
    }

    fn parse(&self, name: &str) -> SymbolicName {
        SymbolicName::with_separator(name, self.config.separator)
    }

    fn find_candidate(&self, name: &SymbolicName) -> Option<PathBuf> {
        let pattern = match ScopePattern::new(name.scope()) {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(%name, %err, "cannot build scope pattern");
                return None;
            }
        };
        let file_name = format!("{}.{}", name.bare_name(), self.config.extension);

        for dir in self.directories.iter() {
            let candidate = PathBuf::from(dir.join(&file_name));
            if !is_readable(&candidate) {
                continue;
            }
            if !self.verifier.matches_pattern(&candidate, &pattern) {
                trace!(%name, path = %candidate.display(), "scope mismatch");
                continue;
            }
            return Some(candidate);
        }
        None
    }
}

fn is_readable(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}
