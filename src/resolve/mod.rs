//! Name resolution: from a symbolic name to a loaded source file.
//!
//! ```text
//! resolve(name)
//!   ├─ ledger hit?          → AlreadyLoaded
//!   ├─ for dir in registry  → <dir>/<bare>.<ext>, readable?, scope verified?
//!   ├─ file already loaded? → Reused (name recorded, loader not called)
//!   └─ loader.load()        → Loaded (name and file recorded)
//! ```

mod ledger;
mod resolver;
mod scope_verifier;
mod shared;

pub use ledger::LoadLedger;
pub use resolver::{Resolution, Resolver};
pub use scope_verifier::{ScopePattern, ScopeVerifier};
pub use shared::SharedResolver;
