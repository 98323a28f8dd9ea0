//! Spell-checking services for text editors.
//!
//! Finds Hunspell-style dictionaries (`<lang>.aff` + `<lang>.dic`) in an
//! ordered list of directories, loads them on demand, keeps one instance per
//! language, and answers spelling and suggestion queries.
//!
//! # Architecture
//!
//! - [`search_path`] -- Ordered dictionary directories and their configuration
//! - [`catalog`] -- Snapshot of installed dictionaries for language pickers
//! - [`dictionary`] -- One loaded language: check, suggest, session ignore list
//! - [`registry`] -- Owns the catalog and the per-language dictionary cache
//!
//! # Example
//!
//! ```no_run
//! use spellreg::{Registry, SearchPaths};
//!
//! let mut registry = Registry::with_hunspell(SearchPaths::system_default());
//! for entry in registry.catalog(false) {
//!     println!("{} ({})", entry.name, entry.path.display());
//! }
//! if let Some(dict) = registry.dictionary("en_US") {
//!     if !dict.is_word_correct("teh") {
//!         println!("{:?}", dict.suggestions_for_word("teh"));
//!     }
//! }
//! ```

pub mod catalog;
pub mod dictionary;
pub mod registry;
pub mod search_path;

pub use catalog::{Catalog, CatalogEntry};
pub use dictionary::Dictionary;
pub use registry::{CatalogObserver, Registry, SubscriptionId};
pub use search_path::{DICT_PATH_ENV, SearchPaths};
pub use spellreg_core::encoding::{EncodingSource, ResolvedEncoding};
pub use spellreg_core::engine::{EngineError, EngineHandle, SpellEngine};
