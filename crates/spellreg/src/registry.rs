// Registry: dictionary discovery and the per-language dictionary cache.
//
// Design notes:
// - The registry is a plain value owned by the application. Both the catalog
//   and the cache are built lazily and only discarded on request.
// - A language is loaded at most once between `clear_cache` calls. Cached
//   dictionaries are never re-validated against the disk.
// - Lookups that find no files are not cached, so dictionaries installed
//   later are picked up on the next request.
// - A dictionary the engine fails to open is cached in degraded form to avoid
//   re-reading a broken pair on every keystroke.
// - No locking. Mutating methods take `&mut self`; hosts sharing a registry
//   across threads put it behind a mutex.

use std::fmt;
use std::path::PathBuf;

use hashbrown::HashMap;
use spellreg_core::engine::SpellEngine;
use spellreg_core::{AFFIX_EXTENSION, DICTIONARY_EXTENSION};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::dictionary::Dictionary;
use crate::search_path::{SearchPaths, is_readable_file};

/// Callback run after every catalog rebuild.
pub type CatalogObserver = Box<dyn FnMut() + Send>;

/// Token returned by [`Registry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Numeric form, for handing across an FFI boundary.
    pub fn into_raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Owns the dictionary catalog and every loaded [`Dictionary`].
pub struct Registry {
    search_paths: SearchPaths,
    engine: Box<dyn SpellEngine>,
    catalog: Option<Catalog>,
    dictionaries: HashMap<String, Dictionary>,
    observers: Vec<(SubscriptionId, CatalogObserver)>,
    next_subscription: u64,
}

impl Registry {
    /// Create a registry over `search_paths` using `engine` to open dictionaries.
    ///
    /// Nothing is scanned or loaded until first asked for.
    pub fn new(search_paths: SearchPaths, engine: impl SpellEngine + 'static) -> Self {
        Self {
            search_paths,
            engine: Box::new(engine),
            catalog: None,
            dictionaries: HashMap::new(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create a registry backed by the Hunspell-format engine.
    #[cfg(feature = "hunspell")]
    pub fn with_hunspell(search_paths: SearchPaths) -> Self {
        Self::new(search_paths, spellreg_hunspell::SpellbookEngine::new())
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    /// The dictionary catalog, scanning the search paths if there is none yet
    /// or `force_reload` is set.
    ///
    /// A rebuild replaces the previous catalog wholesale and then notifies
    /// every subscriber once.
    pub fn catalog(&mut self, force_reload: bool) -> &Catalog {
        if force_reload || self.catalog.is_none() {
            let catalog = Catalog::scan(&self.search_paths);
            info!(
                entries = catalog.len(),
                dirs = self.search_paths.len(),
                "dictionary catalog rebuilt"
            );
            self.catalog = Some(catalog);
            self.notify_catalog_changed();
        }
        self.catalog.get_or_insert_with(Catalog::default)
    }

    /// The dictionary for `language` (e.g. `"en_US"`), loading it on first use.
    ///
    /// Returns `None` for an empty code or when no search directory holds a
    /// readable `<language>.aff` and `<language>.dic`.
    pub fn dictionary(&mut self, language: &str) -> Option<&mut Dictionary> {
        if language.is_empty() {
            return None;
        }
        if self.dictionaries.contains_key(language) {
            debug!(language, "dictionary served from cache");
            return self.dictionaries.get_mut(language);
        }

        let Some((affix, words)) = self.locate(language) else {
            debug!(language, "no dictionary files found");
            return None;
        };

        let dictionary = match self.engine.open(&affix, &words) {
            Ok(handle) => {
                info!(language, path = %words.display(), "dictionary loaded");
                Dictionary::new(language, Some(handle))
            }
            Err(e) => {
                warn!(language, error = %e, "failed to open dictionary");
                Dictionary::degraded(language, e)
            }
        };
        Some(
            self.dictionaries
                .entry(language.to_string())
                .or_insert(dictionary),
        )
    }

    /// Drop every cached dictionary.
    pub fn clear_cache(&mut self) {
        if !self.dictionaries.is_empty() {
            info!(count = self.dictionaries.len(), "clearing dictionary cache");
        }
        self.dictionaries.clear();
    }

    pub fn is_cached(&self, language: &str) -> bool {
        self.dictionaries.contains_key(language)
    }

    /// Languages currently loaded, in no particular order.
    pub fn cached_languages(&self) -> impl Iterator<Item = &str> {
        self.dictionaries.keys().map(String::as_str)
    }

    /// Run `observer` after every catalog rebuild.
    pub fn subscribe(&mut self, observer: impl FnMut() + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn notify_catalog_changed(&mut self) {
        for (_, observer) in &mut self.observers {
            observer();
        }
    }

    /// First search directory holding a readable pair for `language`, as
    /// canonical `(affix, dictionary)` paths.
    fn locate(&self, language: &str) -> Option<(PathBuf, PathBuf)> {
        if language.contains(['/', '\\']) {
            return None;
        }
        self.search_paths.iter().find_map(|dir| {
            let affix = dir.join(format!("{language}.{AFFIX_EXTENSION}"));
            let words = dir.join(format!("{language}.{DICTIONARY_EXTENSION}"));
            if !is_readable_file(&affix) || !is_readable_file(&words) {
                return None;
            }
            Some((
                std::fs::canonicalize(&affix).ok()?,
                std::fs::canonicalize(&words).ok()?,
            ))
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("search_paths", &self.search_paths)
            .field("catalog", &self.catalog.as_ref().map(Catalog::len))
            .field("dictionaries", &self.dictionaries.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
