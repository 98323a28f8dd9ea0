// Catalog of installed dictionaries.
//
// Built by scanning every search directory for `<name>.dic` files that have a
// readable `<name>.aff` next to them. The same name may appear more than once
// when several directories ship it; all occurrences are kept and callers
// decide which one they mean.

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use spellreg_core::{AFFIX_EXTENSION, DICTIONARY_EXTENSION};
use tracing::debug;

use crate::search_path::{SearchPaths, is_readable_file};

/// One discovered dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CatalogEntry {
    /// Canonical path of the `.dic` file.
    pub path: PathBuf,
    /// File name without its extension, usually the language code.
    pub name: String,
}

/// Snapshot of the dictionaries found in a set of search directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Scan `search_paths` in order.
    ///
    /// Directories that do not exist or cannot be listed contribute nothing.
    pub fn scan(search_paths: &SearchPaths) -> Self {
        let entries = search_paths
            .iter()
            .flat_map(|dir| scan_directory(dir))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct display names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Every path registered under `name`, in discovery order.
    pub fn paths_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Path> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.name == name)
            .map(|e| e.path.as_path())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Entries contributed by a single directory, ordered by file name ignoring case.
fn scan_directory(dir: &Path) -> Vec<CatalogEntry> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "skipping dictionary directory");
            return Vec::new();
        }
    };

    let mut dic_files: Vec<PathBuf> = read_dir
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| has_dictionary_extension(path))
        .filter(|path| is_readable_file(path))
        .collect();
    dic_files.sort_by(|a, b| compare_file_names(a, b));

    dic_files
        .into_iter()
        .filter_map(|dic| {
            let name = dic.file_stem()?.to_string_lossy().into_owned();
            if !is_readable_file(&dic.with_extension(AFFIX_EXTENSION)) {
                debug!(path = %dic.display(), "no affix file next to dictionary");
                return None;
            }
            let path = std::fs::canonicalize(&dic).ok()?;
            Some(CatalogEntry { path, name })
        })
        .collect()
}

/// `.dic` in any letter case. The affix file is still looked up as `.aff`.
fn has_dictionary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DICTIONARY_EXTENSION))
}

fn compare_file_names(a: &Path, b: &Path) -> Ordering {
    let key = |p: &Path| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    };
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}
