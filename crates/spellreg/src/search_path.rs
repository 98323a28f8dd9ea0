// Ordered list of directories searched for dictionaries.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Environment variable holding a path list of dictionary directories.
pub const DICT_PATH_ENV: &str = "SPELLREG_DICT_PATH";

/// Directories to scan, in priority order.
///
/// Order matters: the first directory holding a usable pair for a language
/// wins, and catalog entries are listed directory by directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a platform path list (`:`-separated on Unix, `;` on Windows).
    ///
    /// Empty components are dropped.
    pub fn from_path_list(list: impl AsRef<OsStr>) -> Self {
        std::env::split_paths(list.as_ref())
            .filter(|p| !p.as_os_str().is_empty())
            .collect()
    }

    /// Directories listed in `SPELLREG_DICT_PATH`, or none if it is unset.
    pub fn from_env() -> Self {
        std::env::var_os(DICT_PATH_ENV)
            .map(Self::from_path_list)
            .unwrap_or_default()
    }

    /// The usual places Hunspell dictionaries are installed.
    ///
    /// Search order:
    /// 1. `SPELLREG_DICT_PATH` entries
    /// 2. `~/.local/share/hunspell` (and `~/Library/Spelling` on macOS)
    /// 3. `/usr/share/hunspell`, `/usr/share/myspell`, `/usr/share/myspell/dicts`
    pub fn system_default() -> Self {
        let mut paths = Self::from_env();

        if let Some(home) = home_dir() {
            paths.push(home.join(".local").join("share").join("hunspell"));
            #[cfg(target_os = "macos")]
            paths.push(home.join("Library").join("Spelling"));
        }

        paths.push("/usr/share/hunspell");
        paths.push("/usr/share/myspell");
        paths.push("/usr/share/myspell/dicts");
        paths
    }

    /// Append a directory with the lowest priority so far.
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    /// Insert a directory ahead of all others.
    pub fn prepend(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.insert(0, dir.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for SearchPaths {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            dirs: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SearchPaths {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}

/// `true` for an existing regular file that can be opened for reading.
pub(crate) fn is_readable_file(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_list_keeps_order() {
        let list = std::env::join_paths(["/a", "/b", "/c"]).unwrap();
        let paths = SearchPaths::from_path_list(&list);
        let dirs: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
        assert_eq!(dirs, [Path::new("/a"), Path::new("/b"), Path::new("/c")]);
    }

    #[cfg(unix)]
    #[test]
    fn path_list_drops_empty_components() {
        let paths = SearchPaths::from_path_list("/a::/b:");
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn empty_path_list() {
        assert!(SearchPaths::from_path_list("").is_empty());
    }

    #[test]
    fn prepend_takes_priority() {
        let mut paths: SearchPaths = ["/sys"].into_iter().collect();
        paths.push("/late");
        paths.prepend("/user");
        assert_eq!(
            paths.as_slice(),
            [PathBuf::from("/user"), PathBuf::from("/sys"), PathBuf::from("/late")]
        );
    }

    #[test]
    fn system_default_ends_with_system_dirs() {
        let paths = SearchPaths::system_default();
        assert_eq!(
            paths.as_slice().last().map(PathBuf::as_path),
            Some(Path::new("/usr/share/myspell/dicts"))
        );
    }

    #[test]
    fn directories_are_not_readable_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_readable_file(dir.path()));
        let file = dir.path().join("x.dic");
        std::fs::write(&file, "0\n").unwrap();
        assert!(is_readable_file(&file));
        assert!(!is_readable_file(&dir.path().join("missing.dic")));
    }
}
