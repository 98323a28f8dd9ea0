// Spelling engine contract.
//
// The registry and dictionaries never talk to a concrete checker directly;
// they go through these two traits. Words cross the boundary as bytes in
// the engine's own declared encoding, the way Hunspell-style engines expect.

use std::path::{Path, PathBuf};

/// Error raised when an engine cannot open an affix/dictionary pair.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// One of the files could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The files were read but the engine rejected their contents.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Factory for engine handles.
///
/// Implementations must be cheap to hold; the registry keeps one for its
/// whole lifetime and calls `open` once per language it loads.
pub trait SpellEngine: Send {
    /// Open the dictionary formed by `affix_path` and `dictionary_path`.
    ///
    /// Both paths are canonical and were readable when the registry checked
    /// them. Closing the handle is done by dropping it.
    fn open(
        &self,
        affix_path: &Path,
        dictionary_path: &Path,
    ) -> Result<Box<dyn EngineHandle>, EngineError>;
}

/// One opened dictionary inside an engine.
pub trait EngineHandle: Send {
    /// Name of the encoding the engine expects words in, as declared by the
    /// dictionary (e.g. `"UTF-8"`, `"ISO8859-1"`).
    fn declared_encoding(&self) -> Option<&str>;

    /// Check an encoded word.
    fn check(&self, word: &[u8]) -> bool;

    /// Ranked correction candidates for an encoded word, best first.
    ///
    /// Ownership of the list moves to the caller, which must hand it back
    /// through [`EngineHandle::release_suggestions`].
    fn suggest(&self, word: &[u8]) -> Vec<Vec<u8>>;

    /// Return a list obtained from [`EngineHandle::suggest`].
    fn release_suggestions(&self, suggestions: Vec<Vec<u8>>) {
        drop(suggestions);
    }

    /// Accept an encoded word for the rest of this handle's lifetime.
    fn add_session_word(&mut self, word: &[u8]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_path() {
        let err = EngineError::Io {
            path: PathBuf::from("/dicts/en_US.aff"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/dicts/en_US.aff"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn parse_error_mentions_message() {
        let err = EngineError::Parse {
            path: PathBuf::from("de_DE.dic"),
            message: "bad flag".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse de_DE.dic: bad flag");
    }
}
