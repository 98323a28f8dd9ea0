// A loaded dictionary: one engine handle plus the codec used to talk to it.
//
// A dictionary whose engine failed to open is still a valid value. It has
// no handle, answers every query negatively, and keeps the open error for
// inspection.

use std::fmt;

use spellreg_core::encoding::ResolvedEncoding;
use spellreg_core::engine::{EngineError, EngineHandle};
use tracing::warn;

/// Spell-check access to one language.
///
/// The handle is dropped exactly once, together with the dictionary.
pub struct Dictionary {
    language: String,
    handle: Option<Box<dyn EngineHandle>>,
    encoding: ResolvedEncoding,
    load_error: Option<EngineError>,
}

impl Dictionary {
    /// Wrap an engine handle (or its absence) for `language`.
    ///
    /// The encoding is resolved here, once: the handle's declared name if it
    /// is a known codec, otherwise the locale's.
    pub fn new(language: impl Into<String>, handle: Option<Box<dyn EngineHandle>>) -> Self {
        let language = language.into();
        let declared = handle.as_deref().and_then(|h| h.declared_encoding());
        let encoding = ResolvedEncoding::resolve(declared);
        if handle.is_some() && encoding.is_guessed() {
            warn!(
                language = %language,
                declared = ?encoding.declared_name(),
                fallback = encoding.name(),
                "dictionary encoding not recognized, guessing from locale"
            );
        }
        Self {
            language,
            handle,
            encoding,
            load_error: None,
        }
    }

    /// A dictionary whose engine could not be opened.
    pub fn degraded(language: impl Into<String>, error: EngineError) -> Self {
        Self {
            load_error: Some(error),
            ..Self::new(language, None)
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The codec words are converted with, and whether it was guessed.
    pub fn encoding(&self) -> &ResolvedEncoding {
        &self.encoding
    }

    /// `false` when the engine failed to open this dictionary.
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Why the engine failed to open, for a degraded dictionary.
    pub fn load_error(&self) -> Option<&EngineError> {
        self.load_error.as_ref()
    }

    /// Whether `word` is spelled correctly (or was ignored this session).
    pub fn is_word_correct(&self, word: &str) -> bool {
        let Some(handle) = self.handle.as_deref() else {
            return false;
        };
        handle.check(&self.encoding.encode(word))
    }

    /// Ranked corrections for `word`, best first, in the engine's order.
    pub fn suggestions_for_word(&self, word: &str) -> Vec<String> {
        let Some(handle) = self.handle.as_deref() else {
            return Vec::new();
        };
        let list = SuggestionList::new(handle, handle.suggest(&self.encoding.encode(word)));
        list.iter()
            .map(|s| self.encoding.decode(s).into_owned())
            .collect()
    }

    /// Accept `word` until this dictionary is dropped. Nothing is persisted.
    pub fn ignore_word(&mut self, word: &str) {
        if let Some(handle) = self.handle.as_deref_mut() {
            handle.add_session_word(&self.encoding.encode(word));
        }
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dictionary")
            .field("language", &self.language)
            .field("loaded", &self.is_loaded())
            .field("encoding", &self.encoding.name())
            .field("encoding_source", &self.encoding.source())
            .finish()
    }
}

/// Engine-owned suggestion list, handed back to the engine when dropped.
struct SuggestionList<'h> {
    handle: &'h dyn EngineHandle,
    items: Option<Vec<Vec<u8>>>,
}

impl<'h> SuggestionList<'h> {
    fn new(handle: &'h dyn EngineHandle, items: Vec<Vec<u8>>) -> Self {
        Self {
            handle,
            items: Some(items),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.items.iter().flatten().map(Vec::as_slice)
    }
}

impl Drop for SuggestionList<'_> {
    fn drop(&mut self) {
        if let Some(items) = self.items.take() {
            self.handle.release_suggestions(items);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use spellreg_core::encoding::EncodingSource;

    use super::*;

    /// Latin-1 engine over a fixed word list. Suggests every known word
    /// sharing the query's first byte, in list order.
    struct ListHandle {
        encoding: Option<&'static str>,
        words: Vec<Vec<u8>>,
        session: Vec<Vec<u8>>,
        released: Arc<AtomicUsize>,
        dropped: Arc<AtomicUsize>,
    }

    impl ListHandle {
        fn boxed(
            encoding: Option<&'static str>,
            words: &[&[u8]],
        ) -> (Box<dyn EngineHandle>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let released = Arc::new(AtomicUsize::new(0));
            let dropped = Arc::new(AtomicUsize::new(0));
            let handle: Box<dyn EngineHandle> = Box::new(Self {
                encoding,
                words: words.iter().map(|w| w.to_vec()).collect(),
                session: Vec::new(),
                released: Arc::clone(&released),
                dropped: Arc::clone(&dropped),
            });
            (handle, released, dropped)
        }
    }

    impl EngineHandle for ListHandle {
        fn declared_encoding(&self) -> Option<&str> {
            self.encoding
        }

        fn check(&self, word: &[u8]) -> bool {
            self.words.iter().chain(&self.session).any(|w| w.as_slice() == word)
        }

        fn suggest(&self, word: &[u8]) -> Vec<Vec<u8>> {
            self.words
                .iter()
                .filter(|w| w.first().is_some() && w.first() == word.first())
                .cloned()
                .collect()
        }

        fn release_suggestions(&self, suggestions: Vec<Vec<u8>>) {
            self.released.fetch_add(1, Ordering::SeqCst);
            drop(suggestions);
        }

        fn add_session_word(&mut self, word: &[u8]) {
            self.session.push(word.to_vec());
        }
    }

    impl Drop for ListHandle {
        fn drop(&mut self) {
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn declared_encoding_is_used_for_queries() {
        let (handle, _, _) = ListHandle::boxed(Some("ISO8859-1"), &[b"caf\xe9", b"the"]);
        let dict = Dictionary::new("fr_FR", Some(handle));

        assert_eq!(dict.encoding().source(), EncodingSource::Declared);
        assert_eq!(dict.encoding().name(), "windows-1252");
        assert!(dict.is_word_correct("café"));
        assert!(dict.is_word_correct("the"));
        assert!(!dict.is_word_correct("xqzzyplm"));
    }

    #[test]
    fn unknown_encoding_is_flagged_as_guess() {
        let (handle, _, _) = ListHandle::boxed(Some("x-unknown"), &[b"the"]);
        let dict = Dictionary::new("xx", Some(handle));
        assert!(dict.encoding().is_guessed());
        assert_eq!(dict.encoding().declared_name(), Some("x-unknown"));
        assert!(dict.is_word_correct("the"));
    }

    #[test]
    fn suggestions_keep_engine_order_and_are_decoded() {
        let (handle, released, _) =
            ListHandle::boxed(Some("ISO8859-1"), &[b"cz", b"caf\xe9", b"ca", b"dog"]);
        let dict = Dictionary::new("fr_FR", Some(handle));

        let first = dict.suggestions_for_word("cafe");
        assert_eq!(first, ["cz", "café", "ca"]);
        assert_eq!(dict.suggestions_for_word("cafe"), first);
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_suggestion_list_is_still_released() {
        let (handle, released, _) = ListHandle::boxed(Some("UTF-8"), &[b"the"]);
        let dict = Dictionary::new("en_US", Some(handle));
        assert!(dict.suggestions_for_word("zzz").is_empty());
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ignored_word_becomes_correct() {
        let (handle, _, _) = ListHandle::boxed(Some("ISO8859-1"), &[b"the"]);
        let mut dict = Dictionary::new("en_US", Some(handle));
        assert!(!dict.is_word_correct("naïve"));
        dict.ignore_word("naïve");
        assert!(dict.is_word_correct("naïve"));
        assert!(!dict.is_word_correct("naive"));
    }

    #[test]
    fn handle_dropped_exactly_once() {
        let (handle, _, dropped) = ListHandle::boxed(Some("UTF-8"), &[b"the"]);
        let dict = Dictionary::new("en_US", Some(handle));
        assert_eq!(dropped.load(Ordering::SeqCst), 0);
        drop(dict);
        assert_eq!(dropped.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn degraded_dictionary_is_safe() {
        let error = EngineError::Parse {
            path: "en_US.dic".into(),
            message: "broken".to_string(),
        };
        let mut dict = Dictionary::degraded("en_US", error);

        assert!(!dict.is_loaded());
        assert!(dict.load_error().is_some());
        assert!(dict.encoding().is_guessed());
        assert!(!dict.is_word_correct("the"));
        assert!(dict.suggestions_for_word("teh").is_empty());
        dict.ignore_word("the");
        assert!(!dict.is_word_correct("the"));
        assert_eq!(dict.language(), "en_US");
    }

    #[test]
    fn debug_output_names_language() {
        let dict = Dictionary::new("sv_SE", None);
        let text = format!("{dict:?}");
        assert!(text.contains("sv_SE"));
        assert!(text.contains("loaded: false"));
    }
}
