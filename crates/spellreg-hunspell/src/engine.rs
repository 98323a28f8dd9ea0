// spellbook-backed implementation of the engine contract.
//
// The affix and dictionary files are decoded from their declared encoding
// into UTF-8 once at open time. Words arrive in the declared encoding and
// are decoded per call; suggestions are encoded back before they leave.

use std::path::Path;

use encoding_rs::Encoding;
use spellreg_core::engine::{EngineError, EngineHandle, SpellEngine};
use tracing::{debug, warn};

use crate::DEFAULT_ENCODING;
use crate::header::{declared_encoding, with_utf8_directive};

/// Opens Hunspell `.aff`/`.dic` pairs with [`spellbook`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SpellbookEngine;

impl SpellbookEngine {
    pub fn new() -> Self {
        Self
    }
}

impl SpellEngine for SpellbookEngine {
    fn open(
        &self,
        affix_path: &Path,
        dictionary_path: &Path,
    ) -> Result<Box<dyn EngineHandle>, EngineError> {
        let handle = SpellbookHandle::open(affix_path, dictionary_path)?;
        Ok(Box::new(handle))
    }
}

/// One dictionary opened by [`SpellbookEngine`].
pub struct SpellbookHandle {
    dictionary: spellbook::Dictionary,
    /// Encoding name exactly as the affix file declares it.
    encoding_name: String,
    /// Codec for `encoding_name`, or UTF-8 when the name is unknown.
    encoding: &'static Encoding,
}

impl SpellbookHandle {
    /// Read and parse a dictionary pair.
    pub fn open(affix_path: &Path, dictionary_path: &Path) -> Result<Self, EngineError> {
        let affix_bytes = read(affix_path)?;
        let dictionary_bytes = read(dictionary_path)?;

        let encoding_name =
            declared_encoding(&affix_bytes).unwrap_or_else(|| DEFAULT_ENCODING.to_string());
        let encoding = Encoding::for_label(encoding_name.as_bytes()).unwrap_or_else(|| {
            warn!(
                encoding = %encoding_name,
                path = %affix_path.display(),
                "unknown dictionary encoding, reading files as UTF-8"
            );
            encoding_rs::UTF_8
        });

        let (affix, _, affix_malformed) = encoding.decode(&affix_bytes);
        let (words, _, words_malformed) = encoding.decode(&dictionary_bytes);
        if affix_malformed || words_malformed {
            debug!(
                encoding = encoding.name(),
                path = %dictionary_path.display(),
                "dictionary contains bytes invalid in its encoding"
            );
        }

        let affix = with_utf8_directive(&affix);
        let dictionary =
            spellbook::Dictionary::new(&affix, &words).map_err(|e| EngineError::Parse {
                path: dictionary_path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            dictionary,
            encoding_name,
            encoding,
        })
    }

    fn decode(&self, word: &[u8]) -> String {
        let (text, _) = self.encoding.decode_without_bom_handling(word);
        text.into_owned()
    }
}

impl EngineHandle for SpellbookHandle {
    fn declared_encoding(&self) -> Option<&str> {
        Some(&self.encoding_name)
    }

    fn check(&self, word: &[u8]) -> bool {
        let word = self.decode(word);
        self.dictionary.check(&word)
    }

    fn suggest(&self, word: &[u8]) -> Vec<Vec<u8>> {
        let word = self.decode(word);
        let mut suggestions = Vec::new();
        self.dictionary.suggest(&word, &mut suggestions);
        suggestions
            .iter()
            .map(|s| encode_suggestion(self.encoding, s))
            .collect()
    }

    /// Adds the word to spellbook's in-memory word list.
    fn add_session_word(&mut self, word: &[u8]) {
        let word = self.decode(word);
        if word.is_empty() {
            return;
        }
        // A '/' would be read as the start of an affix flag set.
        if word.contains('/') {
            warn!(word = %word, "not adding session word containing '/'");
            return;
        }
        if let Err(e) = self.dictionary.add(&word) {
            warn!(word = %word, error = ?e, "failed to add session word");
        }
    }
}

/// Unrepresentable characters become numeric character references.
fn encode_suggestion(encoding: &'static Encoding, suggestion: &str) -> Vec<u8> {
    let (bytes, _, lossy) = encoding.encode(suggestion);
    if lossy {
        debug!(
            encoding = encoding.name(),
            suggestion,
            "suggestion not representable in dictionary encoding"
        );
    }
    bytes.into_owned()
}

fn read(path: &Path) -> Result<Vec<u8>, EngineError> {
    std::fs::read(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}
