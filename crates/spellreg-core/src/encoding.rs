// Dictionary text encoding resolution.
//
// Hunspell-format dictionaries declare their encoding in the affix file
// (`SET ISO8859-1` and friends). Words are converted to that encoding before
// they reach the engine and suggestions are converted back. When the declared
// name is missing or unknown we fall back to the host locale's codeset, which
// is frequently wrong; the fallback is recorded so callers can tell.

use std::borrow::Cow;

use encoding_rs::Encoding;
use tracing::debug;

/// Locale variables consulted for the fallback codeset, highest precedence first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// How a [`ResolvedEncoding`] was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingSource {
    /// The engine's declared encoding name matched a known codec.
    Declared,
    /// The declared name was absent or unknown; the locale codeset was used.
    LocaleFallback,
}

/// The codec used to talk to one dictionary, fixed at construction.
#[derive(Debug, Clone)]
pub struct ResolvedEncoding {
    encoding: &'static Encoding,
    source: EncodingSource,
    declared: Option<String>,
}

impl ResolvedEncoding {
    /// Resolve `declared` against the codec table, falling back to the
    /// process locale.
    pub fn resolve(declared: Option<&str>) -> Self {
        Self::resolve_with_locale(declared, locale_codeset().as_deref())
    }

    /// Like [`ResolvedEncoding::resolve`] with an explicit locale codeset
    /// (`None` meaning the locale has none).
    pub fn resolve_with_locale(declared: Option<&str>, locale_codeset: Option<&str>) -> Self {
        let declared = declared.map(str::trim).filter(|name| !name.is_empty());
        if let Some(encoding) = declared.and_then(|name| Encoding::for_label(name.as_bytes())) {
            return Self {
                encoding,
                source: EncodingSource::Declared,
                declared: declared.map(str::to_string),
            };
        }

        let encoding = locale_codeset
            .and_then(|codeset| Encoding::for_label(codeset.as_bytes()))
            .unwrap_or(encoding_rs::UTF_8);
        Self {
            encoding,
            source: EncodingSource::LocaleFallback,
            declared: declared.map(str::to_string),
        }
    }

    /// The codec itself.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Canonical name of the codec (e.g. `"windows-1252"`).
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn source(&self) -> EncodingSource {
        self.source
    }

    /// `true` when the codec is a locale guess rather than the declared one.
    pub fn is_guessed(&self) -> bool {
        self.source == EncodingSource::LocaleFallback
    }

    /// The name the engine declared, verbatim, if any.
    pub fn declared_name(&self) -> Option<&str> {
        self.declared.as_deref()
    }

    /// Convert `text` to the dictionary encoding.
    ///
    /// Unmappable characters are replaced by the codec (as numeric character
    /// references); the result is still handed to the engine.
    pub fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let (bytes, _, lossy) = self.encoding.encode(text);
        if lossy {
            debug!(encoding = self.name(), text, "word not representable in dictionary encoding");
        }
        bytes
    }

    /// Convert engine output back to a Rust string, replacing malformed sequences.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, _) = self.encoding.decode_without_bom_handling(bytes);
        text
    }
}

/// Codeset of the current process locale, from `LC_ALL`, `LC_CTYPE` or `LANG`.
pub fn locale_codeset() -> Option<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| codeset_of(&locale).map(str::to_string))
}

/// Extract the codeset from a POSIX locale name (`en_US.UTF-8@euro` -> `UTF-8`).
pub fn codeset_of(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    let codeset = rest.split('@').next().unwrap_or(rest);
    if codeset.is_empty() { None } else { Some(codeset) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_utf8_is_used() {
        let enc = ResolvedEncoding::resolve_with_locale(Some("UTF-8"), Some("ISO-8859-1"));
        assert_eq!(enc.encoding(), encoding_rs::UTF_8);
        assert_eq!(enc.source(), EncodingSource::Declared);
        assert!(!enc.is_guessed());
        assert_eq!(enc.declared_name(), Some("UTF-8"));
    }

    #[test]
    fn hunspell_latin1_name_is_recognized() {
        let enc = ResolvedEncoding::resolve_with_locale(Some("ISO8859-1"), None);
        assert_eq!(enc.encoding(), encoding_rs::WINDOWS_1252);
        assert_eq!(enc.source(), EncodingSource::Declared);
    }

    #[test]
    fn hunspell_latin9_name_is_recognized() {
        let enc = ResolvedEncoding::resolve_with_locale(Some("ISO8859-15"), None);
        assert_eq!(enc.encoding(), encoding_rs::ISO_8859_15);
    }

    #[test]
    fn unknown_name_falls_back_to_locale() {
        let enc = ResolvedEncoding::resolve_with_locale(Some("x-klingon"), Some("KOI8-R"));
        assert_eq!(enc.encoding(), encoding_rs::KOI8_R);
        assert_eq!(enc.source(), EncodingSource::LocaleFallback);
        assert!(enc.is_guessed());
        assert_eq!(enc.declared_name(), Some("x-klingon"));
    }

    #[test]
    fn missing_name_falls_back_to_locale() {
        let enc = ResolvedEncoding::resolve_with_locale(None, Some("UTF-8"));
        assert_eq!(enc.encoding(), encoding_rs::UTF_8);
        assert!(enc.is_guessed());
        assert_eq!(enc.declared_name(), None);
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let enc = ResolvedEncoding::resolve_with_locale(Some("  "), None);
        assert!(enc.is_guessed());
        assert_eq!(enc.declared_name(), None);
    }

    #[test]
    fn no_usable_locale_means_utf8() {
        let enc = ResolvedEncoding::resolve_with_locale(None, None);
        assert_eq!(enc.encoding(), encoding_rs::UTF_8);
        let enc = ResolvedEncoding::resolve_with_locale(None, Some("nonsense"));
        assert_eq!(enc.encoding(), encoding_rs::UTF_8);
    }

    #[test]
    fn latin1_encode_and_decode() {
        let enc = ResolvedEncoding::resolve_with_locale(Some("ISO8859-1"), None);
        assert_eq!(enc.encode("café").as_ref(), b"caf\xe9");
        assert_eq!(enc.decode(b"na\xefve"), "naïve");
    }

    #[test]
    fn unmappable_characters_are_replaced_not_rejected() {
        let enc = ResolvedEncoding::resolve_with_locale(Some("ISO8859-1"), None);
        let bytes = enc.encode("a\u{3b1}b");
        assert_eq!(bytes.as_ref(), b"a&#945;b");
    }

    #[test]
    fn codeset_parsing() {
        assert_eq!(codeset_of("en_US.UTF-8"), Some("UTF-8"));
        assert_eq!(codeset_of("de_DE.ISO-8859-15@euro"), Some("ISO-8859-15"));
        assert_eq!(codeset_of("C"), None);
        assert_eq!(codeset_of("fr_FR."), None);
    }
}
