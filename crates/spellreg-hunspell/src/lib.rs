//! Hunspell-format spelling engine for spellreg.
//!
//! Dictionaries are `.aff`/`.dic` pairs as shipped by LibreOffice, Firefox and
//! most Linux distributions. Checking and suggestion generation are delegated
//! to [`spellbook`]; this crate adapts it to the byte-oriented
//! [`spellreg_core::engine`] contract:
//!
//! - [`header`] -- Affix file header directives (`SET`)
//! - [`engine`] -- [`SpellbookEngine`] and its per-dictionary handle

pub mod engine;
pub mod header;

pub use engine::{SpellbookEngine, SpellbookHandle};

/// Encoding Hunspell assumes when an affix file has no `SET` directive.
pub const DEFAULT_ENCODING: &str = "ISO8859-1";
