//! Shared types for spellreg.
//!
//! - [`engine`] -- The narrow contract every spelling engine backend implements
//! - [`encoding`] -- Resolution of a dictionary's text encoding, with locale fallback

pub mod encoding;
pub mod engine;

pub use encoding::{EncodingSource, ResolvedEncoding};
pub use engine::{EngineError, EngineHandle, SpellEngine};

/// File extension of the affix (rule) half of a dictionary pair.
pub const AFFIX_EXTENSION: &str = "aff";

/// File extension of the word-data half of a dictionary pair.
pub const DICTIONARY_EXTENSION: &str = "dic";
