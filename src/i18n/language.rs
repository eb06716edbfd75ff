//! Language identifiers and language list parsing.
//!
//! A `LanguageId` is an opaque tag (e.g., "fr", "zh-TW"). Nothing here decides
//! whether a tag is valid; that is left to the translation backend.

use crate::i18n::LanguageRegistry;
use serde::Serialize;
use std::fmt;

/// An opaque language or locale identifier.
///
/// Equality is plain string equality: "fr" and "FR" are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageId(String);

impl LanguageId {
    /// Wrap a raw code without any validation or normalization.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw code exactly as it was read.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// English display name for prompts and logs.
    ///
    /// Falls back to the raw code when the registry does not know it.
    pub fn display_name(&self) -> &str {
        LanguageRegistry::get()
            .lookup(&self.0)
            .map(|info| info.name)
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split language list content into target ids, one per line.
///
/// Order and duplicates are preserved. Empty segments (blank lines and the one
/// after a trailing newline) are skipped. Everything else is passed through
/// raw, including surrounding whitespace or a trailing `\r`.
pub fn parse_language_list(content: &str) -> Vec<LanguageId> {
    content
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(LanguageId::new)
        .collect()
}
