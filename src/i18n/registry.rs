//! Language name registry: display names for well-known language codes.
//!
//! The registry is informational only. Target codes are opaque to this crate
//! and are never rejected because they are missing here; the translation
//! backend alone decides whether a code is valid.

use std::sync::OnceLock;

/// Display metadata for a known language code.
#[derive(Debug, Clone)]
pub struct LanguageInfo {
    /// Language code as it appears in language list files (e.g., "es", "zh-TW")
    pub code: &'static str,

    /// English name of the language (e.g., "Spanish", "Haitian Creole")
    pub name: &'static str,
}

/// Global language name registry.
pub struct LanguageRegistry {
    languages: Vec<LanguageInfo>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: known_languages(),
        })
    }

    /// Look up a language by code.
    ///
    /// Matching is case-insensitive, so "zh-tw" and "zh-TW" resolve to the
    /// same entry. Returns `None` for codes the registry does not know.
    pub fn lookup(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }
}

/// Languages with known English names.
///
/// Covers the alerting languages commonly requested in the target lists
/// (Washington State top languages) plus a few widely used European and
/// Asian ones.
fn known_languages() -> Vec<LanguageInfo> {
    const LANGUAGES: &[(&str, &str)] = &[
        ("en", "English"),
        ("en-US", "English (US)"),
        ("en-GB", "English (UK)"),
        ("es", "Spanish"),
        ("ar", "Arabic"),
        ("ht", "Haitian Creole"),
        ("vi", "Vietnamese"),
        ("zh", "Chinese"),
        ("zh-CN", "Chinese (Simplified)"),
        ("zh-Hans", "Chinese (Simplified)"),
        ("zh-TW", "Chinese (Traditional)"),
        ("zh-Hant", "Chinese (Traditional)"),
        ("ru", "Russian"),
        ("uk", "Ukrainian"),
        ("so", "Somali"),
        ("prs", "Dari"),
        ("fa", "Persian"),
        ("mh", "Marshallese"),
        ("ko", "Korean"),
        ("pa", "Punjabi"),
        ("hi", "Hindi"),
        ("te", "Telugu"),
        ("tl", "Tagalog"),
        ("am", "Amharic"),
        ("chk", "Chuukese"),
        ("km", "Khmer"),
        ("fr", "French"),
        ("de", "German"),
        ("it", "Italian"),
        ("pt", "Portuguese"),
        ("ja", "Japanese"),
    ];

    LANGUAGES
        .iter()
        .map(|&(code, name)| LanguageInfo { code, name })
        .collect()
}
