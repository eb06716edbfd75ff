//! Translation sanity checks.
//!
//! Translated alert text must keep the things a reader acts on: links and
//! figures (times, phone numbers, road numbers). These checks are advisory.
//! Findings are logged by the runner and never turn a translation into a
//! failure.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that almost certainly mean the translation is unusable
    pub errors: Vec<String>,

    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation quality.
pub struct TranslationValidator;

static URL_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Sources shorter than this are allowed to come back unchanged ("OK", "Wi-Fi").
const MIN_UNCHANGED_CHECK_LEN: usize = 20;

impl TranslationValidator {
    /// Validate a translation against its source text.
    ///
    /// Reports an error when the translation is blank, and warnings when:
    /// - URLs differ between source and translation
    /// - a number from the source is missing in the translation
    /// - a non-trivial source came back unchanged
    pub fn validate(original: &str, translated: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        if translated.trim().is_empty() {
            if !original.trim().is_empty() {
                report
                    .errors
                    .push("Translation is empty but the source text is not".to_string());
            }
            return report;
        }

        let orig_urls = Self::extract_urls(original);
        let trans_urls = Self::extract_urls(translated);
        if orig_urls != trans_urls {
            report.warnings.push(format!(
                "URL mismatch: original has {:?}, translation has {:?}",
                orig_urls, trans_urls
            ));
        }

        let trans_numbers = Self::extract_numbers(translated);
        let missing: Vec<String> = Self::extract_numbers(original)
            .difference(&trans_numbers)
            .cloned()
            .collect();
        if !missing.is_empty() {
            report.warnings.push(format!(
                "Numbers missing from translation: {:?}",
                missing
            ));
        }

        if original.trim().chars().count() >= MIN_UNCHANGED_CHECK_LEN
            && original.trim() == translated.trim()
        {
            report
                .warnings
                .push("Translation is identical to the source text".to_string());
        }

        report
    }

    /// Extract all URLs from text
    fn extract_urls(text: &str) -> Vec<String> {
        let regex = URL_REGEX.get_or_init(|| Regex::new(r"https?://[^\s)\]]+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(['.', ',', ';']).to_string())
            .collect()
    }

    /// Extract ASCII-digit numbers, with grouping and decimal separators removed.
    ///
    /// "1,000" and "1.000" both normalize to "1000", so locale-specific
    /// separators do not produce false warnings.
    fn extract_numbers(text: &str) -> BTreeSet<String> {
        let regex = NUMBER_REGEX.get_or_init(|| Regex::new(r"[0-9]+(?:[.,:][0-9]+)*").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().chars().filter(char::is_ascii_digit).collect())
            .collect()
    }
}
