//! Language handling for batch translation.
//!
//! # Architecture
//!
//! - `language`: opaque `LanguageId` and language list parsing
//! - `registry`: display names for well-known codes (informational only)
//! - `validator`: advisory checks on translated text
//!
//! # Example
//!
//! ```rust,ignore
//! use batch_translate::i18n::{parse_language_list, LanguageId};
//!
//! let targets = parse_language_list("fr\nes\n");
//! assert_eq!(targets[1], LanguageId::new("es"));
//! assert_eq!(targets[1].display_name(), "Spanish");
//! ```

mod language;
mod registry;
mod validator;

pub use language::{parse_language_list, LanguageId};
pub use registry::{LanguageInfo, LanguageRegistry};
pub use validator::{TranslationValidator, ValidationReport};
