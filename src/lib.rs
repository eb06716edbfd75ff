//! Batch translation: one source text, many target languages, one output
//! file per language.

pub mod config;
pub mod deepl;
pub mod i18n;
pub mod openai;
pub mod output;
pub mod report;
pub mod runner;
pub mod service;
