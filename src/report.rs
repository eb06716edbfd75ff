//! Run summary and the optional JSON run report.

use crate::i18n::LanguageId;
use crate::runner::TranslationOutcome;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Outcome counts for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[TranslationOutcome]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }
}

/// Machine-readable record of a run. Translated text is not included.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub source_language: &'a LanguageId,
    pub backend: &'a str,
    pub summary: RunSummary,
    pub outcomes: &'a [TranslationOutcome],
}

impl<'a> RunReport<'a> {
    pub fn new(
        source_language: &'a LanguageId,
        backend: &'a str,
        outcomes: &'a [TranslationOutcome],
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            source_language,
            backend,
            summary: RunSummary::from_outcomes(outcomes),
            outcomes,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run report")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write run report to {}", path.display()))?;
        Ok(())
    }
}
