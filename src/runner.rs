//! Batch translation runner.
//!
//! Reads the source text and the target language list once, then translates
//! into each target strictly one after another. Failing to read either input
//! aborts the whole run. A failure inside one job (translation or write) is
//! recorded as that job's outcome and the loop moves on.

use crate::config::RunConfig;
use crate::i18n::{parse_language_list, LanguageId, TranslationValidator};
use crate::output::{write_artifact, OutputTemplate};
use crate::report::RunSummary;
use crate::service::{TranslationJob, TranslationService};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that stop a run before any job executes.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to read input file {}: {}", .path.display(), .source)]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors scoped to a single job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0:#}")]
    TranslationFailed(anyhow::Error),

    #[error("Failed to write {}: {}", .path.display(), .source)]
    ArtifactWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JobError {
    pub fn stage(&self) -> FailureStage {
        match self {
            JobError::TranslationFailed(_) => FailureStage::Translation,
            JobError::ArtifactWriteFailed { .. } => FailureStage::ArtifactWrite,
        }
    }
}

/// Step of a job that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Translation,
    ArtifactWrite,
}

/// Result of one job, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationOutcome {
    Success {
        target_language: LanguageId,
        #[serde(skip_serializing)]
        translated_text: String,
        output_path: PathBuf,
    },
    Failure {
        target_language: LanguageId,
        stage: FailureStage,
        error_description: String,
    },
}

impl TranslationOutcome {
    pub fn target_language(&self) -> &LanguageId {
        match self {
            TranslationOutcome::Success {
                target_language, ..
            }
            | TranslationOutcome::Failure {
                target_language, ..
            } => target_language,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranslationOutcome::Success { .. })
    }

    /// Human-readable status line, one per job.
    pub fn status_line(&self) -> String {
        match self {
            TranslationOutcome::Success {
                target_language,
                output_path,
                ..
            } => format!(
                "Translated to {}: {}",
                target_language,
                output_path.display()
            ),
            TranslationOutcome::Failure {
                target_language,
                error_description,
                ..
            } => format!(
                "Translation to {} failed: {}",
                target_language, error_description
            ),
        }
    }
}

/// Run every job of a batch and return one outcome per target, in list order.
///
/// Returns `Err` only when an input file cannot be read; in that case no job
/// is attempted and nothing is written.
pub async fn run(
    config: &RunConfig,
    service: &dyn TranslationService,
) -> Result<Vec<TranslationOutcome>, RunError> {
    let source_text = read_input(&config.source_text_path).await?;
    let language_list = read_input(&config.language_list_path).await?;
    let targets = parse_language_list(&language_list);

    info!(
        "Translating {} chars from {} into {} target languages using {}",
        source_text.chars().count(),
        config.source_language,
        targets.len(),
        service.name()
    );

    let mut outcomes = Vec::with_capacity(targets.len());

    for target_language in &targets {
        let job = TranslationJob {
            source_text: &source_text,
            source_language: &config.source_language,
            target_language,
        };

        let outcome = match run_job(service, &job, &config.output_template).await {
            Ok((translated_text, output_path)) => TranslationOutcome::Success {
                target_language: target_language.clone(),
                translated_text,
                output_path,
            },
            Err(e) => TranslationOutcome::Failure {
                target_language: target_language.clone(),
                stage: e.stage(),
                error_description: e.to_string(),
            },
        };

        if outcome.is_success() {
            info!("{}", outcome.status_line());
        } else {
            warn!("{}", outcome.status_line());
        }
        outcomes.push(outcome);
    }

    let summary = RunSummary::from_outcomes(&outcomes);
    info!(
        "Run complete: {} succeeded, {} failed, {} total",
        summary.succeeded, summary.failed, summary.total
    );

    Ok(outcomes)
}

/// Translate one job and write its artifact.
async fn run_job(
    service: &dyn TranslationService,
    job: &TranslationJob<'_>,
    template: &OutputTemplate,
) -> Result<(String, PathBuf), JobError> {
    let translated = service
        .translate(job)
        .await
        .map_err(JobError::TranslationFailed)?;

    let validation = TranslationValidator::validate(job.source_text, &translated);
    if validation.has_warnings() {
        warn!(
            "Translation validation warnings for {} ({}): {:?}",
            job.target_language.display_name(),
            job.target_language,
            validation.warnings
        );
    }
    if validation.has_errors() {
        warn!(
            "Translation validation errors for {} ({}): {:?}",
            job.target_language.display_name(),
            job.target_language,
            validation.errors
        );
    }

    let output_path = template.path_for(job.target_language);
    write_artifact(&output_path, &translated)
        .await
        .map_err(|source| JobError::ArtifactWriteFailed {
            path: output_path.clone(),
            source,
        })?;

    Ok((translated, output_path))
}

async fn read_input(path: &Path) -> Result<String, RunError> {
    tokio::fs::read_to_string(path).await.map_err(|source| {
        let err = RunError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        };
        error!("{}", err);
        err
    })
}
