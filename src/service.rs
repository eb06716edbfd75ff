//! The translation capability the runner fans out to.

use crate::config::BackendConfig;
use crate::deepl::DeepLTranslator;
use crate::i18n::LanguageId;
use crate::openai::OpenAiTranslator;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// One translation request: a shared source text into one target language.
#[derive(Debug, Clone, Copy)]
pub struct TranslationJob<'a> {
    pub source_text: &'a str,
    pub source_language: &'a LanguageId,
    pub target_language: &'a LanguageId,
}

/// A backend that turns a job into translated text.
///
/// Any error is treated as a failure of that one job. Implementations should
/// not retry on their own.
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, job: &TranslationJob<'_>) -> Result<String>;

    /// Short backend name for logs and reports
    fn name(&self) -> &'static str;
}

/// Build the configured backend with a shared HTTP client.
pub fn build_service(
    backend: &BackendConfig,
    http_timeout: Duration,
) -> Result<Box<dyn TranslationService>> {
    let client = reqwest::Client::builder()
        .timeout(http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let service: Box<dyn TranslationService> = match backend {
        BackendConfig::OpenAi {
            api_key,
            model,
            api_url,
        } => Box::new(OpenAiTranslator::new(
            client,
            api_key.clone(),
            model.clone(),
            api_url.clone(),
        )),
        BackendConfig::DeepL { api_key, api_url } => Box::new(DeepLTranslator::new(
            client,
            api_key.clone(),
            api_url.clone(),
        )),
    };

    Ok(service)
}
