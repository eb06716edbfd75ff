use crate::service::{TranslationJob, TranslationService};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Translation backend using the DeepL REST API (`/v2/translate`).
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

#[derive(Debug, Serialize)]
struct DeepLRequest<'a> {
    text: Vec<&'a str>,
    source_lang: String,
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

/// DeepL target codes are upper-case and may carry a variant ("EN-US", "PT-BR").
fn deepl_target_code(code: &str) -> String {
    code.to_uppercase()
}

/// DeepL source codes are bare languages ("EN", not "EN-US").
fn deepl_source_code(code: &str) -> String {
    code.split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_uppercase()
}

impl DeepLTranslator {
    pub fn new(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/translate", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TranslationService for DeepLTranslator {
    async fn translate(&self, job: &TranslationJob<'_>) -> Result<String> {
        let request = DeepLRequest {
            text: vec![job.source_text],
            source_lang: deepl_source_code(job.source_language.as_str()),
            target_lang: deepl_target_code(job.target_language.as_str()),
        };

        debug!(
            "Requesting {} -> {} translation from DeepL",
            request.source_lang, request.target_lang
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to send translation request to DeepL API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            anyhow::bail!("DeepL API error during translation ({}): {}", status, body);
        }

        let deepl_response: DeepLResponse = response
            .json()
            .await
            .context("Failed to parse DeepL translation response")?;

        let translated = deepl_response
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .context("DeepL translation response contained no translations")?;

        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "deepl"
    }
}
