use crate::service::{TranslationJob, TranslationService};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Translation backend using an OpenAI-compatible chat completions endpoint.
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

/// OpenAI Chat Completion request for translation
#[derive(Debug, Serialize)]
struct TranslationRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Describe a language for the prompt, e.g. "Haitian Creole (ht)".
fn describe_language(language: &crate::i18n::LanguageId) -> String {
    let name = language.display_name();
    if name == language.as_str() {
        format!("the language with code '{}'", name)
    } else {
        format!("{} ({})", name, language.as_str())
    }
}

/// Build the system prompt for translation
fn build_translation_system_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        r#"You are a professional translator. Translate the text provided by the user from {} to {}.

## Translation Rules
- Return only the translated text, with no preamble, notes, or quotation marks
- Preserve line breaks, paragraph structure, and any markdown formatting
- Keep URLs, email addresses, phone numbers, times, and other figures exactly as written
- Keep proper names of people, places, agencies, and products
- Keep the tone and level of urgency of the original"#,
        source_language, target_language
    )
}

impl OpenAiTranslator {
    pub fn new(client: reqwest::Client, api_key: String, model: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            api_url,
        }
    }

    fn build_request(&self, job: &TranslationJob<'_>) -> TranslationRequest {
        let is_reasoning = is_reasoning_model(&self.model);

        TranslationRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: build_translation_system_prompt(
                        &describe_language(job.source_language),
                        &describe_language(job.target_language),
                    ),
                },
                Message {
                    role: "user".to_string(),
                    content: job.source_text.to_string(),
                },
            ],
            // Reasoning models don't support temperature - use reasoning_effort instead
            temperature: if is_reasoning { None } else { Some(0.3) },
            reasoning_effort: if is_reasoning {
                Some("low".to_string())
            } else {
                None
            },
        }
    }
}

#[async_trait]
impl TranslationService for OpenAiTranslator {
    async fn translate(&self, job: &TranslationJob<'_>) -> Result<String> {
        let request = self.build_request(job);

        debug!(
            "Requesting {} -> {} translation from {} ({})",
            job.source_language, job.target_language, self.api_url, self.model
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send translation request to OpenAI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            anyhow::bail!("OpenAI API error during translation ({}): {}", status, body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI translation response")?;

        let translated = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("OpenAI translation response contained no choices")?;

        Ok(translated)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
