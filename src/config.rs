use crate::i18n::LanguageId;
use crate::output::OutputTemplate;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEEPL_FREE_API_URL: &str = "https://api-free.deepl.com";
const DEEPL_PRO_API_URL: &str = "https://api.deepl.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub run: RunConfig,
    pub backend: BackendConfig,
    pub http_timeout: Duration,
}

/// Inputs of a single batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_text_path: PathBuf,
    pub language_list_path: PathBuf,
    pub source_language: LanguageId,
    pub output_template: OutputTemplate,
    /// Optional JSON report written after the loop completes
    pub report_path: Option<PathBuf>,
}

/// Which translation backend to call, with its credentials.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    OpenAi {
        api_key: String,
        model: String,
        api_url: String,
    },
    DeepL {
        api_key: String,
        api_url: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let output_template = OutputTemplate::parse(&env_or(
            "OUTPUT_PATH_TEMPLATE",
            "output_{code}.txt",
        ))
        .context("Invalid OUTPUT_PATH_TEMPLATE")?;

        let run = RunConfig {
            source_text_path: env_or("SOURCE_TEXT_FILE", "input.txt").into(),
            language_list_path: env_or("LANGUAGE_LIST_FILE", "target_languages.txt").into(),
            source_language: LanguageId::new(env_or("SOURCE_LANGUAGE", "en")),
            output_template,
            report_path: std::env::var("REPORT_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        };

        let backend = match env_or("TRANSLATION_BACKEND", "openai").to_lowercase().as_str() {
            "openai" => BackendConfig::OpenAi {
                api_key: std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?,
                model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
                api_url: env_or("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            },
            "deepl" => {
                let api_key = std::env::var("DEEPL_API_KEY").context("DEEPL_API_KEY not set")?;
                let api_url = std::env::var("DEEPL_API_URL")
                    .unwrap_or_else(|_| default_deepl_api_url(&api_key).to_string());
                BackendConfig::DeepL { api_key, api_url }
            }
            other => bail!(
                "Unknown TRANSLATION_BACKEND '{}'. Expected 'openai' or 'deepl'",
                other
            ),
        };

        let http_timeout_secs: u64 = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be a whole number, got '{}'", v))?,
            Err(_) => 60,
        };
        if http_timeout_secs == 0 {
            bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }

        Ok(Self {
            run,
            backend,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// DeepL free-tier keys end in ":fx" and are only accepted by the free endpoint.
fn default_deepl_api_url(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        DEEPL_FREE_API_URL
    } else {
        DEEPL_PRO_API_URL
    }
}
