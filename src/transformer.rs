//! Text transformation step
//!
//! The worker only knows the `Transformer` trait. The production implementation
//! calls a model-serving endpoint over HTTP; the model itself runs elsewhere.

use crate::config::{parse_or, string_or};
use crate::error::{Result, WorkerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default translation model served by the endpoint
pub const DEFAULT_MODEL: &str = "Helsinki-NLP/opus-mt-ar-en";

/// Default model-serving endpoint
pub const DEFAULT_TRANSFORMER_URL: &str = "http://localhost:8000/translate";

/// Default upper bound on a single translation call
pub const DEFAULT_TRANSFORMER_TIMEOUT: Duration = Duration::from_secs(120);

/// Turns request text into response text
///
/// Called once per valid request. The call may take seconds; the worker
/// does nothing else while it is in flight.
#[async_trait]
pub trait Transformer: Send + Sync {
    async fn transform(&self, text: &str) -> Result<String>;
}

/// Endpoint settings for the HTTP transformer
#[derive(Debug, Clone)]
pub struct TransformerConfig {
    pub url: Url,
    pub model: String,
    pub source_lang: String,
    pub target_lang: String,
    pub timeout: Duration,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_TRANSFORMER_URL).expect("default transformer URL is valid"),
            model: DEFAULT_MODEL.to_string(),
            source_lang: "ar".to_string(),
            target_lang: "en".to_string(),
            timeout: DEFAULT_TRANSFORMER_TIMEOUT,
        }
    }
}

impl TransformerConfig {
    pub(crate) fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = Url::parse(&string_or(lookup, "TRANSFORMER_URL", DEFAULT_TRANSFORMER_URL))?;
        let timeout_secs = parse_or(
            lookup,
            "TRANSFORMER_TIMEOUT_SECS",
            DEFAULT_TRANSFORMER_TIMEOUT.as_secs(),
        )?;

        Ok(Self {
            url,
            model: string_or(lookup, "TRANSLATION_MODEL", DEFAULT_MODEL),
            timeout: Duration::from_secs(timeout_secs),
            ..Self::default()
        })
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: String,
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Transformer that delegates to a model-serving HTTP endpoint
pub struct HttpTransformer {
    client: Client,
    config: TransformerConfig,
}

impl HttpTransformer {
    pub fn new(config: TransformerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WorkerError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        info!(
            "Translator endpoint: {} (model: {}, timeout: {:?})",
            config.url, config.model, config.timeout
        );

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Transformer for HttpTransformer {
    async fn transform(&self, text: &str) -> Result<String> {
        debug!("Translating text: {}", text);

        let body = TranslateRequest {
            text,
            source_lang: &self.config.source_lang,
            target_lang: &self.config.target_lang,
            model: &self.config.model,
        };

        let response = self
            .client
            .post(self.config.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| WorkerError::Transform(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WorkerError::Transform(format!(
                "endpoint returned HTTP {}",
                status.as_u16()
            )));
        }

        let result: TranslateResponse = response
            .json()
            .await
            .map_err(|e| WorkerError::Transform(format!("invalid response body: {}", e)))?;

        if !result.success {
            return Err(WorkerError::Transform(
                result
                    .error
                    .unwrap_or_else(|| "endpoint reported failure".to_string()),
            ));
        }

        debug!("Translation result: {}", result.translated_text);
        Ok(result.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = TranslateRequest {
            text: "مرحبا",
            source_lang: "ar",
            target_lang: "en",
            model: DEFAULT_MODEL,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["text"], "مرحبا");
        assert_eq!(value["target_lang"], "en");
        assert_eq!(value["model"], DEFAULT_MODEL);
    }

    #[test]
    fn test_failure_response_decodes_without_error_field() {
        let result: TranslateResponse =
            serde_json::from_str(r#"{"translated_text":"","success":false}"#).unwrap();
        assert!(!result.success);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let lookup = |key: &str| (key == "TRANSFORMER_URL").then(|| "not a url".to_string());
        let err = TransformerConfig::from_lookup(&lookup).unwrap_err();
        assert!(matches!(err, WorkerError::ConfigError(_)));
    }

    #[tokio::test]
    #[ignore] // Requires the translation endpoint
    async fn test_translate_against_endpoint() {
        dotenvy::dotenv().ok();
        let config = crate::config::ServiceConfig::from_env().unwrap();
        let transformer = HttpTransformer::new(config.transformer).unwrap();
        let text = transformer.transform("مرحبا").await.unwrap();
        assert!(!text.is_empty());
    }
}
