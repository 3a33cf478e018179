//! Anthropic Claude backend — Messages REST API.
//!
//! Speaks `POST /v1/messages` directly over reqwest with the `x-api-key`
//! and `anthropic-version` headers; no vendor SDK. The prompt is sent as a
//! single user message.

use async_trait::async_trait;

use crate::config::GenerationSettings;
use crate::pipeline::validate::sanitize_api_key;
use crate::provider::{BackendError, TextProvider};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value required by the Messages API.
const API_VERSION: &str = "2023-06-01";

// ---------------------------------------------------------------------------
// AnthropicProvider
// ---------------------------------------------------------------------------

/// Wraps the Anthropic Messages API plus its ordered model fallback list.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Display name used in error messages and diagnostics.
    pub const NAME: &'static str = "Anthropic Claude";

    /// Build a provider from an API key and an ordered model list.
    ///
    /// The key is sanitized (stray quotes stripped, trimmed) and the HTTP
    /// client carries the per-request timeout from `generation`; a default
    /// client is the last-resort fallback if the builder fails.
    pub fn new(api_key: &str, models: Vec<String>, generation: &GenerationSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(generation.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key: sanitize_api_key(api_key),
            base_url: DEFAULT_BASE_URL.to_string(),
            models,
            max_tokens: generation.max_tokens,
        }
    }

    /// Point the provider at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn models(&self) -> &[String] {
        &self.models
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/v1/messages", self.base_url);

        let body = serde_json::json!({
            "model": model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        let text = json["content"][0]["text"]
            .as_str()
            .ok_or(BackendError::EmptyResponse)?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(BackendError::EmptyResponse);
        }

        Ok(text)
    }
}

/// Best-effort extraction of the API's error message from a failed reply.
async fn error_message(response: reqwest::Response) -> String {
    match response.json::<serde_json::Value>().await {
        Ok(json) => json["error"]["message"]
            .as_str()
            .unwrap_or("no error details")
            .to_string(),
        Err(_) => "no error details".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GenerationSettings {
        GenerationSettings {
            max_tokens: 4000,
            timeout_secs: 5,
        }
    }

    #[test]
    fn construction_does_not_panic() {
        let _provider = AnthropicProvider::new(
            "test-key",
            vec![
                "claude-3-haiku-20240307".into(),
                "claude-3-sonnet-20240229".into(),
            ],
            &settings(),
        );
    }

    #[test]
    fn name_and_model_order_are_preserved() {
        let provider = AnthropicProvider::new(
            "test-key",
            vec![
                "claude-3-haiku-20240307".into(),
                "claude-3-sonnet-20240229".into(),
            ],
            &settings(),
        );
        assert_eq!(provider.name(), "Anthropic Claude");
        assert_eq!(provider.models()[0], "claude-3-haiku-20240307");
    }

    #[test]
    fn api_key_is_sanitized_at_construction() {
        let provider = AnthropicProvider::new("'sk-ant-test' ", vec![], &settings());
        assert_eq!(provider.api_key, "sk-ant-test");
    }

    #[test]
    fn provider_is_object_safe() {
        let provider =
            AnthropicProvider::new("k", vec!["claude-3-haiku-20240307".into()], &settings());
        let _: Box<dyn TextProvider> = Box::new(provider);
    }
}
