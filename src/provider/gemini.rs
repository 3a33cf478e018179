//! Google Gemini backend — Generative Language REST API.
//!
//! Speaks `POST /v1beta/models/{model}:generateContent` directly over
//! reqwest; no vendor SDK. The API key travels as the `key` query
//! parameter, which is how this API authenticates.

use async_trait::async_trait;

use crate::config::GenerationSettings;
use crate::pipeline::validate::sanitize_api_key;
use crate::provider::{BackendError, TextProvider};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// ---------------------------------------------------------------------------
// GeminiProvider
// ---------------------------------------------------------------------------

/// Wraps the Google Gemini API plus its ordered model fallback list.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
    max_tokens: u32,
}

impl GeminiProvider {
    /// Display name used in error messages and diagnostics.
    pub const NAME: &'static str = "Google Gemini";

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
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn models(&self) -> &[String] {
        &self.models
    }

    async fn complete(&self, model: &str, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);

        let body = serde_json::json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "maxOutputTokens": self.max_tokens
            }
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
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

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
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
        let _provider = GeminiProvider::new(
            "test-key",
            vec!["gemini-2.5-pro".into(), "gemini-2.5-flash".into()],
            &settings(),
        );
    }

    #[test]
    fn name_and_model_order_are_preserved() {
        let provider = GeminiProvider::new(
            "test-key",
            vec!["gemini-2.5-pro".into(), "gemini-2.5-flash".into()],
            &settings(),
        );
        assert_eq!(provider.name(), "Google Gemini");
        assert_eq!(
            provider.models(),
            &["gemini-2.5-pro".to_string(), "gemini-2.5-flash".to_string()]
        );
    }

    #[test]
    fn api_key_is_sanitized_at_construction() {
        let provider = GeminiProvider::new("\"quoted-key\" ", vec![], &settings());
        assert_eq!(provider.api_key, "quoted-key");
    }

    #[test]
    fn base_url_can_be_overridden() {
        let provider = GeminiProvider::new("k", vec![], &settings())
            .with_base_url("http://localhost:9999");
        assert_eq!(provider.base_url, "http://localhost:9999");
    }

    #[test]
    fn provider_is_object_safe() {
        let provider = GeminiProvider::new("k", vec!["gemini-2.5-pro".into()], &settings());
        let _: Box<dyn TextProvider> = Box::new(provider);
    }
}
