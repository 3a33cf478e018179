//! Text-generation providers and the fallback machinery around them.
//!
//! This module provides:
//! * [`TextProvider`] — async trait implemented by all backends; wraps one
//!   service plus its ordered model fallback list.
//! * [`GeminiProvider`] / [`AnthropicProvider`] — the two REST backends.
//! * [`ProviderOrchestrator`] — sequential, first-success-wins fallback
//!   across all configured providers.
//! * [`BackendError`] — per-call error variants.
//! * [`GenerationError`] — one recorded (provider, model, message, status)
//!   failure; accumulated, never discarded, within an orchestration.

pub mod anthropic;
pub mod gemini;
pub mod orchestrator;

use async_trait::async_trait;
use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use orchestrator::{
    AllProvidersFailed, NoProvidersConfigured, Orchestration, ProviderOrchestrator,
};

// ---------------------------------------------------------------------------
// BackendError
// ---------------------------------------------------------------------------

/// Errors from a single backend call (one model, one request).
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success HTTP status.
    #[error("API returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse API response: {0}")]
    Parse(String),

    /// The backend returned a response with no usable text content.
    #[error("backend returned an empty response")]
    EmptyResponse,
}

impl BackendError {
    /// Numeric HTTP status, when this failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if let Some(status) = e.status() {
            BackendError::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            BackendError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Generation / GenerationError
// ---------------------------------------------------------------------------

/// A successful generation: the raw reply plus the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Free-form reply text, to be fed to the extractor.
    pub text: String,
    /// Identifier of the model that answered (e.g. `"gemini-2.5-flash"`).
    pub model: String,
}

/// One recorded failure during fallback, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationError {
    /// Provider display name ("Google Gemini", "Anthropic Claude").
    pub provider: String,
    /// Failing model identifier; `None` for provider-level entries.
    pub model: Option<String>,
    /// Human-readable failure message.
    pub message: String,
    /// HTTP status, when the backend supplied one.
    pub status: Option<u16>,
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.model {
            Some(model) => write!(f, "{} ({}): {}", self.provider, model, self.message),
            None => write!(f, "{}: {}", self.provider, self.message),
        }
    }
}

// ---------------------------------------------------------------------------
// ProviderExhausted
// ---------------------------------------------------------------------------

/// Every model of one provider failed.
///
/// The display message tags the provider's name and joins every per-model
/// failure message, in attempt order.
#[derive(Debug, Error)]
#[error("{provider} failed: {}", join_messages(.attempts))]
pub struct ProviderExhausted {
    /// Provider display name.
    pub provider: String,
    /// One entry per failed model, in the order they were tried.
    pub attempts: Vec<GenerationError>,
}

fn join_messages(attempts: &[GenerationError]) -> String {
    if attempts.is_empty() {
        return "no models configured".to_string();
    }
    attempts
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// TextProvider trait
// ---------------------------------------------------------------------------

/// Async trait for a text-generation backend with model fallback.
///
/// Implementors supply the wire call ([`complete`](TextProvider::complete))
/// and the ordered model list; the fallback loop itself is a provided
/// method, so every backend gets identical first-success-wins semantics.
///
/// Implementors must be `Send + Sync` so they can be boxed into the
/// orchestrator and shared across tasks.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider display name used in error messages.
    fn name(&self) -> &str;

    /// Ordered model fallback list; earlier entries are preferred.
    fn models(&self) -> &[String];

    /// Perform a single backend call against one model. Never retried with
    /// the same model.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, BackendError>;

    /// Try each model in order; return the first success together with the
    /// model that produced it.
    ///
    /// Each failure is recorded as a [`GenerationError`] and fallback moves
    /// on; when the list is exhausted the aggregate [`ProviderExhausted`]
    /// carries every attempt.
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderExhausted> {
        let mut attempts = Vec::new();

        for model in self.models() {
            log::debug!("{}: trying model {model}", self.name());
            match self.complete(model, prompt).await {
                Ok(text) => {
                    return Ok(Generation {
                        text,
                        model: model.clone(),
                    });
                }
                Err(e) => {
                    log::warn!("{}: model {model} failed: {e}", self.name());
                    attempts.push(GenerationError {
                        provider: self.name().to_string(),
                        model: Some(model.clone()),
                        message: e.to_string(),
                        status: e.status(),
                    });
                }
            }
        }

        Err(ProviderExhausted {
            provider: self.name().to_string(),
            attempts,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
