//! Sequential, first-success-wins orchestration across providers.
//!
//! The orchestrator holds an ordered list of configured providers and tries
//! them one after another, each attempt fully awaited before the next. This
//! trades worst-case latency (every model of every provider) for
//! availability: one answering model anywhere is enough.
//!
//! The error accumulator is created fresh for every call and travels with
//! the outcome — [`Orchestration::fallback_errors`] on success,
//! [`AllProvidersFailed::errors`] on total exhaustion — instead of living as
//! mutable orchestrator state. That keeps the orchestrator shareable across
//! in-flight requests with no cross-request error leakage.

use thiserror::Error;

use crate::config::AppConfig;
use crate::provider::{
    AnthropicProvider, GeminiProvider, Generation, GenerationError, TextProvider,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Construction-time error: not a single provider has an API key.
///
/// Fatal at startup; distinct from the per-request [`AllProvidersFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no AI providers configured (set at least one API key)")]
pub struct NoProvidersConfigured;

/// Every configured provider exhausted every model.
///
/// The only generation-path error surfaced outside the core. The message
/// joins `provider: message` for every provider, and [`errors`](Self::errors)
/// exposes the full per-provider list for inspection.
#[derive(Debug, Error)]
#[error("All AI providers failed: {}", summarize(.errors))]
pub struct AllProvidersFailed {
    errors: Vec<GenerationError>,
}

impl AllProvidersFailed {
    /// One aggregate entry per provider, in the order they were tried.
    pub fn errors(&self) -> &[GenerationError] {
        &self.errors
    }
}

fn summarize(errors: &[GenerationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.provider, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// A successful orchestration and everything recorded on the way there.
#[derive(Debug)]
pub struct Orchestration {
    /// The winning reply and the model that produced it.
    pub generation: Generation,
    /// Aggregate errors of the providers tried (and exhausted) before the
    /// winner; empty when the first provider answered.
    pub fallback_errors: Vec<GenerationError>,
}

// ---------------------------------------------------------------------------
// ProviderOrchestrator
// ---------------------------------------------------------------------------

/// Ordered provider list with sequential fallback.
///
/// Immutable after construction; methods take `&self`, so one instance may
/// serve any number of requests.
pub struct ProviderOrchestrator {
    providers: Vec<Box<dyn TextProvider>>,
}

impl ProviderOrchestrator {
    /// Build from an ordered provider list.
    ///
    /// Fails with [`NoProvidersConfigured`] when the list is empty — this is
    /// a startup error, checked before any request is served.
    pub fn new(providers: Vec<Box<dyn TextProvider>>) -> Result<Self, NoProvidersConfigured> {
        if providers.is_empty() {
            return Err(NoProvidersConfigured);
        }
        log::debug!("orchestrator configured with {} provider(s)", providers.len());
        Ok(Self { providers })
    }

    /// Build the standard provider lineup from configuration: Google Gemini
    /// first, then Anthropic Claude, each included only when its API key is
    /// set and non-empty.
    pub fn from_config(config: &AppConfig) -> Result<Self, NoProvidersConfigured> {
        let mut providers: Vec<Box<dyn TextProvider>> = Vec::new();

        if let Some(key) = non_empty(config.providers.google.api_key.as_deref()) {
            providers.push(Box::new(GeminiProvider::new(
                key,
                config.providers.google.models.clone(),
                &config.generation,
            )));
        }

        if let Some(key) = non_empty(config.providers.anthropic.api_key.as_deref()) {
            providers.push(Box::new(AnthropicProvider::new(
                key,
                config.providers.anthropic.models.clone(),
                &config.generation,
            )));
        }

        Self::new(providers)
    }

    /// Display names of the configured providers, in fallback order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Try each provider in order; the first success wins.
    ///
    /// A provider that exhausts its models contributes one aggregate
    /// [`GenerationError`] to the fresh per-call accumulator and fallback
    /// moves on. When every provider is exhausted the call fails with
    /// [`AllProvidersFailed`] carrying the complete list.
    pub async fn generate_content(&self, prompt: &str) -> Result<Orchestration, AllProvidersFailed> {
        let mut errors: Vec<GenerationError> = Vec::new();

        for provider in &self.providers {
            match provider.generate(prompt).await {
                Ok(generation) => {
                    log::info!(
                        "{} answered with model {}",
                        provider.name(),
                        generation.model
                    );
                    return Ok(Orchestration {
                        generation,
                        fallback_errors: errors,
                    });
                }
                Err(exhausted) => {
                    log::warn!("provider exhausted: {exhausted}");
                    errors.push(GenerationError {
                        provider: exhausted.provider.clone(),
                        model: None,
                        message: aggregate_message(&exhausted.attempts),
                        status: None,
                    });
                }
            }
        }

        Err(AllProvidersFailed { errors })
    }
}

/// Per-provider aggregate message: every model's failure message, joined.
fn aggregate_message(attempts: &[GenerationError]) -> String {
    if attempts.is_empty() {
        return "no models configured".to_string();
    }
    attempts
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_empty(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::BackendError;
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Succeeds on its first model with a fixed reply.
    struct AlwaysOk {
        name: &'static str,
        models: Vec<String>,
        reply: &'static str,
    }

    impl AlwaysOk {
        fn new(name: &'static str, model: &str, reply: &'static str) -> Self {
            Self {
                name,
                models: vec![model.to_string()],
                reply,
            }
        }
    }

    #[async_trait]
    impl TextProvider for AlwaysOk {
        fn name(&self) -> &str {
            self.name
        }

        fn models(&self) -> &[String] {
            &self.models
        }

        async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, BackendError> {
            Ok(self.reply.to_string())
        }
    }

    /// Fails on every model with a 503.
    struct AlwaysFails {
        name: &'static str,
        models: Vec<String>,
    }

    impl AlwaysFails {
        fn new(name: &'static str, models: &[&str]) -> Self {
            Self {
                name,
                models: models.iter().map(|m| m.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl TextProvider for AlwaysFails {
        fn name(&self) -> &str {
            self.name
        }

        fn models(&self) -> &[String] {
            &self.models
        }

        async fn complete(&self, model: &str, _prompt: &str) -> Result<String, BackendError> {
            Err(BackendError::Status {
                status: 503,
                message: format!("{model} is down"),
            })
        }
    }

    /// Fails for models listed in `bad`, succeeds otherwise.
    struct FailsThenOk {
        name: &'static str,
        models: Vec<String>,
        bad: Vec<String>,
    }

    #[async_trait]
    impl TextProvider for FailsThenOk {
        fn name(&self) -> &str {
            self.name
        }

        fn models(&self) -> &[String] {
            &self.models
        }

        async fn complete(&self, model: &str, _prompt: &str) -> Result<String, BackendError> {
            if self.bad.iter().any(|b| b == model) {
                Err(BackendError::Request(format!("{model} refused")))
            } else {
                Ok(format!("reply from {model}"))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn empty_provider_list_is_a_configuration_error() {
        let result = ProviderOrchestrator::new(Vec::new());
        assert!(matches!(result, Err(NoProvidersConfigured)));
    }

    #[test]
    fn from_config_without_keys_is_a_configuration_error() {
        let config = AppConfig::default();
        assert!(ProviderOrchestrator::from_config(&config).is_err());
    }

    #[test]
    fn from_config_orders_google_before_anthropic() {
        let mut config = AppConfig::default();
        config.providers.google.api_key = Some("g-key".into());
        config.providers.anthropic.api_key = Some("a-key".into());

        let orchestrator = ProviderOrchestrator::from_config(&config).expect("two providers");
        assert_eq!(
            orchestrator.provider_names(),
            vec!["Google Gemini", "Anthropic Claude"]
        );
    }

    #[test]
    fn blank_api_key_does_not_configure_a_provider() {
        let mut config = AppConfig::default();
        config.providers.google.api_key = Some("   ".into());
        config.providers.anthropic.api_key = Some("a-key".into());

        let orchestrator = ProviderOrchestrator::from_config(&config).expect("one provider");
        assert_eq!(orchestrator.provider_names(), vec!["Anthropic Claude"]);
    }

    // -----------------------------------------------------------------------
    // Fallback semantics
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn first_provider_success_returns_without_errors() {
        let orchestrator = ProviderOrchestrator::new(vec![
            Box::new(AlwaysOk::new("First", "model-a", "hello")),
            Box::new(AlwaysOk::new("Second", "model-b", "unused")),
        ])
        .expect("providers");

        let outcome = orchestrator.generate_content("p").await.expect("success");
        assert_eq!(outcome.generation.text, "hello");
        assert_eq!(outcome.generation.model, "model-a");
        assert!(outcome.fallback_errors.is_empty());
    }

    /// First provider exhausted, second answers: the winning model belongs
    /// to the second provider and exactly one fallback error is recorded.
    #[tokio::test]
    async fn second_provider_wins_with_one_recorded_error() {
        let orchestrator = ProviderOrchestrator::new(vec![
            Box::new(AlwaysFails::new("Broken", &["m1", "m2"])),
            Box::new(AlwaysOk::new("Working", "model-b", "saved")),
        ])
        .expect("providers");

        let outcome = orchestrator.generate_content("p").await.expect("success");
        assert_eq!(outcome.generation.model, "model-b");

        assert_eq!(outcome.fallback_errors.len(), 1);
        let recorded = &outcome.fallback_errors[0];
        assert_eq!(recorded.provider, "Broken");
        assert_eq!(recorded.model, None);
        assert!(recorded.message.contains("m1 is down"));
        assert!(recorded.message.contains("m2 is down"));
    }

    /// Model-level fallback inside one provider: m1 fails, m2 answers, and
    /// the outcome's model is m2.
    #[tokio::test]
    async fn model_fallback_within_a_provider() {
        let orchestrator = ProviderOrchestrator::new(vec![Box::new(FailsThenOk {
            name: "Mixed",
            models: vec!["m1".into(), "m2".into()],
            bad: vec!["m1".into()],
        })])
        .expect("providers");

        let outcome = orchestrator.generate_content("p").await.expect("success");
        assert_eq!(outcome.generation.model, "m2");
        assert_eq!(outcome.generation.text, "reply from m2");
        assert!(outcome.fallback_errors.is_empty());
    }

    #[tokio::test]
    async fn total_exhaustion_names_every_provider() {
        let orchestrator = ProviderOrchestrator::new(vec![
            Box::new(AlwaysFails::new("Alpha", &["a1"])),
            Box::new(AlwaysFails::new("Beta", &["b1", "b2"])),
        ])
        .expect("providers");

        let err = orchestrator.generate_content("p").await.unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("All AI providers failed:"));
        assert!(message.contains("Alpha:"));
        assert!(message.contains("Beta:"));

        let errors = err.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].provider, "Alpha");
        assert_eq!(errors[1].provider, "Beta");
        assert!(errors[1].message.contains("b1 is down"));
        assert!(errors[1].message.contains("b2 is down"));
    }

    /// Two calls on one instance: the second call's accumulator starts
    /// empty, so errors never leak between requests.
    #[tokio::test]
    async fn error_accumulator_is_fresh_per_call() {
        let orchestrator = ProviderOrchestrator::new(vec![
            Box::new(AlwaysFails::new("Flaky", &["m1"])),
            Box::new(AlwaysOk::new("Stable", "model-b", "ok")),
        ])
        .expect("providers");

        let first = orchestrator.generate_content("p1").await.expect("success");
        assert_eq!(first.fallback_errors.len(), 1);

        let second = orchestrator.generate_content("p2").await.expect("success");
        assert_eq!(second.fallback_errors.len(), 1);
        assert_eq!(second.fallback_errors[0].provider, "Flaky");
    }
}
