//! The request pipeline: validated request in, structured content out.
//!
//! [`ContentPipeline::generate`] runs the full sequence for one request,
//! each stage fully awaited before the next:
//!
//! 1. Clean the transcript (drop a single stray trailing character).
//! 2. Build the platform prompt ([`PromptBuilder`]).
//! 3. Orchestrate generation across providers ([`ProviderOrchestrator`]).
//! 4. Extract the platform's fields from the reply ([`extract`]).
//! 5. Assemble the [`GenerateResponse`] with the winning model's id.
//!
//! Requests are per-call values; nothing outlives a call except the
//! orchestrator's immutable provider list.

pub mod validate;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::extract::{self, ExtractedFields};
use crate::platform::Platform;
use crate::prompt::{PromptBuilder, PromptOptions};
use crate::provider::{AllProvidersFailed, NoProvidersConfigured, ProviderOrchestrator};
use validate::ValidationError;

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// One validated generation request. Immutable once built.
///
/// Construction normalizes the optional fields: the duration hint is
/// trimmed (blank becomes `None`), keywords are trimmed, lower-cased and
/// deduplicated in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    transcript: String,
    platform: Platform,
    video_duration: Option<String>,
    keywords: Vec<String>,
}

impl GenerationRequest {
    /// Validate and build a request.
    pub fn new(
        transcript: impl Into<String>,
        platform: Platform,
        video_duration: Option<String>,
        keywords: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let transcript = transcript.into();
        validate::validate_transcript(&transcript)?;

        let video_duration = match video_duration {
            Some(d) => {
                validate::validate_video_duration(&d)?;
                let trimmed = d.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            None => None,
        };

        let keywords = normalize_keywords(keywords);
        validate::validate_keywords(&keywords)?;

        Ok(Self {
            transcript,
            platform,
            video_duration,
            keywords,
        })
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn video_duration(&self) -> Option<&str> {
        self.video_duration.as_deref()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// The prompt options carried by this request.
    fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            video_duration: self.video_duration.clone(),
            keywords: self.keywords.clone(),
        }
    }
}

/// Trim, lower-case, drop blanks, deduplicate preserving first occurrence.
fn normalize_keywords(keywords: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || normalized.contains(&keyword) {
            continue;
        }
        normalized.push(keyword);
    }
    normalized
}

// ---------------------------------------------------------------------------
// GenerateResponse
// ---------------------------------------------------------------------------

/// The assembled result of one pipeline run.
///
/// Serializes with the extracted fields flattened in, camelCase names, and
/// absent fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Platform-dependent extracted fields.
    #[serde(flatten)]
    pub fields: ExtractedFields,
    /// Whether a stray trailing character was removed from the transcript.
    pub transcript_cleaned: bool,
    /// Identifier of the backend model that produced the content.
    pub model_used: String,
}

// ---------------------------------------------------------------------------
// Transcript cleaning
// ---------------------------------------------------------------------------

/// Remove a single stray character from the end of the transcript.
///
/// Speech-to-text exports often end with an orphaned single character; when
/// the final whitespace-separated word is exactly one character long it is
/// dropped and the flag is set. Otherwise the transcript passes through
/// untouched.
pub fn clean_transcript(transcript: &str) -> (String, bool) {
    let words: Vec<&str> = transcript.split_whitespace().collect();
    match words.last() {
        Some(last) if last.chars().count() == 1 => {
            let cleaned = words[..words.len() - 1].join(" ");
            log::debug!("removed stray trailing character from transcript");
            (cleaned, true)
        }
        _ => (transcript.to_string(), false),
    }
}

// ---------------------------------------------------------------------------
// ContentPipeline
// ---------------------------------------------------------------------------

/// Owns the orchestrator and runs requests end to end.
///
/// Stateless per request; a single pipeline may serve any number of
/// sequential requests.
pub struct ContentPipeline {
    orchestrator: ProviderOrchestrator,
}

impl ContentPipeline {
    /// Build a pipeline around an already-constructed orchestrator.
    pub fn new(orchestrator: ProviderOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Build the standard pipeline from configuration.
    ///
    /// Fails with [`NoProvidersConfigured`] when no API key is set — a
    /// startup condition, distinct from per-request generation failure.
    pub fn from_config(config: &AppConfig) -> Result<Self, NoProvidersConfigured> {
        Ok(Self::new(ProviderOrchestrator::from_config(config)?))
    }

    /// Run one request through clean → prompt → generate → extract.
    ///
    /// The only error surfaced is [`AllProvidersFailed`]; malformed backend
    /// output degrades to empty extracted fields instead of failing.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerateResponse, AllProvidersFailed> {
        let (transcript, transcript_cleaned) = clean_transcript(request.transcript());

        let prompt =
            PromptBuilder::build(request.platform(), &transcript, &request.prompt_options());
        log::debug!(
            "built {} prompt ({} chars)",
            request.platform(),
            prompt.len()
        );

        let outcome = self.orchestrator.generate_content(&prompt).await?;
        for error in &outcome.fallback_errors {
            log::warn!("fallback before success: {error}");
        }
        log::debug!("raw reply:\n{}", outcome.generation.text);

        let fields = extract::extract(request.platform(), &outcome.generation.text);

        Ok(GenerateResponse {
            fields,
            transcript_cleaned,
            model_used: outcome.generation.model,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
