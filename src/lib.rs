//! postcraft — transcript to platform-ready social media content.
//!
//! Takes a video/audio transcript, asks an external text-generation backend
//! to transform it for a target platform, and extracts structured fields
//! from the free-text reply.
//!
//! This crate provides:
//! * [`Platform`] — the closed set of content targets, plus the per-platform
//!   spec table shared by prompt builder and extractor.
//! * [`PromptBuilder`] — deterministic platform-keyed prompt templates.
//! * [`TextProvider`] — async trait over a backend with an ordered model
//!   fallback list; [`GeminiProvider`] and [`AnthropicProvider`] implement it.
//! * [`ProviderOrchestrator`] — sequential first-success-wins fallback across
//!   all configured providers.
//! * [`extract`](extract::extract) — tolerant section-marker extraction that
//!   never fails.
//! * [`ContentPipeline`] — the end-to-end request flow.
//! * [`AppConfig`] — TOML settings with env-var overrides.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use postcraft::config::AppConfig;
//! use postcraft::pipeline::{ContentPipeline, GenerationRequest};
//! use postcraft::platform::Platform;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let pipeline = ContentPipeline::from_config(&config)?;
//!
//!     let request = GenerationRequest::new(
//!         "today we look at async Rust and why executors matter",
//!         Platform::LinkedIn,
//!         None,
//!         vec!["rust".into(), "async".into()],
//!     )?;
//!
//!     let response = pipeline.generate(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod extract;
pub mod pipeline;
pub mod platform;
pub mod prompt;
pub mod provider;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use config::{AppConfig, AppPaths};
pub use extract::ExtractedFields;
pub use pipeline::{ContentPipeline, GenerateResponse, GenerationRequest};
pub use platform::Platform;
pub use prompt::{PromptBuilder, PromptOptions};
pub use provider::{
    AllProvidersFailed, AnthropicProvider, BackendError, GeminiProvider, Generation,
    GenerationError, NoProvidersConfigured, ProviderOrchestrator, TextProvider,
};
