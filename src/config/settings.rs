//! Settings structs, defaults, TOML persistence and env overrides.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.
//! Environment variables win over the file: `GOOGLE_GEMINI_API_KEY`,
//! `ANTHROPIC_API_KEY`, `GOOGLE_GEMINI_MODELS`, `ANTHROPIC_MODELS`
//! (comma-separated lists).

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ProviderSettings
// ---------------------------------------------------------------------------

/// Settings for one backend provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// API key — `None` leaves the provider unconfigured.
    pub api_key: Option<String>,
    /// Ordered model fallback list; earlier entries are tried first.
    pub models: Vec<String>,
}

impl ProviderSettings {
    fn with_models(models: &[&str]) -> Self {
        Self {
            api_key: None,
            models: models.iter().map(|m| m.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ProvidersSettings
// ---------------------------------------------------------------------------

/// Per-provider configuration, in fallback order (Google first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersSettings {
    /// Google Gemini.
    pub google: ProviderSettings,
    /// Anthropic Claude.
    pub anthropic: ProviderSettings,
}

impl Default for ProvidersSettings {
    fn default() -> Self {
        Self {
            google: ProviderSettings::with_models(&["gemini-2.5-pro", "gemini-2.5-flash"]),
            anthropic: ProviderSettings::with_models(&[
                "claude-3-haiku-20240307",
                "claude-3-sonnet-20240229",
            ]),
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationSettings
// ---------------------------------------------------------------------------

/// Settings applied to every backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Maximum tokens requested from the backend per reply.
    pub max_tokens: u32,
    /// Maximum seconds to wait for a backend reply before timing out.
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 4000,
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use postcraft::config::AppConfig;
///
/// // Load (returns Default when the file is missing) + env overrides
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend provider keys and model lists.
    pub providers: ProvidersSettings,
    /// Per-call generation settings.
    pub generation: GenerationSettings,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`,
    /// then apply environment overrides.
    ///
    /// Returns `Ok(AppConfig::default())` (plus env overrides) when the file
    /// does not exist yet, so callers never special-case a missing file.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&AppPaths::new().settings_file)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, without env overrides (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to the platform-appropriate `settings.toml`, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overlay environment variables onto this configuration.
    ///
    /// Keys replace the file's keys when set; model-list variables replace
    /// the whole list (comma-separated, entries trimmed, blanks dropped).
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GOOGLE_GEMINI_API_KEY") {
            self.providers.google.api_key = Some(key);
        }
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            self.providers.anthropic.api_key = Some(key);
        }
        if let Ok(models) = std::env::var("GOOGLE_GEMINI_MODELS") {
            if let Some(parsed) = parse_model_list(&models) {
                self.providers.google.models = parsed;
            }
        }
        if let Ok(models) = std::env::var("ANTHROPIC_MODELS") {
            if let Some(parsed) = parse_model_list(&models) {
                self.providers.anthropic.models = parsed;
            }
        }
    }
}

/// Parse a comma-separated model list; `None` when no usable entry remains.
fn parse_model_list(raw: &str) -> Option<Vec<String>> {
    let models: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();
    if models.is_empty() {
        None
    } else {
        Some(models)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
