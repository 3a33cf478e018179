//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), per-provider and generation
//! sub-settings, `AppPaths` for cross-platform config directories, TOML
//! persistence via `AppConfig::load` / `AppConfig::save`, and environment
//! variable overrides for keys and model lists.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, GenerationSettings, ProviderSettings, ProvidersSettings};
