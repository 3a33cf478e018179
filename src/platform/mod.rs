//! Target platforms and their per-platform specification table.
//!
//! [`Platform`] is the closed set of content targets. Each variant maps to a
//! single [`PlatformSpec`] carrying everything that must stay in lock-step
//! when a platform is added: the ordered extraction markers, which request
//! options the prompt uses, and the prompt template itself. The prompt
//! builder and the response extractor both read this table, so they cannot
//! drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prompt::{self, PromptOptions};

/// Maximum number of keywords, both per request and in an extracted keyword
/// list. Request validation and reply extraction share this one limit.
pub const MAX_KEYWORDS: usize = 3;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// The content target selected by a generation request.
///
/// Drives both the prompt template and the response marker table. The enum
/// is closed, so an "unsupported platform" cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Long-form video metadata: polished transcript, title, description,
    /// optional timestamps.
    YouTube,
    /// A single professional long-form post (1000–1500 characters).
    LinkedIn,
    /// A single short post (at most 280 characters).
    Twitter,
    /// A single caption-style post (500–800 characters).
    Instagram,
    /// A single hook-driven short post (150–300 characters).
    TikTok,
    /// Up to three topic keywords, one per line.
    Keywords,
}

/// Returned by [`Platform::from_str`] for an unrecognised identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown platform '{0}' (expected one of: youtube, linkedin, twitter, instagram, tiktok, keywords)")]
pub struct UnknownPlatform(pub String);

impl Platform {
    /// Every platform, in display order.
    pub const ALL: [Platform; 6] = [
        Platform::YouTube,
        Platform::LinkedIn,
        Platform::Twitter,
        Platform::Instagram,
        Platform::TikTok,
        Platform::Keywords,
    ];

    /// Stable lowercase identifier (matches the wire/JSON representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::LinkedIn => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::Keywords => "keywords",
        }
    }

    /// The platform's specification record (markers, options, template).
    pub fn spec(&self) -> &'static PlatformSpec {
        match self {
            Platform::YouTube => &YOUTUBE,
            Platform::LinkedIn => &LINKEDIN,
            Platform::Twitter => &TWITTER,
            Platform::Instagram => &INSTAGRAM,
            Platform::TikTok => &TIKTOK,
            Platform::Keywords => &KEYWORDS,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::YouTube),
            "linkedin" => Ok(Platform::LinkedIn),
            "twitter" => Ok(Platform::Twitter),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "keywords" => Ok(Platform::Keywords),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PlatformSpec
// ---------------------------------------------------------------------------

/// Everything that varies per platform, in one record.
///
/// `markers` is ordered: during extraction each section runs from its marker
/// to the next marker in this list (or end of text). The prompt template
/// instructs the backend to answer using exactly these labels.
#[derive(Debug)]
pub struct PlatformSpec {
    /// Human-readable name ("YouTube", "LinkedIn", …).
    pub name: &'static str,
    /// Ordered uppercase section markers expected in backend output.
    pub markers: &'static [&'static str],
    /// Whether the prompt template uses the request's duration hint.
    pub uses_duration: bool,
    /// Whether the prompt template uses the request's keyword list.
    pub uses_keywords: bool,
    /// Template producing the full prompt for this platform.
    pub build_prompt: fn(transcript: &str, options: &PromptOptions) -> String,
}

static YOUTUBE: PlatformSpec = PlatformSpec {
    name: "YouTube",
    markers: &["TRANSCRIPT:", "TITLE:", "DESCRIPTION:", "TIMESTAMPS:"],
    uses_duration: true,
    uses_keywords: true,
    build_prompt: prompt::youtube_prompt,
};

static LINKEDIN: PlatformSpec = PlatformSpec {
    name: "LinkedIn",
    markers: &["LINKEDIN POST:"],
    uses_duration: false,
    uses_keywords: true,
    build_prompt: prompt::linkedin_prompt,
};

static TWITTER: PlatformSpec = PlatformSpec {
    name: "Twitter",
    markers: &["TWITTER POST:"],
    uses_duration: false,
    uses_keywords: false,
    build_prompt: prompt::twitter_prompt,
};

static INSTAGRAM: PlatformSpec = PlatformSpec {
    name: "Instagram",
    markers: &["INSTAGRAM POST:"],
    uses_duration: false,
    uses_keywords: false,
    build_prompt: prompt::instagram_prompt,
};

static TIKTOK: PlatformSpec = PlatformSpec {
    name: "TikTok",
    markers: &["TIKTOK POST:"],
    uses_duration: false,
    uses_keywords: true,
    build_prompt: prompt::tiktok_prompt,
};

static KEYWORDS: PlatformSpec = PlatformSpec {
    name: "Keywords",
    markers: &["KEYWORDS:"],
    uses_duration: false,
    uses_keywords: false,
    build_prompt: prompt::keywords_prompt,
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
