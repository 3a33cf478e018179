//! Section-marker extraction of structured fields from backend replies.
//!
//! [`extract`] is total: whatever the backend produced, it returns a partial
//! [`ExtractedFields`] record — missing markers leave fields at their
//! defaults, and garbage input yields an empty record, never an error.
//!
//! A section's content is everything after its (case-sensitive, uppercase)
//! marker up to the next marker in the platform's fixed order, or the end of
//! the text; the result is trimmed. The marker order per platform lives in
//! the [`PlatformSpec`](crate::platform::PlatformSpec) table shared with the
//! prompt builder.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Maximum number of keywords kept from the keyword platform's reply
/// (shared with request validation).
pub use crate::platform::MAX_KEYWORDS;

// ---------------------------------------------------------------------------
// ExtractedFields
// ---------------------------------------------------------------------------

/// Platform-dependent partial record of extracted content.
///
/// Only the fields belonging to the extracted platform are populated; they
/// default to `Some("")` / `Some(vec![])` when their marker is missing, so a
/// consumer can tell "this platform's field, empty" from "not this
/// platform's field" (`None`). `timestamps` is the one exception: it is set
/// only when its marker was actually found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok_post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// extract
// ---------------------------------------------------------------------------

/// Extract `platform`'s structured fields from a raw backend reply.
///
/// Never fails and is idempotent; malformed or incomplete replies degrade to
/// default (empty) fields.
pub fn extract(platform: Platform, text: &str) -> ExtractedFields {
    let parts = sections(text, platform.spec().markers);
    let mut fields = ExtractedFields::default();

    match platform {
        Platform::YouTube => {
            fields.transcript = Some(parts[0].unwrap_or_default().to_string());
            fields.title = Some(parts[1].unwrap_or_default().to_string());
            fields.description = Some(parts[2].unwrap_or_default().to_string());
            // Timestamps stay absent when the marker is missing.
            fields.timestamps = parts[3].map(str::to_string);
        }
        Platform::LinkedIn => {
            fields.linkedin_post = Some(parts[0].unwrap_or_default().to_string());
        }
        Platform::Twitter => {
            fields.twitter_post = Some(parts[0].unwrap_or_default().to_string());
        }
        Platform::Instagram => {
            fields.instagram_post = Some(parts[0].unwrap_or_default().to_string());
        }
        Platform::TikTok => {
            fields.tiktok_post = Some(parts[0].unwrap_or_default().to_string());
        }
        Platform::Keywords => {
            fields.keywords = Some(split_keywords(parts[0].unwrap_or_default()));
        }
    }

    fields
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Slice `text` into one trimmed section per marker, in marker order.
///
/// A section runs from the end of its marker to the first occurrence of the
/// next marker in the list, or to the end of the text. Markers that never
/// occur yield `None`.
fn sections<'a>(text: &'a str, markers: &[&str]) -> Vec<Option<&'a str>> {
    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| section(text, marker, markers.get(i + 1).copied()))
        .collect()
}

fn section<'a>(text: &'a str, marker: &str, next_marker: Option<&str>) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = next_marker
        .and_then(|m| rest.find(m))
        .unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Split the keyword section by lines, drop blanks, keep the first
/// [`MAX_KEYWORDS`] entries in their original order.
fn split_keywords(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
