//! Input validation for generation requests.
//!
//! Every check a request must pass before it reaches the generation core:
//! non-blank transcript, `MM:SS` duration, at most three keywords.
//! Hand-rolled character checks; no regex dependency.

use thiserror::Error;

/// Maximum number of request keywords (shared with reply extraction).
pub use crate::platform::MAX_KEYWORDS;

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The transcript is missing or blank.
    #[error("transcript must not be empty")]
    EmptyTranscript,

    /// The duration hint is not of the form `MM:SS` (seconds 00–59).
    #[error("invalid video duration '{0}' (expected MM:SS, e.g. 7:16)")]
    InvalidDuration(String),

    /// More than [`MAX_KEYWORDS`] keywords after normalization.
    #[error("at most {MAX_KEYWORDS} keywords allowed, got {0}")]
    TooManyKeywords(usize),
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// A transcript must contain at least one non-whitespace character.
pub fn validate_transcript(transcript: &str) -> Result<(), ValidationError> {
    if transcript.trim().is_empty() {
        return Err(ValidationError::EmptyTranscript);
    }
    Ok(())
}

/// A duration hint must be `M:SS` or `MM:SS` with seconds below 60.
///
/// The empty string is accepted; the field is optional and callers pass
/// whatever the user typed.
pub fn validate_video_duration(duration: &str) -> Result<(), ValidationError> {
    let trimmed = duration.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if is_mm_ss(trimmed) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDuration(trimmed.to_string()))
    }
}

/// At most [`MAX_KEYWORDS`] entries.
pub fn validate_keywords(keywords: &[String]) -> Result<(), ValidationError> {
    if keywords.len() > MAX_KEYWORDS {
        return Err(ValidationError::TooManyKeywords(keywords.len()));
    }
    Ok(())
}

/// Strip stray quote characters and surrounding whitespace from an API key.
///
/// Keys pasted into env files or shells frequently arrive wrapped in quotes.
pub fn sanitize_api_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .trim()
        .to_string()
}

/// `1–2 digit minutes ":" exactly two digit seconds, first one 0–5`.
fn is_mm_ss(s: &str) -> bool {
    let Some((minutes, seconds)) = s.split_once(':') else {
        return false;
    };
    let minutes_ok =
        (1..=2).contains(&minutes.len()) && minutes.chars().all(|c| c.is_ascii_digit());
    let seconds_ok = seconds.len() == 2
        && seconds.chars().all(|c| c.is_ascii_digit())
        && matches!(seconds.as_bytes()[0], b'0'..=b'5');
    minutes_ok && seconds_ok
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Transcript
    // -----------------------------------------------------------------------

    #[test]
    fn non_blank_transcript_is_accepted() {
        assert_eq!(validate_transcript("hello world"), Ok(()));
    }

    #[test]
    fn blank_transcript_is_rejected() {
        assert_eq!(validate_transcript(""), Err(ValidationError::EmptyTranscript));
        assert_eq!(
            validate_transcript("   \n\t "),
            Err(ValidationError::EmptyTranscript)
        );
    }

    // -----------------------------------------------------------------------
    // Duration
    // -----------------------------------------------------------------------

    #[test]
    fn valid_durations_are_accepted() {
        for duration in ["7:16", "07:16", "0:00", "99:59", " 12:34 "] {
            assert_eq!(validate_video_duration(duration), Ok(()), "{duration}");
        }
    }

    #[test]
    fn empty_duration_is_accepted_as_optional() {
        assert_eq!(validate_video_duration(""), Ok(()));
        assert_eq!(validate_video_duration("   "), Ok(()));
    }

    #[test]
    fn malformed_durations_are_rejected() {
        for duration in ["716", "7:6", "7:60", "123:00", "7:1x", "ab:cd", "7.16", ":30"] {
            assert!(
                validate_video_duration(duration).is_err(),
                "{duration} should be rejected"
            );
        }
    }

    // -----------------------------------------------------------------------
    // Keywords
    // -----------------------------------------------------------------------

    #[test]
    fn up_to_three_keywords_are_accepted() {
        let keywords: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(validate_keywords(&keywords), Ok(()));
        assert_eq!(validate_keywords(&[]), Ok(()));
    }

    #[test]
    fn four_keywords_are_rejected() {
        let keywords: Vec<String> = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        assert_eq!(
            validate_keywords(&keywords),
            Err(ValidationError::TooManyKeywords(4))
        );
    }

    // -----------------------------------------------------------------------
    // API key sanitisation
    // -----------------------------------------------------------------------

    #[test]
    fn sanitize_strips_quotes_and_whitespace() {
        assert_eq!(sanitize_api_key("\"my-key\""), "my-key");
        assert_eq!(sanitize_api_key("  'my-key'  "), "my-key");
        assert_eq!(sanitize_api_key("plain"), "plain");
        assert_eq!(sanitize_api_key(""), "");
    }
}
