//! Prompt construction for every target platform.
//!
//! Each platform has exactly one template. Every template instructs the
//! backend to answer with that platform's uppercase section markers, each
//! label on its own line, content running until the next label or the end of
//! the reply — the same contract the extractor relies on.
//!
//! Templates are pure: identical inputs produce identical prompt text, and
//! the transcript is embedded verbatim (cleaning happens in the pipeline,
//! before the builder is invoked).

use crate::platform::Platform;

// ---------------------------------------------------------------------------
// Shared instruction blocks
// ---------------------------------------------------------------------------

/// Common preamble establishing the role and the transcript context.
const ROLE_INSTRUCTION: &str = "\
You are a social media content strategist. You turn raw video transcripts \
into polished, platform-ready content.";

/// Output-format rules shared by every template.
const FORMAT_RULES: &str = "\
Formatting rules:
- Answer using EXACTLY the section labels given below, each on its own line.
- Write each section's content on the lines after its label.
- Do not add any other labels, headings, or commentary.";

// ---------------------------------------------------------------------------
// PromptOptions
// ---------------------------------------------------------------------------

/// Optional request details a template may use.
///
/// Which fields a platform actually reads is recorded in its
/// [`PlatformSpec`](crate::platform::PlatformSpec) (`uses_duration`,
/// `uses_keywords`); templates ignore options their platform does not use.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// Video length as `"MM:SS"`, already validated.
    pub video_duration: Option<String>,
    /// At most three lower-cased keywords, already validated.
    pub keywords: Vec<String>,
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the generation prompt for a platform.
///
/// Thin dispatcher over the per-platform template functions registered in
/// the platform spec table.
///
/// # Example
/// ```rust
/// use postcraft::platform::Platform;
/// use postcraft::prompt::{PromptBuilder, PromptOptions};
///
/// let prompt = PromptBuilder::build(
///     Platform::Twitter,
///     "we shipped the release today",
///     &PromptOptions::default(),
/// );
/// assert!(prompt.contains("TWITTER POST:"));
/// assert!(prompt.contains("we shipped the release today"));
/// ```
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the full prompt for `platform`.
    pub fn build(platform: Platform, transcript: &str, options: &PromptOptions) -> String {
        (platform.spec().build_prompt)(transcript, options)
    }
}

// ---------------------------------------------------------------------------
// Per-platform templates (registered in the platform spec table)
// ---------------------------------------------------------------------------

pub(crate) fn youtube_prompt(transcript: &str, options: &PromptOptions) -> String {
    let mut prompt = String::with_capacity(1024 + transcript.len());
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push_str("\n\nTransform the transcript below into YouTube metadata.\n\n");
    prompt.push_str(FORMAT_RULES);
    prompt.push_str(
        "\n\nSections to produce:\n\
         TRANSCRIPT:\n\
         The transcript, lightly polished for readability (fix punctuation, \
         keep the wording).\n\
         TITLE:\n\
         One compelling video title, under 100 characters.\n\
         DESCRIPTION:\n\
         A search-friendly video description of at most 1500 characters.\n\
         TIMESTAMPS:\n\
         Chapter timestamps as 'MM:SS label' lines, if the content has \
         distinct chapters.\n",
    );
    if let Some(duration) = options.video_duration.as_deref() {
        prompt.push_str(&format!(
            "\nThe video is {duration} (MM:SS) long; keep all timestamps within \
             that range.\n"
        ));
    }
    push_keyword_hint(&mut prompt, &options.keywords);
    push_transcript(&mut prompt, transcript);
    prompt
}

pub(crate) fn linkedin_prompt(transcript: &str, options: &PromptOptions) -> String {
    let mut prompt = String::with_capacity(768 + transcript.len());
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push_str("\n\nWrite a LinkedIn post based on the transcript below.\n\n");
    prompt.push_str(FORMAT_RULES);
    prompt.push_str(
        "\n\nSections to produce:\n\
         LINKEDIN POST:\n\
         A professional post of 1000 to 1500 characters: a strong opening \
         line, short paragraphs, a closing question or call to action, and \
         at most three hashtags.\n",
    );
    push_keyword_hint(&mut prompt, &options.keywords);
    push_transcript(&mut prompt, transcript);
    prompt
}

pub(crate) fn twitter_prompt(transcript: &str, _options: &PromptOptions) -> String {
    let mut prompt = String::with_capacity(640 + transcript.len());
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push_str("\n\nWrite a Twitter post based on the transcript below.\n\n");
    prompt.push_str(FORMAT_RULES);
    prompt.push_str(
        "\n\nSections to produce:\n\
         TWITTER POST:\n\
         A single post of at most 280 characters capturing the core insight, \
         with at most two hashtags.\n",
    );
    push_transcript(&mut prompt, transcript);
    prompt
}

pub(crate) fn instagram_prompt(transcript: &str, _options: &PromptOptions) -> String {
    let mut prompt = String::with_capacity(640 + transcript.len());
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push_str("\n\nWrite an Instagram caption based on the transcript below.\n\n");
    prompt.push_str(FORMAT_RULES);
    prompt.push_str(
        "\n\nSections to produce:\n\
         INSTAGRAM POST:\n\
         An engaging caption of 500 to 800 characters: a scroll-stopping \
         first line, line breaks for readability, and a handful of relevant \
         hashtags at the end.\n",
    );
    push_transcript(&mut prompt, transcript);
    prompt
}

pub(crate) fn tiktok_prompt(transcript: &str, options: &PromptOptions) -> String {
    let mut prompt = String::with_capacity(640 + transcript.len());
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push_str("\n\nWrite a TikTok caption based on the transcript below.\n\n");
    prompt.push_str(FORMAT_RULES);
    prompt.push_str(
        "\n\nSections to produce:\n\
         TIKTOK POST:\n\
         A punchy caption of 150 to 300 characters with a strong hook and \
         two or three trending-style hashtags.\n",
    );
    push_keyword_hint(&mut prompt, &options.keywords);
    push_transcript(&mut prompt, transcript);
    prompt
}

pub(crate) fn keywords_prompt(transcript: &str, _options: &PromptOptions) -> String {
    let mut prompt = String::with_capacity(512 + transcript.len());
    prompt.push_str(ROLE_INSTRUCTION);
    prompt.push_str("\n\nIdentify the main topics of the transcript below.\n\n");
    prompt.push_str(FORMAT_RULES);
    prompt.push_str(
        "\n\nSections to produce:\n\
         KEYWORDS:\n\
         Exactly three short lowercase keywords describing the content, one \
         per line, no numbering and no punctuation.\n",
    );
    push_transcript(&mut prompt, transcript);
    prompt
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Appends the keyword guidance line when the request carries keywords.
fn push_keyword_hint(prompt: &mut String, keywords: &[String]) {
    if keywords.is_empty() {
        return;
    }
    prompt.push_str(&format!(
        "\nWork these keywords in naturally: {}.\n",
        keywords.join(", ")
    ));
}

/// Appends the transcript block, verbatim.
fn push_transcript(prompt: &mut String, transcript: &str) {
    prompt.push_str("\nTranscript:\n");
    prompt.push_str(transcript);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
