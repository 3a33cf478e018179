//! Command-line entry point — postcraft.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] (defaults when the file is missing, env overrides
//!    on top).
//! 3. Parse arguments: a platform, a transcript file (or `-` for stdin),
//!    optional `--duration MM:SS` and `--keywords a,b,c`.
//! 4. Build the [`ContentPipeline`] — exits early when no provider key is
//!    configured.
//! 5. Run the request on a tokio runtime and print the response as JSON.

use std::io::Read;

use anyhow::{bail, Context, Result};

use postcraft::config::AppConfig;
use postcraft::pipeline::{ContentPipeline, GenerationRequest};
use postcraft::platform::Platform;

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

const USAGE: &str = "\
usage: postcraft <platform> <transcript-file|-> [--duration MM:SS] [--keywords a,b,c]

platforms: youtube, linkedin, twitter, instagram, tiktok, keywords

API keys are read from settings.toml or the environment
(GOOGLE_GEMINI_API_KEY, ANTHROPIC_API_KEY).";

struct Args {
    platform: Platform,
    transcript_source: String,
    duration: Option<String>,
    keywords: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let platform: Platform = args
        .next()
        .with_context(|| format!("missing platform argument\n\n{USAGE}"))?
        .parse()?;

    let transcript_source = args
        .next()
        .with_context(|| format!("missing transcript file argument\n\n{USAGE}"))?;

    let mut duration = None;
    let mut keywords = Vec::new();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--duration" => {
                duration = Some(args.next().context("--duration needs a value (MM:SS)")?);
            }
            "--keywords" => {
                let value = args.next().context("--keywords needs a value (a,b,c)")?;
                keywords = value
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            other => bail!("unknown argument '{other}'\n\n{USAGE}"),
        }
    }

    Ok(Args {
        platform,
        transcript_source,
        duration,
        keywords,
    })
}

/// Read the transcript from a file, or from stdin when the source is `-`.
fn read_transcript(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read transcript from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read transcript file '{source}'"))
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config
    });

    // 3. Arguments
    let args = parse_args(std::env::args().skip(1))?;
    let transcript = read_transcript(&args.transcript_source)?;

    // 4. Pipeline (fails fast when no provider key is configured)
    let pipeline = ContentPipeline::from_config(&config)?;

    let request =
        GenerationRequest::new(transcript, args.platform, args.duration, args.keywords)?;

    // 5. Run on a tokio runtime
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let response = rt.block_on(pipeline.generate(&request))?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
