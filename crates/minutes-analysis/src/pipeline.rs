//! Pipeline orchestration.

use chrono::Utc;

use minutes_core::{Language, PipelineResult};

use crate::actions;
use crate::error::AnalysisError;
use crate::normalize;
use crate::quality;
use crate::summary::{self, GenerationClient};
use crate::timeline;
use crate::types::{ServiceConfig, TranscriptFormat};

/// Characters of raw/clean text kept on the result as samples.
const SAMPLE_CHARS: usize = 500;

/// Run the full analysis pipeline over one transcript.
///
/// 1. Parse bytes into raw text (fatal on unknown/broken input).
/// 2. Clean and normalize for the language profile.
/// 3. Score quality.
/// 4. Generate and parse the structured summary; service failures fall back
///    to paragraph truncation and never abort the run.
/// 5. Extract action items and timeline events; build the chart spec.
///
/// The pipeline holds no state across invocations; concurrent runs share
/// only the immutable pattern tables.
///
/// # Errors
///
/// Returns [`AnalysisError`] only for parse/format failures.
pub async fn run_pipeline(
    bytes: &[u8],
    format: TranscriptFormat,
    language: Language,
    service: Option<&ServiceConfig>,
) -> Result<PipelineResult, AnalysisError> {
    tracing::info!(?format, language = %language, "parsing transcript");
    let raw_text = normalize::parse_transcript(bytes, format)?;

    let clean = normalize::clean_text(&raw_text, language);
    tracing::info!(chars = clean.chars().count(), "cleaned transcript text");

    let quality = quality::evaluate(&clean, language);
    tracing::debug!(
        readability = quality.readability_score,
        completeness = quality.completeness_score,
        "scored transcript quality"
    );

    let client = match service {
        Some(config) => match GenerationClient::new(config) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "could not build generation client, summary will fall back"
                );
                None
            }
        },
        None => None,
    };
    let (summary_text, summary) = summary::generate(client.as_ref(), &clean, language).await;

    let action_items = actions::extract_action_items(&clean, language);
    tracing::info!(count = action_items.len(), "extracted action items");

    let events = timeline::extract_timeline(&clean, language);
    tracing::info!(count = events.len(), "extracted timeline events");
    let chart = timeline::build_chart(&events, language);

    Ok(PipelineResult {
        raw_text_sample: sample(&raw_text),
        clean_text_sample: sample(&clean),
        quality,
        summary_text,
        summary,
        action_items,
        timeline: events,
        chart,
        language,
        created_at: Utc::now(),
    })
}

fn sample(text: &str) -> String {
    text.chars().take(SAMPLE_CHARS).collect()
}
