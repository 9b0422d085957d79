//! Analyze command handler.
//!
//! Resolves the transcript format from the file extension and the language
//! from the flag (auto-detecting when asked), then runs the pipeline and
//! writes the chosen export. A missing service configuration is not fatal:
//! the summary degrades to the deterministic fallback.

use std::path::Path;

use minutes_analysis::{export, run_pipeline, ExportFormat, ServiceConfig, TranscriptFormat};
use minutes_core::Language;

pub(crate) async fn run(
    file: &Path,
    language: &str,
    export_format: &str,
    output: Option<&Path>,
    calendar: Option<&Path>,
) -> anyhow::Result<()> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let format = TranscriptFormat::from_extension(extension)?;
    let export_format: ExportFormat = export_format.parse()?;

    let bytes = std::fs::read(file)?;

    let language = if language == "auto" {
        let text = String::from_utf8_lossy(&bytes);
        let detected = Language::detect(&text);
        tracing::info!(language = %detected, "auto-detected transcript language");
        detected
    } else {
        language.parse::<Language>()?
    };

    let service = match ServiceConfig::from_env() {
        Ok(config) => Some(config),
        Err(reason) => {
            tracing::warn!(%reason, "generation service not configured, summary will fall back");
            None
        }
    };

    let result = run_pipeline(&bytes, format, language, service.as_ref()).await?;

    let rendered = export::render(&result, export_format)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "wrote export");
        }
        None => println!("{rendered}"),
    }

    if let Some(path) = calendar {
        std::fs::write(path, export::export_calendar(&result.action_items))?;
        tracing::info!(
            path = %path.display(),
            items = result.action_items.len(),
            "wrote calendar export"
        );
    }

    Ok(())
}
