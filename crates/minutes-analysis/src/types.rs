use std::str::FromStr;

use crate::error::AnalysisError;

/// Input format of an uploaded transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    /// Raw UTF-8 text, used as-is.
    PlainText,
    /// HTML/XML markup, flattened to paragraph-joined text.
    Markup,
}

impl TranscriptFormat {
    /// Map a file extension (without the dot, any case) to a format.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnsupportedFormat`] for extensions the
    /// pipeline cannot flatten to text.
    pub fn from_extension(ext: &str) -> Result<Self, AnalysisError> {
        match ext.to_lowercase().as_str() {
            "txt" | "md" | "text" => Ok(Self::PlainText),
            "html" | "htm" | "xml" => Ok(Self::Markup),
            other => Err(AnalysisError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Output rendering of a [`minutes_core::PipelineResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless JSON serialization of the whole result.
    Canonical,
    /// Long-form Markdown report.
    Report,
    /// The report wrapped in a minimal styled HTML container.
    Document,
}

impl FromStr for ExportFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "report" => Ok(Self::Report),
            "document" => Ok(Self::Document),
            other => Err(AnalysisError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Generation-service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Chat-completions endpoint URL.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout. The service call is the only blocking I/O in the
    /// pipeline; on timeout the summary falls back locally.
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Build config from environment variables.
    ///
    /// Required: `MINUTES_API_URL`, `MINUTES_API_KEY`. Optional:
    /// `MINUTES_MODEL` (default `deepseek-chat`), `MINUTES_TIMEOUT_SECS`
    /// (default 60).
    ///
    /// # Errors
    ///
    /// Returns an error string listing any missing variables.
    pub fn from_env() -> Result<Self, String> {
        let get = |key: &str| -> Option<String> { std::env::var(key).ok() };

        let api_url = get("MINUTES_API_URL");
        let api_key = get("MINUTES_API_KEY");

        let mut missing = Vec::new();
        if api_url.is_none() {
            missing.push("MINUTES_API_URL");
        }
        if api_key.is_none() {
            missing.push("MINUTES_API_KEY");
        }
        if !missing.is_empty() {
            return Err(format!("missing service env vars: {}", missing.join(", ")));
        }

        let timeout_secs = match get("MINUTES_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("invalid MINUTES_TIMEOUT_SECS: {e}"))?,
            None => 60,
        };

        Ok(Self {
            api_url: api_url.unwrap_or_default(),
            api_key: api_key.unwrap_or_default(),
            model: get("MINUTES_MODEL").unwrap_or_else(|| "deepseek-chat".to_string()),
            timeout_secs,
        })
    }
}
