use thiserror::Error;

/// Fatal pipeline errors. These abort the run and surface to the caller.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("transcript parse error: {reason}")]
    Parse { reason: String },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures talking to the generation service.
///
/// Always recovered locally by the deterministic paragraph fallback; never
/// surfaced through [`AnalysisError`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed service response: {0}")]
    MalformedResponse(String),

    #[error("generation service not configured")]
    NotConfigured,
}
