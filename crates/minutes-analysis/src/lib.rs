//! Meeting-transcript analysis pipeline.
//!
//! Parses a transcript file, scores its quality, produces a structured
//! summary (via the generation service, with a deterministic paragraph
//! fallback), extracts prioritized action items and a chronological event
//! timeline, and serializes the aggregate for export.

pub mod actions;
pub mod error;
pub mod export;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod quality;
pub mod summary;
pub mod timeline;
pub mod types;

pub use error::{AnalysisError, ServiceError};
pub use pipeline::run_pipeline;
pub use summary::GenerationClient;
pub use types::{ExportFormat, ServiceConfig, TranscriptFormat};
