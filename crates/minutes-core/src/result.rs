use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ActionItem, Language, QualityReport, StructuredSummary, TimelineChart, TimelineEvent};

/// Aggregated output of one pipeline run. Ephemeral: persistence, if any, is
/// the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// First 500 characters of the raw parsed text.
    pub raw_text_sample: String,
    /// First 500 characters of the cleaned text the extractors saw.
    pub clean_text_sample: String,
    pub quality: QualityReport,
    /// The summary as returned by the generation service, or the
    /// deterministic paragraph fallback.
    pub summary_text: String,
    pub summary: StructuredSummary,
    pub action_items: Vec<ActionItem>,
    /// Ordered by `sequence_index` ascending; indices are unique.
    pub timeline: Vec<TimelineEvent>,
    pub chart: TimelineChart,
    pub language: Language,
    pub created_at: DateTime<Utc>,
}
