//! Shared interchange types for the minutes pipeline.
//!
//! Everything a pipeline run produces — quality report, structured summary,
//! action items, timeline events, chart spec — lives here with serde derives
//! so the canonical JSON form round-trips losslessly.

use thiserror::Error;

mod action;
mod language;
mod report;
mod result;
mod summary;
mod timeline;

pub use action::{ActionItem, ActionStatus, Priority, Reminder};
pub use language::Language;
pub use report::{QualityReport, Verdict};
pub use result::PipelineResult;
pub use summary::{KeyInformation, NumberValue, StructuredSummary};
pub use timeline::{ChartPoint, TimelineChart, TimelineEvent};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid language code: {0}")]
    InvalidLanguage(String),
}
