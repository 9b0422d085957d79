use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Language;

/// Action-item priority. `rank` gives the numeric form used in tabular
/// exports (1 = low, 2 = medium, 3 = high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Human-readable label in the report language.
    #[must_use]
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Low, Language::Zh) => "低",
            (Self::Medium, Language::Zh) => "中",
            (Self::High, Language::Zh) => "高",
            (Self::Low, Language::En) => "low",
            (Self::Medium, Language::En) => "medium",
            (Self::High, Language::En) => "high",
        }
    }
}

/// Lifecycle state of an action item. Extraction always starts at `Pending`;
/// the remaining states exist for consumers that track items afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// An inferred obligation: what must be done, by whom, by when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    /// Joined non-empty capture groups of the matching obligation pattern.
    /// Always more than three characters.
    pub description: String,
    /// Responsible party, when a responsibility phrase named one.
    pub assignee: Option<String>,
    pub priority: Priority,
    /// Deadline exactly as it appeared in the text. Never normalized.
    pub due_date: Option<String>,
    pub status: ActionStatus,
    /// Leading fragment of the candidate text the item was derived from.
    pub provenance: String,
}

impl ActionItem {
    /// Identity key for deduplication: case-normalized, trimmed description.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        self.description.trim().to_lowercase()
    }
}

/// A scheduled nudge for one action item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub description: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub priority: Priority,
    pub remind_at: DateTime<Utc>,
    pub message: String,
}
