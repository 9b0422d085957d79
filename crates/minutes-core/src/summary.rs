use serde::{Deserialize, Serialize};

/// A number lifted from transcript text: integer unless the source token
/// carried a decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Int(i64),
    Float(f64),
}

/// Incidental entities scanned from the original transcript text (not the
/// generated summary): time expressions, date expressions, bare numbers and,
/// for CJK text, person-name candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyInformation {
    /// Deduplicated person-name candidates. Order is not meaningful.
    pub persons: Vec<String>,
    pub times: Vec<String>,
    pub dates: Vec<String>,
    pub numbers: Vec<NumberValue>,
}

/// Section-decomposed form of a free-text meeting summary.
///
/// Sections the summary text never mentioned stay empty; absence is never an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredSummary {
    pub topic: String,
    pub discussion_issues: Vec<String>,
    pub discussion_points: Vec<String>,
    pub decisions: Vec<String>,
    pub action_item_mentions: Vec<String>,
    pub key_information: KeyInformation,
}
