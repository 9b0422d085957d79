use serde::{Deserialize, Serialize};

use crate::Language;

/// Overall verdict on transcript quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Good,
    NeedsImprovement,
}

/// Descriptive statistics and heuristic scores for one transcript.
///
/// Derived once by the quality scorer and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    /// Heuristic readability in `[0, 100]`, rounded to two decimal places.
    /// `0.0` when the text has no sentences or no tokens.
    pub readability_score: f64,
    /// Length-based completeness: 30 below 50 chars, 90 above 10 000, 100
    /// otherwise.
    pub completeness_score: f64,
    pub language_detected: Language,
    pub verdict: Verdict,
}

impl QualityReport {
    /// `Good` requires completeness above 70 and readability above 50.
    #[must_use]
    pub fn verdict_for(completeness_score: f64, readability_score: f64) -> Verdict {
        if completeness_score > 70.0 && readability_score > 50.0 {
            Verdict::Good
        } else {
            Verdict::NeedsImprovement
        }
    }
}
