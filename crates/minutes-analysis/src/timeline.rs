//! Timeline extraction and chart building.
//!
//! Sentences are scanned in index order. Time-expression patterns are tried
//! top-to-bottom and the first match anchors the sentence as an explicit
//! event; sentences without a time can still be promoted by an importance
//! keyword, with a synthesized label. Event order is scan order, so
//! `sequence_index` is strictly increasing.

use minutes_core::{ChartPoint, Language, TimelineChart, TimelineEvent};

use crate::normalize;
use crate::patterns::{self, PatternTables};

/// Title length cap, ellipsized when exceeded.
const TITLE_CHARS: usize = 50;
/// Description length cap inside chart point values.
const CHART_DESCRIPTION_CHARS: usize = 100;

/// Extract timeline events from cleaned text.
#[must_use]
pub fn extract_timeline(text: &str, language: Language) -> Vec<TimelineEvent> {
    let tables = patterns::tables(language);
    let sentences = normalize::split_sentences(text, language);
    let mut events: Vec<TimelineEvent> = Vec::new();

    for (sequence_index, sentence) in sentences.iter().enumerate() {
        if let Some(time_label) = first_time_match(sentence, tables) {
            events.push(TimelineEvent {
                time_label,
                title: truncate_title(sentence),
                description: sentence.clone(),
                sequence_index,
                has_explicit_time: true,
            });
        } else if has_importance_keyword(sentence, tables) {
            let time_label = match language {
                Language::Zh => format!("事件_{}", events.len()),
                Language::En => format!("event_{}", events.len()),
            };
            events.push(TimelineEvent {
                time_label,
                title: truncate_title(sentence),
                description: sentence.clone(),
                sequence_index,
                has_explicit_time: false,
            });
        }
    }

    events
}

/// First time token captured by the first matching pattern, in table order.
fn first_time_match(sentence: &str, tables: &PatternTables) -> Option<String> {
    tables.timeline_patterns.iter().find_map(|pattern| {
        pattern.captures(sentence).map(|caps| {
            caps.get(1)
                .map_or_else(|| caps[0].trim(), |m| m.as_str().trim())
                .to_string()
        })
    })
}

fn has_importance_keyword(sentence: &str, tables: &PatternTables) -> bool {
    let lower = sentence.to_lowercase();
    tables
        .importance_keywords
        .iter()
        .any(|k| lower.contains(&k.to_lowercase()))
}

fn truncate_title(sentence: &str) -> String {
    if sentence.chars().count() <= TITLE_CHARS {
        sentence.trim().to_string()
    } else {
        let head: String = sentence.chars().take(TITLE_CHARS - 3).collect();
        format!("{}...", head.trim_end())
    }
}

/// Build the chart spec: one category and one scatter point per event.
/// Explicit-time events get larger markers.
#[must_use]
pub fn build_chart(events: &[TimelineEvent], language: Language) -> TimelineChart {
    let title = match language {
        Language::Zh => "会议时间线",
        Language::En => "Meeting Timeline",
    };

    let categories = events.iter().map(|e| e.time_label.clone()).collect();
    let points = events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let marker = match (language, event.has_explicit_time) {
                (Language::Zh, true) => "有具体时间",
                (Language::Zh, false) => "无具体时间",
                (Language::En, true) => "explicit time",
                (Language::En, false) => "no explicit time",
            };
            ChartPoint {
                name: event.title.clone(),
                value: (
                    index,
                    event.time_label.clone(),
                    event
                        .description
                        .chars()
                        .take(CHART_DESCRIPTION_CHARS)
                        .collect(),
                    marker.to_string(),
                ),
                point_size: if event.has_explicit_time { 10 } else { 6 },
            }
        })
        .collect();

    TimelineChart {
        title: title.to_string(),
        kind: "scatter".to_string(),
        categories,
        points,
    }
}
