//! Action-item extraction.
//!
//! Obligation patterns run over the whole cleaned text (not per sentence) in
//! table order; every match of every pattern is a candidate. Candidates carry
//! their own assignee/due-date/priority derivation, then deduplicate on the
//! case-normalized description — first occurrence wins, so pattern order is
//! the tie-break.

use std::collections::HashSet;

use chrono::{Duration, Utc};

use minutes_core::{ActionItem, ActionStatus, Language, Priority, Reminder};

use crate::patterns::{self, PatternTables};

/// Candidate descriptions at or below this length are noise, not obligations.
const MIN_DESCRIPTION_CHARS: usize = 3;
/// Length cap for the provenance fragment kept on each item.
const PROVENANCE_CHARS: usize = 100;

/// Extract deduplicated, prioritized action items from cleaned text.
#[must_use]
pub fn extract_action_items(text: &str, language: Language) -> Vec<ActionItem> {
    let tables = patterns::tables(language);
    let mut items = Vec::new();

    for pattern in &tables.obligation_patterns {
        for caps in pattern.captures_iter(text) {
            let description = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if description.chars().count() <= MIN_DESCRIPTION_CHARS {
                continue;
            }

            let assignee = extract_assignee(&description, tables);
            let due_date = extract_due_date(&description, tables);
            let priority = evaluate_priority(&description, tables);
            let provenance: String = description.chars().take(PROVENANCE_CHARS).collect();

            items.push(ActionItem {
                description,
                assignee,
                priority,
                due_date,
                status: ActionStatus::Pending,
                provenance,
            });
        }
    }

    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.dedup_key()));
    items
}

/// Responsible party named inside the candidate text, if any.
fn extract_assignee(text: &str, tables: &PatternTables) -> Option<String> {
    tables
        .assignee_patterns
        .iter()
        .find_map(|pattern| {
            pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .filter(|s| !s.is_empty())
}

/// Deadline phrase inside the candidate text, kept verbatim.
fn extract_due_date(text: &str, tables: &PatternTables) -> Option<String> {
    tables.due_patterns.iter().find_map(|pattern| {
        pattern.captures(text).map(|caps| {
            caps.get(1)
                .map_or_else(|| caps[0].trim(), |m| m.as_str().trim())
                .to_string()
        })
    })
}

/// High-priority keywords take precedence over low-priority ones; with
/// neither, the item stays medium.
fn evaluate_priority(text: &str, tables: &PatternTables) -> Priority {
    let lower = text.to_lowercase();
    if contains_any(&lower, tables.high_priority) {
        Priority::High
    } else if contains_any(&lower, tables.low_priority) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}

/// Build a reminder for one action item, `days_ahead` days from now.
///
/// The message carries the description and, when present, the assignee.
#[must_use]
pub fn build_reminder(item: &ActionItem, language: Language, days_ahead: i64) -> Reminder {
    let mut message = match language {
        Language::Zh => format!("待办事项提醒：{}", item.description),
        Language::En => format!("Action item reminder: {}", item.description),
    };
    if let Some(assignee) = &item.assignee {
        match language {
            Language::Zh => message.push_str(&format!("（责任人：{assignee}）")),
            Language::En => message.push_str(&format!(" (assignee: {assignee})")),
        }
    }

    Reminder {
        description: item.description.clone(),
        assignee: item.assignee.clone(),
        due_date: item.due_date.clone(),
        priority: item.priority,
        remind_at: Utc::now() + Duration::days(days_ahead),
        message,
    }
}
