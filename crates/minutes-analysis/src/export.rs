//! Result serialization: canonical JSON, long-form report, styled document,
//! and the calendar/CSV side-channels over action items and timeline events.

use sha2::{Digest, Sha256};

use minutes_core::{
    ActionItem, ActionStatus, Language, PipelineResult, TimelineEvent, Verdict,
};

use crate::error::AnalysisError;
use crate::types::ExportFormat;

/// Render an aggregated result in the requested format.
///
/// # Errors
///
/// Returns [`AnalysisError::Serialize`] if canonical serialization fails.
/// Unknown format strings are rejected earlier, when parsing
/// [`ExportFormat`].
pub fn render(result: &PipelineResult, format: ExportFormat) -> Result<String, AnalysisError> {
    match format {
        ExportFormat::Canonical => Ok(serde_json::to_string_pretty(result)?),
        ExportFormat::Report => Ok(render_report(result)),
        ExportFormat::Document => Ok(render_document(result)),
    }
}

struct ReportLabels {
    title: &'static str,
    /// Label/value separator: full-width colon for zh, ASCII colon for en.
    colon: &'static str,
    metadata: &'static str,
    processed_at: &'static str,
    language: &'static str,
    quality: &'static str,
    chars: &'static str,
    words: &'static str,
    sentences: &'static str,
    paragraphs: &'static str,
    readability: &'static str,
    completeness: &'static str,
    verdict: &'static str,
    verdict_good: &'static str,
    verdict_needs_improvement: &'static str,
    summary: &'static str,
    action_items: &'static str,
    item_unit: &'static str,
    assignee: &'static str,
    priority: &'static str,
    due_date: &'static str,
    timeline: &'static str,
    event_unit: &'static str,
}

const ZH_LABELS: ReportLabels = ReportLabels {
    title: "会议纪要处理报告",
    colon: "：",
    metadata: "基本信息",
    processed_at: "处理时间",
    language: "语言",
    quality: "文本质量评估",
    chars: "字符数",
    words: "词数",
    sentences: "句子数",
    paragraphs: "段落数",
    readability: "可读性得分",
    completeness: "完整性得分",
    verdict: "总体评价",
    verdict_good: "良好",
    verdict_needs_improvement: "需要改进",
    summary: "会议摘要",
    action_items: "待办事项",
    item_unit: "项",
    assignee: "责任人",
    priority: "优先级",
    due_date: "截止日期",
    timeline: "时间线",
    event_unit: "个事件",
};

const EN_LABELS: ReportLabels = ReportLabels {
    title: "Meeting Minutes Report",
    colon: ": ",
    metadata: "Metadata",
    processed_at: "Processed at",
    language: "Language",
    quality: "Quality Assessment",
    chars: "Characters",
    words: "Words",
    sentences: "Sentences",
    paragraphs: "Paragraphs",
    readability: "Readability score",
    completeness: "Completeness score",
    verdict: "Overall verdict",
    verdict_good: "good",
    verdict_needs_improvement: "needs improvement",
    summary: "Meeting Summary",
    action_items: "Action Items",
    item_unit: "items",
    assignee: "Assignee",
    priority: "Priority",
    due_date: "Due date",
    timeline: "Timeline",
    event_unit: "events",
};

fn labels(language: Language) -> &'static ReportLabels {
    match language {
        Language::Zh => &ZH_LABELS,
        Language::En => &EN_LABELS,
    }
}

/// Long-form Markdown report with a fixed section order: metadata, quality,
/// summary, numbered action items, numbered timeline entries.
fn render_report(result: &PipelineResult) -> String {
    let l = labels(result.language);
    let sep = l.colon;
    let quality = &result.quality;
    let mut out = format!("# {}\n\n", l.title);

    out.push_str(&format!("## {}\n", l.metadata));
    out.push_str(&format!(
        "- {}{sep}{}\n",
        l.processed_at,
        result.created_at.to_rfc3339()
    ));
    out.push_str(&format!("- {}{sep}{}\n\n", l.language, result.language));

    out.push_str(&format!("## {}\n", l.quality));
    out.push_str(&format!("- {}{sep}{}\n", l.chars, quality.char_count));
    out.push_str(&format!("- {}{sep}{}\n", l.words, quality.word_count));
    out.push_str(&format!("- {}{sep}{}\n", l.sentences, quality.sentence_count));
    out.push_str(&format!(
        "- {}{sep}{}\n",
        l.paragraphs, quality.paragraph_count
    ));
    out.push_str(&format!(
        "- {}{sep}{}/100\n",
        l.readability, quality.readability_score
    ));
    out.push_str(&format!(
        "- {}{sep}{}/100\n",
        l.completeness, quality.completeness_score
    ));
    let verdict = match quality.verdict {
        Verdict::Good => l.verdict_good,
        Verdict::NeedsImprovement => l.verdict_needs_improvement,
    };
    out.push_str(&format!("- {}{sep}{}\n\n", l.verdict, verdict));

    out.push_str(&format!("## {}\n", l.summary));
    out.push_str(&format!("{}\n\n", result.summary_text));

    if !result.action_items.is_empty() {
        out.push_str(&format!(
            "## {} ({}{})\n\n",
            l.action_items,
            result.action_items.len(),
            l.item_unit
        ));
        for (i, item) in result.action_items.iter().enumerate() {
            out.push_str(&format!("{}. **{}**\n", i + 1, item.description));
            if let Some(assignee) = &item.assignee {
                out.push_str(&format!("   - {}{sep}{}\n", l.assignee, assignee));
            }
            out.push_str(&format!(
                "   - {}{sep}{}\n",
                l.priority,
                item.priority.label(result.language)
            ));
            if let Some(due) = &item.due_date {
                out.push_str(&format!("   - {}{sep}{}\n", l.due_date, due));
            }
            out.push('\n');
        }
    }

    if !result.timeline.is_empty() {
        out.push_str(&format!(
            "## {} ({}{})\n\n",
            l.timeline,
            result.timeline.len(),
            l.event_unit
        ));
        for (i, event) in result.timeline.iter().enumerate() {
            out.push_str(&format!(
                "{}. **{}** - {}\n",
                i + 1,
                event.time_label,
                event.title
            ));
            let head: String = event.description.chars().take(100).collect();
            out.push_str(&format!("   - {head}...\n\n"));
        }
    }

    out
}

/// The report body wrapped in a minimal styled HTML container.
fn render_document(result: &PipelineResult) -> String {
    let l = labels(result.language);
    let report = render_report(result);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n    <title>{}</title>\n    <style>\n        body {{ font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }}\n        pre {{ white-space: pre-wrap; font-family: inherit; }}\n    </style>\n</head>\n<body>\n<pre>{}</pre>\n</body>\n</html>\n",
        html_escape(l.title),
        html_escape(&report)
    )
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render action items as a minimal iCalendar document.
///
/// One `VEVENT` per item with a stable content-derived UID. Due-date strings
/// are never parsed: `DTSTART` is emitted only when stripping `-`/`/` leaves
/// a plausible all-numeric date, and the verbatim string always travels in
/// `X-DUE-DATE`.
#[must_use]
pub fn export_calendar(items: &[ActionItem]) -> String {
    let mut out = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//minutes//EN\r\n");
    for item in items {
        out.push_str("BEGIN:VEVENT\r\n");
        out.push_str(&format!("UID:{}\r\n", event_uid(&item.description)));
        let summary: String = item.description.chars().take(100).collect();
        out.push_str(&format!("SUMMARY:{}\r\n", ical_escape(&summary)));
        out.push_str(&format!(
            "STATUS:{}\r\n",
            match item.status {
                ActionStatus::Cancelled => "CANCELLED",
                ActionStatus::Pending | ActionStatus::InProgress | ActionStatus::Completed =>
                    "CONFIRMED",
            }
        ));
        out.push_str(&format!("PRIORITY:{}\r\n", ical_priority(item)));
        out.push_str(&format!("X-STATUS:{}\r\n", status_str(item.status)));
        if let Some(assignee) = &item.assignee {
            out.push_str(&format!("X-ASSIGNEE:{}\r\n", ical_escape(assignee)));
        }
        if let Some(due) = &item.due_date {
            let compact: String = due.chars().filter(|c| *c != '-' && *c != '/').collect();
            if !compact.is_empty() && compact.chars().all(|c| c.is_ascii_digit()) {
                out.push_str(&format!("DTSTART;VALUE=DATE:{compact}\r\n"));
            }
            out.push_str(&format!("X-DUE-DATE:{}\r\n", ical_escape(due)));
        }
        out.push_str("END:VEVENT\r\n");
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}

/// Stable event UID derived from the item description.
fn event_uid(description: &str) -> String {
    let hash = Sha256::digest(description.as_bytes());
    let mut hex = String::with_capacity(16);
    for byte in &hash[..8] {
        hex.push_str(&format!("{byte:02x}"));
    }
    format!("todo-{hex}")
}

/// iCalendar priority scale: 1 is highest, 9 lowest.
fn ical_priority(item: &ActionItem) -> u8 {
    match item.priority.rank() {
        3 => 1,
        2 => 5,
        _ => 9,
    }
}

fn ical_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn status_str(status: ActionStatus) -> &'static str {
    match status {
        ActionStatus::Pending => "pending",
        ActionStatus::InProgress => "in_progress",
        ActionStatus::Completed => "completed",
        ActionStatus::Cancelled => "cancelled",
    }
}

/// Render action items as CSV with the fixed header
/// `Description,Assignee,Priority,Due Date,Status`.
#[must_use]
pub fn export_actions_csv(items: &[ActionItem]) -> String {
    let mut out = String::from("Description,Assignee,Priority,Due Date,Status\r\n");
    for item in items {
        out.push_str(&format!(
            "{},{},{},{},{}\r\n",
            csv_escape(&item.description),
            csv_escape(item.assignee.as_deref().unwrap_or("")),
            item.priority.rank(),
            csv_escape(item.due_date.as_deref().unwrap_or("")),
            status_str(item.status),
        ));
    }
    out
}

/// Render timeline events as CSV with the fixed header
/// `Time,Event,Description,Has Time`. Descriptions are capped at 200 chars.
#[must_use]
pub fn export_timeline_csv(events: &[TimelineEvent]) -> String {
    let mut out = String::from("Time,Event,Description,Has Time\r\n");
    for event in events {
        let description: String = event.description.chars().take(200).collect();
        out.push_str(&format!(
            "{},{},{},{}\r\n",
            csv_escape(&event.time_label),
            csv_escape(&event.title),
            csv_escape(&description),
            if event.has_explicit_time { "Yes" } else { "No" },
        ));
    }
    out
}

/// Render timeline events as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`AnalysisError::Serialize`] if serialization fails.
pub fn export_timeline_json(events: &[TimelineEvent]) -> Result<String, AnalysisError> {
    Ok(serde_json::to_string_pretty(events)?)
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_core::Priority;

    fn make_item(description: &str, due: Option<&str>) -> ActionItem {
        ActionItem {
            description: description.to_string(),
            assignee: Some("张三".to_string()),
            priority: Priority::Medium,
            due_date: due.map(ToString::to_string),
            status: ActionStatus::Pending,
            provenance: description.to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // calendar export
    // -----------------------------------------------------------------------

    #[test]
    fn calendar_wraps_events_in_vcalendar() {
        let ical = export_calendar(&[make_item("完成报告", None)]);
        assert!(ical.starts_with("BEGIN:VCALENDAR"));
        assert!(ical.trim_end().ends_with("END:VCALENDAR"));
        assert_eq!(ical.matches("BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn calendar_preserves_verbatim_due_string() {
        let ical = export_calendar(&[make_item("完成报告", Some("12月30日"))]);
        assert!(ical.contains("X-DUE-DATE:12月30日"));
        // Not an all-numeric date once separators are stripped: no DTSTART.
        assert!(!ical.contains("DTSTART"));
    }

    #[test]
    fn calendar_emits_dtstart_for_numeric_dates() {
        let ical = export_calendar(&[make_item("ship it", Some("2024-12-30"))]);
        assert!(ical.contains("DTSTART;VALUE=DATE:20241230"));
        assert!(ical.contains("X-DUE-DATE:2024-12-30"));
    }

    #[test]
    fn calendar_uids_are_stable_per_description() {
        let a = export_calendar(&[make_item("same item", None)]);
        let b = export_calendar(&[make_item("same item", None)]);
        assert_eq!(a, b);
    }

    #[test]
    fn calendar_carries_assignee_priority_and_status() {
        let ical = export_calendar(&[make_item("完成报告", None)]);
        assert!(ical.contains("X-ASSIGNEE:张三"));
        assert!(ical.contains("PRIORITY:5"));
        assert!(ical.contains("X-STATUS:pending"));
        assert!(ical.contains("STATUS:CONFIRMED"));
    }

    #[test]
    fn calendar_escapes_ical_special_characters() {
        let ical = export_calendar(&[make_item("a, b; c", None)]);
        assert!(ical.contains("SUMMARY:a\\, b\\; c"));
    }

    // -----------------------------------------------------------------------
    // csv export
    // -----------------------------------------------------------------------

    #[test]
    fn actions_csv_has_fixed_header_and_numeric_priority() {
        let csv = export_actions_csv(&[make_item("send report", Some("2024-12-30"))]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Description,Assignee,Priority,Due Date,Status")
        );
        assert_eq!(lines.next(), Some("send report,张三,2,2024-12-30,pending"));
    }

    #[test]
    fn csv_fields_with_commas_are_quoted() {
        let csv = export_actions_csv(&[make_item("first, then second", None)]);
        assert!(csv.contains("\"first, then second\""));
    }

    #[test]
    fn csv_quotes_are_doubled() {
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn timeline_csv_truncates_descriptions() {
        let event = TimelineEvent {
            time_label: "10:30".to_string(),
            title: "long".to_string(),
            description: "d".repeat(300),
            sequence_index: 0,
            has_explicit_time: true,
        };
        let csv = export_timeline_csv(&[event]);
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.starts_with("10:30,long,"));
        assert!(data_line.ends_with(",Yes"));
        assert!(data_line.len() < 300);
    }

    #[test]
    fn timeline_json_round_trips() {
        let event = TimelineEvent {
            time_label: "10:30".to_string(),
            title: "standup".to_string(),
            description: "standup at 10:30".to_string(),
            sequence_index: 0,
            has_explicit_time: true,
        };
        let json = export_timeline_json(&[event.clone()]).unwrap();
        let back: Vec<TimelineEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![event]);
    }

    // -----------------------------------------------------------------------
    // html escaping
    // -----------------------------------------------------------------------

    #[test]
    fn html_escape_covers_markup_characters() {
        assert_eq!(html_escape("<b>&\"'</b>"), "&lt;b&gt;&amp;&quot;&#39;&lt;/b&gt;");
    }
}
