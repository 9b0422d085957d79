//! Per-language recognizer tables.
//!
//! All extraction in this crate is pattern-based: times, dates, obligation
//! phrasing, priority keywords, section labels. The tables are compiled once
//! per language into process-wide statics and handed out by shared reference;
//! nothing mutates them after startup, so concurrent pipeline runs can share
//! them freely.
//!
//! Where several patterns could claim the same span, the first pattern in
//! table order wins — extractors iterate top-to-bottom and short-circuit.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use minutes_core::Language;

/// Closed set of structural summary sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Topic,
    Issues,
    Points,
    Decisions,
    ActionItems,
}

/// A section label bound to the regex that recognizes its lines.
pub struct SectionMatcher {
    pub kind: SectionKind,
    pub pattern: Regex,
}

/// Immutable recognizer tables for one language profile.
pub struct PatternTables {
    pub language: Language,
    /// Characters outside the language allow-list, removed during cleanup.
    pub disallowed: Regex,
    pub stopwords: HashSet<&'static str>,
    pub sections: Vec<SectionMatcher>,
    pub time_patterns: Vec<Regex>,
    pub date_patterns: Vec<Regex>,
    pub number_pattern: Regex,
    /// CJK person-name candidates; `None` for the Latin profile.
    pub person_pattern: Option<Regex>,
    pub obligation_patterns: Vec<Regex>,
    pub assignee_patterns: Vec<Regex>,
    pub due_patterns: Vec<Regex>,
    pub high_priority: &'static [&'static str],
    pub low_priority: &'static [&'static str],
    pub timeline_patterns: Vec<Regex>,
    pub importance_keywords: &'static [&'static str],
}

/// Tables for `language`, compiled on first use and shared thereafter.
#[must_use]
pub fn tables(language: Language) -> &'static PatternTables {
    static ZH: LazyLock<PatternTables> = LazyLock::new(|| build_tables(Language::Zh));
    static EN: LazyLock<PatternTables> = LazyLock::new(|| build_tables(Language::En));
    match language {
        Language::Zh => &ZH,
        Language::En => &EN,
    }
}

const ZH_STOPWORDS: &[&str] = &[
    "的", "了", "在", "是", "我", "有", "和", "就", "不", "人", "都", "一", "一个", "上", "也",
    "很", "到", "说", "要", "去", "你", "会", "着", "没有", "看", "好", "自己", "这",
];

const EN_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor", "not",
    "now", "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "own", "s",
    "same", "she", "so", "some", "such", "t", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "you", "your",
];

const ZH_HIGH_PRIORITY: &[&str] = &["紧急", "重要", "尽快", "立即", "马上", "必须", "优先", "关键"];
const ZH_LOW_PRIORITY: &[&str] = &["可选", "次要", "不急", "后续", "将来", "有空", "方便时"];
const EN_HIGH_PRIORITY: &[&str] = &[
    "urgent", "important", "asap", "immediately", "now", "must", "priority", "critical",
];
const EN_LOW_PRIORITY: &[&str] = &[
    "optional", "secondary", "not urgent", "later", "future", "when convenient",
];

const ZH_IMPORTANCE: &[&str] = &["决定", "决议", "达成", "同意", "通过", "确认", "安排", "计划"];
const EN_IMPORTANCE: &[&str] = &[
    "decide", "resolution", "agree", "approve", "confirm", "arrange", "plan",
];

/// Common single-character surnames; 2–4 character runs drawn from this set
/// are treated as person-name candidates in CJK text.
const ZH_SURNAMES: &str = "张王李赵刘陈杨黄吴周徐孙马朱胡林郭何高罗郑梁谢宋唐许韩冯邓曹彭曾萧田\
董袁潘于蒋蔡余杜叶程苏魏吕丁任沈姚卢姜崔钟谭陆汪范金石廖熊郝孔白康毛邱秦江史顾侯邵孟龙万段雷\
钱汤尹黎易常武乔贺赖龚文";

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex")
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| regex(p)).collect()
}

#[allow(clippy::too_many_lines)]
fn build_tables(language: Language) -> PatternTables {
    // Shared between both profiles: numeric times and dates look the same in
    // mixed-script transcripts.
    let time_patterns = compile(&[
        r"\d{1,2}[:：]\d{1,2}",
        r"\d{1,2}\s*(?:AM|PM|am|pm)",
        r"上午\s*\d{1,2}[:：]\d{1,2}",
        r"下午\s*\d{1,2}[:：]\d{1,2}",
    ]);
    let date_patterns = compile(&[
        r"\d{4}[-/]\d{1,2}[-/]\d{1,2}",
        r"\d{1,2}[-/]\d{1,2}[-/]\d{4}",
        r"\d{4}年\d{1,2}月\d{1,2}日",
        r"\d{1,2}月\d{1,2}日",
    ]);
    let number_pattern = regex(r"\b\d+(?:\.\d+)?\b");

    match language {
        Language::Zh => PatternTables {
            language,
            // CJK ideographs, ASCII alphanumerics, CJK punctuation, plus the
            // ASCII time/date/decimal punctuation the extractors match on.
            disallowed: regex(
                r#"[^\x{4e00}-\x{9fa5}a-zA-Z0-9\s，。！？；：、（）《》【】“”‘’"'.,:;!?()\[\]\-/～~]"#,
            ),
            stopwords: ZH_STOPWORDS.iter().copied().collect(),
            sections: vec![
                SectionMatcher {
                    kind: SectionKind::Topic,
                    pattern: regex(r"会议主题[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::Issues,
                    pattern: regex(r"(?:主要讨论问题|讨论议题)[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::Points,
                    pattern: regex(r"(?:关键讨论点|讨论要点)[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::Decisions,
                    pattern: regex(r"(?:达成的决议|决议)[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::ActionItems,
                    pattern: regex(r"(?:待办事项|行动项)[:：]\s*(.+)"),
                },
            ],
            time_patterns,
            date_patterns,
            number_pattern,
            person_pattern: Some(regex(&format!("[{ZH_SURNAMES}]{{2,4}}"))),
            obligation_patterns: compile(&[
                // Modal/necessity phrasing: capture the rest of the clause.
                r"(?:需要|必须|应该)([^。！？；\n]{2,})",
                // Explicit responsibility phrasing.
                r"由\s*([^，。！？；\n]{1,20}?)\s*(?:负责|跟进|处理)\s*([^。！？；\n]*)",
                // Explicitly labelled deadline line.
                r"(?:截止|截至|期限)[:：]\s*([^。！？；\n]+)",
                // Explicit action-item / todo labels.
                r"(?:行动项|待办事项)[:：]\s*([^\n]+)",
                r"(?i)TODO[:：]\s*([^\n]+)",
            ]),
            assignee_patterns: compile(&[
                r"由\s*([^，。！？；\n]+?)\s*(?:负责|跟进|处理)",
                r"([^，。！？；、\n]{1,10}?)\s*负责",
                r"责任人[:：]\s*([^，。！？；\n]+)",
            ]),
            due_patterns: compile(&[
                r"(?:截止|截至|期限)[:：]?\s*([^，。！？；\n]+)",
                r"(?:在|于)\s*([^，。！？；\n]+?)\s*之?前完成",
                r"下周[一二三四五六日]?|明天|后天|大后天",
                r"\d{4}年\d{1,2}月\d{1,2}日",
                r"\d{1,2}月\d{1,2}日",
            ]),
            high_priority: ZH_HIGH_PRIORITY,
            low_priority: ZH_LOW_PRIORITY,
            timeline_patterns: compile(&[
                r"(\d{1,2}[:：]\d{1,2})(?:左右|许)?",
                r"(\d{1,2}[:：]\d{1,2})\s*[～~-]\s*(\d{1,2}[:：]\d{1,2})",
                r"(\d{4}[-/]\d{1,2}[-/]\d{1,2})\s+(\d{1,2}[:：]\d{1,2})",
                r"(\d{4}年\d{1,2}月\d{1,2}日)\s*(?:上午|下午)?\s*(\d{1,2}[:：]\d{1,2})",
                r"(?:接下来|随后|然后|接着)\s*(?:的)?\s*(\d+\s*(?:分钟|小时|天|周|月|年))",
            ]),
            importance_keywords: ZH_IMPORTANCE,
        },
        Language::En => PatternTables {
            language,
            disallowed: regex(r#"[^a-zA-Z0-9\s.,!?;:"'()\[\]{}\-/～~]"#),
            stopwords: EN_STOPWORDS.iter().copied().collect(),
            sections: vec![
                SectionMatcher {
                    kind: SectionKind::Topic,
                    pattern: regex(r"Meeting Topic[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::Issues,
                    pattern: regex(r"Main Discussion Issues[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::Points,
                    pattern: regex(r"Key Discussion Points[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::Decisions,
                    pattern: regex(r"Decisions Made[:：]\s*(.+)"),
                },
                SectionMatcher {
                    kind: SectionKind::ActionItems,
                    pattern: regex(r"Action Items[:：]\s*(.+)"),
                },
            ],
            time_patterns,
            date_patterns,
            number_pattern,
            person_pattern: None,
            obligation_patterns: compile(&[
                // Modal/necessity phrasing: capture the whole clause so the
                // priority keywords around the modal survive.
                r"(?i)([^.!?;\n]*\b(?:must|should|needs? to|ha(?:ve|s) to)\b[^.!?;\n]*)",
                // Explicit responsibility phrasing.
                r"(?i)(?:assigned to|delegated to)\s+([^,.!?;\n]+?)\s+(?:to|for|will)\s+([^.!?;\n]+)",
                // Explicitly labelled deadline line.
                r"(?i)(?:deadline|due date)[:：]\s*([^,.!?;\n]+)",
                // Explicit action-item / todo labels.
                r"(?i)(?:action items?|todo items?)[:：]\s*([^\n]+)",
                r"TODO[:：]\s*([^\n]+)",
            ]),
            assignee_patterns: compile(&[
                r"(?i)assigned to\s+([^,.!?;\n]+)",
                r"\bby\s+([A-Z][a-zA-Z]+)\b",
                r"(?i)responsible person[:：]\s*([^,.!?;\n]+)",
            ]),
            due_patterns: compile(&[
                r"(?i)(?:deadline|due date)[:：]\s*([^,.!?;\n]+)",
                r"(?i)due by\s+([^,.!?;\n]+)",
                r"(?i)\bby\s+(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[-/]\d{1,2}[-/]\d{4})",
                r"(?i)next (?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|week)|tomorrow",
                r"\d{4}[-/]\d{1,2}[-/]\d{1,2}",
                r"\d{1,2}[-/]\d{1,2}[-/]\d{4}",
            ]),
            high_priority: EN_HIGH_PRIORITY,
            low_priority: EN_LOW_PRIORITY,
            timeline_patterns: compile(&[
                r"(\d{1,2}[:：]\d{1,2})",
                r"(\d{1,2}[:：]\d{1,2})\s*[～~-]\s*(\d{1,2}[:：]\d{1,2})",
                r"(\d{4}[-/]\d{1,2}[-/]\d{1,2})\s+(\d{1,2}[:：]\d{1,2})",
                r"(\d{1,2}\s*(?:AM|PM|am|pm))\b",
                r"(?i)\b(?:in|after)\s+(\d+\s*(?:minutes?|hours?|days?|weeks?|months?))\b",
            ]),
            importance_keywords: EN_IMPORTANCE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_shared_per_language() {
        let a: *const PatternTables = tables(Language::Zh);
        let b: *const PatternTables = tables(Language::Zh);
        assert_eq!(a, b, "expected the same static table instance");
        assert_ne!(
            a,
            tables(Language::En) as *const PatternTables,
            "expected distinct per-language tables"
        );
    }

    #[test]
    fn zh_time_pattern_matches_colon_times() {
        let t = tables(Language::Zh);
        assert!(t.time_patterns[0].is_match("会议将于10:30召开"));
        assert!(t.time_patterns[0].is_match("10：30"));
    }

    #[test]
    fn date_patterns_cover_iso_and_cjk_forms() {
        let t = tables(Language::En);
        assert!(t.date_patterns[0].is_match("2024-12-27"));
        assert!(t.date_patterns[1].is_match("12/27/2024"));
        let t = tables(Language::Zh);
        assert!(t.date_patterns[2].is_match("2024年12月27日"));
        assert!(t.date_patterns[3].is_match("12月30日"));
    }

    #[test]
    fn zh_person_pattern_requires_two_surname_chars() {
        let t = tables(Language::Zh);
        let p = t.person_pattern.as_ref().unwrap();
        assert!(p.is_match("李张"));
        assert!(!p.is_match("三"));
    }

    #[test]
    fn en_tables_have_no_person_pattern() {
        assert!(tables(Language::En).person_pattern.is_none());
    }

    #[test]
    fn section_matchers_cover_all_kinds() {
        for lang in [Language::Zh, Language::En] {
            let kinds: Vec<SectionKind> = tables(lang).sections.iter().map(|s| s.kind).collect();
            assert_eq!(
                kinds,
                vec![
                    SectionKind::Topic,
                    SectionKind::Issues,
                    SectionKind::Points,
                    SectionKind::Decisions,
                    SectionKind::ActionItems
                ]
            );
        }
    }
}
