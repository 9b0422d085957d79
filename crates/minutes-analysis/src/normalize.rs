//! Transcript parsing, cleanup, and segmentation.
//!
//! Raw bytes come in as plain text or HTML/XML markup; markup is flattened to
//! paragraph-joined text first. Cleanup collapses whitespace and strips
//! characters outside the language allow-list while keeping blank-line
//! paragraph boundaries intact, so paragraph segmentation (and the summary
//! fallback built on it) stays meaningful downstream.

use std::sync::LazyLock;

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use minutes_core::Language;

use crate::error::AnalysisError;
use crate::patterns;
use crate::types::TranscriptFormat;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));
static ZH_SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[。！？；]+").expect("valid regex"));

/// Decode transcript bytes into raw text.
///
/// # Errors
///
/// Returns [`AnalysisError::Parse`] when the bytes are not valid UTF-8 or the
/// markup cannot be read.
pub fn parse_transcript(bytes: &[u8], format: TranscriptFormat) -> Result<String, AnalysisError> {
    let text = std::str::from_utf8(bytes).map_err(|e| AnalysisError::Parse {
        reason: format!("transcript is not valid UTF-8: {e}"),
    })?;
    match format {
        TranscriptFormat::PlainText => Ok(text.to_string()),
        TranscriptFormat::Markup => flatten_markup(text),
    }
}

/// Flatten HTML/XML markup to paragraph-joined plain text.
///
/// Block elements start a new paragraph; `script`/`style` content is dropped.
fn flatten_markup(markup: &str) -> Result<String, AnalysisError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);
    reader.config_mut().check_end_names = false;

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut skip_depth = 0usize;

    let flush = |current: &mut String, paragraphs: &mut Vec<String>| {
        if !current.trim().is_empty() {
            paragraphs.push(current.trim().to_string());
        }
        current.clear();
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_lowercase();
                if matches!(name.as_str(), "script" | "style") {
                    skip_depth += 1;
                } else if is_block_element(&name) {
                    flush(&mut current, &mut paragraphs);
                }
            }
            Ok(Event::End(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_lowercase();
                if matches!(name.as_str(), "script" | "style") {
                    skip_depth = skip_depth.saturating_sub(1);
                } else if is_block_element(&name) {
                    flush(&mut current, &mut paragraphs);
                }
            }
            Ok(Event::Empty(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_lowercase();
                if name == "br" {
                    flush(&mut current, &mut paragraphs);
                }
            }
            Ok(Event::Text(e)) => {
                if skip_depth == 0 {
                    let text = e.unescape().unwrap_or_default();
                    append_fragment(&mut current, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if skip_depth == 0 {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    append_fragment(&mut current, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AnalysisError::Parse {
                    reason: format!("malformed markup: {e}"),
                })
            }
            _ => {}
        }
    }
    flush(&mut current, &mut paragraphs);

    Ok(paragraphs.join("\n\n"))
}

fn is_block_element(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "section"
            | "article"
            | "li"
            | "tr"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "blockquote"
    )
}

fn append_fragment(current: &mut String, fragment: &str) {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return;
    }
    if !current.is_empty() {
        current.push(' ');
    }
    current.push_str(trimmed);
}

/// Clean raw text for extraction: strip characters outside the language
/// allow-list and collapse whitespace runs to a single space, keeping
/// blank-line paragraph boundaries.
#[must_use]
pub fn clean_text(raw: &str, language: Language) -> String {
    let tables = patterns::tables(language);
    let filtered = tables.disallowed.replace_all(raw, "");

    let mut paragraphs: Vec<String> = Vec::new();
    for block in PARAGRAPH_BREAK.split(&filtered) {
        let collapsed = block.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            paragraphs.push(collapsed);
        }
    }
    paragraphs.join("\n\n")
}

/// Split text on blank-line boundaries. Empty blocks are dropped.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Split text into sentences using the language profile.
#[must_use]
pub fn split_sentences(text: &str, language: Language) -> Vec<String> {
    match language {
        Language::Zh => ZH_SENTENCE_END
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect(),
        Language::En => split_sentences_en(text),
    }
}

/// Abbreviations that end with a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "no", "fig", "al", "approx",
];

/// Latin-profile sentence boundary detector.
///
/// A terminator run ends a sentence when it is followed by whitespace and a
/// capital letter, digit, or opening quote/paren (or end of text), and a lone
/// period does not follow a known abbreviation or a single initial.
fn split_sentences_en(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if matches!(chars[i], '.' | '!' | '?') {
            let mut end = i;
            while end + 1 < chars.len() && matches!(chars[end + 1], '.' | '!' | '?') {
                end += 1;
            }
            let boundary = if chars[i] == '.' && end == i {
                !ends_with_abbreviation(&chars[start..i]) && starts_new_sentence(&chars[end + 1..])
            } else {
                starts_new_sentence(&chars[end + 1..])
            };
            if boundary {
                push_sentence(&chars[start..=end], &mut sentences);
                start = end + 1;
            }
            i = end + 1;
        } else {
            i += 1;
        }
    }
    if start < chars.len() {
        push_sentence(&chars[start..], &mut sentences);
    }
    sentences
}

fn push_sentence(chars: &[char], sentences: &mut Vec<String>) {
    let sentence: String = chars.iter().collect::<String>().trim().to_string();
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

fn starts_new_sentence(rest: &[char]) -> bool {
    let Some(first) = rest.first() else {
        return true;
    };
    if !first.is_whitespace() {
        return false;
    }
    match rest.iter().find(|c| !c.is_whitespace()) {
        None => true,
        Some(&c) => c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '('),
    }
}

fn ends_with_abbreviation(before: &[char]) -> bool {
    let tail: Vec<char> = before
        .iter()
        .rev()
        .take_while(|c| c.is_ascii_alphabetic() || **c == '.')
        .copied()
        .collect();
    if tail.is_empty() {
        return false;
    }
    let word: String = tail.into_iter().rev().collect::<String>().to_lowercase();
    // A single letter is an initial ("J. Smith").
    if word.chars().count() == 1 {
        return true;
    }
    ABBREVIATIONS.contains(&word.as_str())
}

/// Tokenize text: per-character for the CJK profile, whitespace-delimited
/// words with punctuation trimmed for the Latin profile.
#[must_use]
pub fn tokenize(text: &str, language: Language) -> Vec<String> {
    match language {
        Language::Zh => text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect(),
        Language::En => text
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|w| !w.is_empty())
            .collect(),
    }
}

/// Drop tokens present in the language stopword set (case-insensitive).
#[must_use]
pub fn remove_stopwords(tokens: &[String], language: Language) -> Vec<String> {
    let tables = patterns::tables(language);
    tokens
        .iter()
        .filter(|t| !tables.stopwords.contains(t.to_lowercase().as_str()))
        .cloned()
        .collect()
}
