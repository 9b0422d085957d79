//! Structured summary generation.
//!
//! The engine builds a section-labelled prompt, calls the generation service,
//! and parses the returned free text into a [`StructuredSummary`]. Any service
//! failure is absorbed locally: the summary degrades to a deterministic
//! paragraph-truncation fallback and the pipeline carries on.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;

use minutes_core::{KeyInformation, Language, NumberValue, StructuredSummary};

use crate::error::ServiceError;
use crate::normalize;
use crate::patterns::{self, SectionKind};
use crate::types::ServiceConfig;

/// Sampling temperature for summary generation.
const TEMPERATURE: f64 = 0.3;
/// Completion budget per request.
const MAX_TOKENS: u32 = 2000;
/// Paragraphs kept by the deterministic fallback.
const FALLBACK_PARAGRAPHS: usize = 3;

/// Chat-completions client for the generation service.
pub struct GenerationClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

impl GenerationClient {
    /// Create a new `GenerationClient` with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Http`] if the underlying HTTP client cannot be
    /// built.
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Request one completion for the given prompts.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] on transport failure, a non-success status,
    /// or a response without `choices[0].message.content`. All three are
    /// treated identically by the caller (fallback).
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ServiceError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status(response.status()));
        }

        let body: serde_json::Value = response.json().await?;
        body.get("choices")
            .and_then(serde_json::Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| {
                ServiceError::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}

/// Generate the summary text and its structured form.
///
/// With no client (service not configured) or on any service error the
/// summary text is the deterministic paragraph fallback. Incidental entities
/// are always extracted from the original `clean_text`, not the generated
/// summary.
pub async fn generate(
    client: Option<&GenerationClient>,
    clean_text: &str,
    language: Language,
) -> (String, StructuredSummary) {
    let outcome = match client {
        Some(c) => {
            let (system, user) = build_prompts(clean_text, language);
            c.complete(&system, &user).await
        }
        None => Err(ServiceError::NotConfigured),
    };

    let summary_text = match outcome {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "generation service unavailable, using paragraph fallback"
            );
            fallback_summary(clean_text, language)
        }
    };

    let mut structured = parse_summary(&summary_text, language);
    structured.key_information = extract_key_information(clean_text, language);
    (summary_text, structured)
}

/// Build the (system, user) prompt pair in the invocation language.
///
/// The system prompt pins the exact section labels the parser recognizes.
#[must_use]
pub fn build_prompts(text: &str, language: Language) -> (String, String) {
    match language {
        Language::Zh => (
            "你是一个专业的会议纪要助手。请根据以下会议文本，生成一份结构清晰的会议纪要摘要。\n\n\
要求：\n\
1. 摘要需要包含以下部分：\n\
   - 会议主题\n\
   - 主要讨论问题\n\
   - 关键讨论点\n\
   - 达成的决议\n\
   - 待办事项（行动项）\n\n\
2. 每个部分用简洁明了的语言概括\n\
3. 保持专业性和准确性\n\
4. 提取关键数字、时间点和责任人\n\n\
请直接输出摘要内容，不要添加额外说明。"
                .to_string(),
            format!("以下是会议文本：\n\n{text}\n\n请生成会议纪要摘要："),
        ),
        Language::En => (
            "You are a professional meeting minutes assistant. Please generate a structured \
meeting summary based on the following meeting text.\n\n\
Requirements:\n\
1. The summary should include the following sections:\n\
   - Meeting Topic\n\
   - Main Discussion Issues\n\
   - Key Discussion Points\n\
   - Decisions Made\n\
   - Action Items (Todo Items)\n\n\
2. Use concise and clear language for each section\n\
3. Maintain professionalism and accuracy\n\
4. Extract key numbers, time points, and responsible persons\n\n\
Please output the summary content directly, without additional explanations."
                .to_string(),
            format!("Here is the meeting text:\n\n{text}\n\nPlease generate the meeting summary:"),
        ),
    }
}

/// Deterministic summary used when the service is unavailable: the first
/// three paragraphs, with an omission marker when the text was longer.
#[must_use]
pub fn fallback_summary(text: &str, language: Language) -> String {
    let paragraphs = normalize::split_paragraphs(text);
    if paragraphs.len() <= FALLBACK_PARAGRAPHS {
        paragraphs.join("\n\n")
    } else {
        let marker = match language {
            Language::Zh => "…（更多内容省略）",
            Language::En => "... (more omitted)",
        };
        format!(
            "{}\n\n{marker}",
            paragraphs[..FALLBACK_PARAGRAPHS].join("\n\n")
        )
    }
}

/// Parse generated summary text into its structural sections.
///
/// Each section matches lines of the form `<label>[:：] <content>`. Repeated
/// labels are collected in document order; the topic keeps its first match.
/// Missing sections stay empty. `key_information` is left default — it is
/// extracted from the original text, not the summary.
#[must_use]
pub fn parse_summary(summary_text: &str, language: Language) -> StructuredSummary {
    let tables = patterns::tables(language);
    let mut summary = StructuredSummary::default();

    for matcher in &tables.sections {
        let mut matches = matcher
            .pattern
            .captures_iter(summary_text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        match matcher.kind {
            SectionKind::Topic => {
                if let Some(first) = matches.next() {
                    summary.topic = first;
                }
            }
            SectionKind::Issues => summary.discussion_issues = matches.collect(),
            SectionKind::Points => summary.discussion_points = matches.collect(),
            SectionKind::Decisions => summary.decisions = matches.collect(),
            SectionKind::ActionItems => summary.action_item_mentions = matches.collect(),
        }
    }

    summary
}

/// Scan the original transcript text for incidental entities: times, dates,
/// bare numbers, and (CJK only) person-name candidates.
#[must_use]
pub fn extract_key_information(text: &str, language: Language) -> KeyInformation {
    let tables = patterns::tables(language);
    let mut info = KeyInformation::default();

    for pattern in &tables.time_patterns {
        info.times
            .extend(pattern.find_iter(text).map(|m| m.as_str().to_string()));
    }
    for pattern in &tables.date_patterns {
        info.dates
            .extend(pattern.find_iter(text).map(|m| m.as_str().to_string()));
    }
    for m in tables.number_pattern.find_iter(text) {
        let token = m.as_str();
        if token.contains('.') {
            if let Ok(value) = token.parse::<f64>() {
                info.numbers.push(NumberValue::Float(value));
            }
        } else if let Ok(value) = token.parse::<i64>() {
            info.numbers.push(NumberValue::Int(value));
        }
    }
    if let Some(person_pattern) = &tables.person_pattern {
        let mut seen = HashSet::new();
        for m in person_pattern.find_iter(text) {
            let name = m.as_str().to_string();
            if seen.insert(name.clone()) {
                info.persons.push(name);
            }
        }
    }

    info
}
