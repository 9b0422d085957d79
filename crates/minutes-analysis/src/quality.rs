//! Heuristic transcript quality scoring.

use minutes_core::{Language, QualityReport};

use crate::normalize;

/// Evaluate descriptive statistics and heuristic scores for cleaned text.
///
/// Readability is a simplified reading-ease measure: shorter sentences score
/// higher. Completeness is a pure function of character count: 30 below 50
/// chars, 90 above 10 000, 100 otherwise.
#[must_use]
pub fn evaluate(text: &str, language: Language) -> QualityReport {
    let char_count = text.chars().count();
    let word_count = normalize::tokenize(text, language).len();
    let sentence_count = normalize::split_sentences(text, language).len();
    let paragraph_count = normalize::split_paragraphs(text).len();

    #[allow(clippy::cast_precision_loss)]
    let readability_score = if sentence_count == 0 || word_count == 0 {
        0.0
    } else {
        let raw = match language {
            Language::En => 100.0 - word_count as f64 / sentence_count as f64,
            Language::Zh => 100.0 - (char_count as f64 / sentence_count as f64) / 10.0,
        };
        round2(raw.clamp(0.0, 100.0))
    };

    let completeness_score = if char_count < 50 {
        30.0
    } else if char_count > 10_000 {
        90.0
    } else {
        100.0
    };

    QualityReport {
        char_count,
        word_count,
        sentence_count,
        paragraph_count,
        readability_score,
        completeness_score,
        language_detected: language,
        verdict: QualityReport::verdict_for(completeness_score, readability_score),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_core::Verdict;

    #[test]
    fn empty_text_scores_zero_and_thirty() {
        let report = evaluate("", Language::En);
        assert_eq!(report.char_count, 0);
        assert_eq!(report.word_count, 0);
        assert_eq!(report.sentence_count, 0);
        assert_eq!(report.paragraph_count, 0);
        assert_eq!(report.readability_score, 0.0);
        assert_eq!(report.completeness_score, 30.0);
        assert_eq!(report.verdict, Verdict::NeedsImprovement);
    }

    #[test]
    fn completeness_takes_only_three_values() {
        let short = evaluate("tiny", Language::En);
        assert_eq!(short.completeness_score, 30.0);

        let medium = evaluate(&"word ".repeat(30), Language::En);
        assert_eq!(medium.completeness_score, 100.0);

        let long = evaluate(&"word ".repeat(2500), Language::En);
        assert!(long.char_count > 10_000);
        assert_eq!(long.completeness_score, 90.0);
    }

    #[test]
    fn en_readability_uses_words_per_sentence() {
        // Two sentences of five words each: 100 - 5 = 95.
        let text = "One two three four five. Six seven eight nine ten.";
        let report = evaluate(text, Language::En);
        assert_eq!(report.sentence_count, 2);
        assert_eq!(report.word_count, 10);
        assert_eq!(report.readability_score, 95.0);
    }

    #[test]
    fn zh_readability_uses_chars_per_sentence() {
        // 10 chars per sentence (incl. terminator): 100 - 10/10 = 99.
        let text = "这是一个十字的句子。";
        let report = evaluate(text, Language::Zh);
        assert_eq!(report.sentence_count, 1);
        assert_eq!(report.char_count, 10);
        assert_eq!(report.readability_score, 99.0);
    }

    #[test]
    fn readability_clamped_to_zero_for_very_long_sentences() {
        let text = format!("{}.", "word ".repeat(150));
        let report = evaluate(&text, Language::En);
        assert_eq!(report.readability_score, 0.0);
    }

    #[test]
    fn good_verdict_requires_readable_and_complete_text() {
        let text = "The team met today. We approved the budget. Work starts next week. \
Everyone agreed on the plan quickly.";
        let report = evaluate(text, Language::En);
        assert!(report.char_count >= 50);
        assert_eq!(report.completeness_score, 100.0);
        assert!(report.readability_score > 50.0);
        assert_eq!(report.verdict, Verdict::Good);
    }

    #[test]
    fn language_detected_reflects_invocation_language() {
        let report = evaluate("会议开始。", Language::Zh);
        assert_eq!(report.language_detected, Language::Zh);
    }
}
