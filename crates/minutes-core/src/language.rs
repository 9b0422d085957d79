use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Transcript language profile.
///
/// `Zh` selects the CJK processing profile (character tokenization, CJK
/// punctuation allow-list, `。！？；` sentence terminators); `En` selects the
/// Latin profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Language {
    /// Detect the dominant language of `text` by counting CJK ideographs
    /// against ASCII letters. Ties favor `En`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let mut cjk = 0usize;
        let mut latin = 0usize;
        for ch in text.chars() {
            if ('\u{4e00}'..='\u{9fa5}').contains(&ch) {
                cjk += 1;
            } else if ch.is_ascii_alphabetic() {
                latin += 1;
            }
        }
        if cjk > latin {
            Self::Zh
        } else {
            Self::En
        }
    }

    /// The two-letter language code (`"zh"` or `"en"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            other => Err(CoreError::InvalidLanguage(other.to_string())),
        }
    }
}
