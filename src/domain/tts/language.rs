use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ISO 639-1 language codes the converter offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "ja")]
    Japanese,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code '{0}' (supported: en, bn, hi, fr, es, de, ja)")]
pub struct LanguageError(pub String);

impl LanguageCode {
    const ALL: [LanguageCode; 7] = [
        LanguageCode::English,
        LanguageCode::Bengali,
        LanguageCode::Hindi,
        LanguageCode::French,
        LanguageCode::Spanish,
        LanguageCode::German,
        LanguageCode::Japanese,
    ];

    /// Every supported language, in the order the form lists them
    pub fn all() -> &'static [LanguageCode] {
        &Self::ALL
    }

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Bengali => "bn",
            LanguageCode::Hindi => "hi",
            LanguageCode::French => "fr",
            LanguageCode::Spanish => "es",
            LanguageCode::German => "de",
            LanguageCode::Japanese => "ja",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Bengali => "Bengali",
            LanguageCode::Hindi => "Hindi",
            LanguageCode::French => "French",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::German => "German",
            LanguageCode::Japanese => "Japanese",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            LanguageCode::English => "🇺🇸",
            LanguageCode::Bengali => "🇧🇩",
            LanguageCode::Hindi => "🇮🇳",
            LanguageCode::French => "🇫🇷",
            LanguageCode::Spanish => "🇪🇸",
            LanguageCode::German => "🇩🇪",
            LanguageCode::Japanese => "🇯🇵",
        }
    }

    /// Label shown in the language picker, e.g. "English 🇺🇸"
    pub fn label(&self) -> String {
        format!("{} {}", self.display_name(), self.flag())
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| LanguageError(code.to_string()))
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
