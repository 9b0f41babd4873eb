//! Core data types shared by the Arogya crates: languages, chat messages
//! and user-facing notices.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ArogyaError;

// =============================================================================
// Language
// =============================================================================

/// Languages offered by the language selector.
///
/// Only [`Language::English`] and [`Language::Hindi`] have response content.
/// The rest are listed for display and fall back to English for lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "mr")]
    Marathi,
}

impl Language {
    /// Every selectable language, in selector display order.
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Bengali,
        Language::Marathi,
    ];

    /// Languages with full response content.
    pub const SUPPORTED: [Language; 2] = [Language::English, Language::Hindi];

    /// Parse a language code such as `"hi"`. Case and surrounding
    /// whitespace are ignored. Returns `None` for codes outside the set.
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim().to_ascii_lowercase();
        Language::ALL.into_iter().find(|l| l.code() == code)
    }

    /// The short code (`en`, `hi`, ...).
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Bengali => "bn",
            Language::Marathi => "mr",
        }
    }

    /// English display name.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Bengali => "Bengali",
            Language::Marathi => "Marathi",
        }
    }

    /// Name of the language in its own script.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी",
            Language::Tamil => "தமிழ்",
            Language::Telugu => "తెలుగు",
            Language::Bengali => "বাংলা",
            Language::Marathi => "मराठी",
        }
    }

    /// Whether the selector badges this language as popular.
    pub fn is_popular(&self) -> bool {
        matches!(self, Language::English | Language::Hindi)
    }

    /// Whether response content exists for this language.
    pub fn is_supported(&self) -> bool {
        Language::SUPPORTED.contains(self)
    }

    /// The language used for response lookup: itself when supported,
    /// English otherwise.
    pub fn response_language(&self) -> Language {
        if self.is_supported() {
            *self
        } else {
            Language::English
        }
    }

    /// Speech locale for recognition and playback.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::Hindi => "hi-IN",
            _ => "en-IN",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ArogyaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| ArogyaError::UnknownLanguage(s.to_string()))
    }
}

// =============================================================================
// Message
// =============================================================================

/// One entry in a conversation log.
///
/// Created by the owning session and never modified afterwards; hosts only
/// ever receive clones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    /// Language the reply was produced in. `None` for user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl Message {
    /// A message typed or spoken by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_user: true,
            timestamp: Utc::now(),
            language: None,
        }
    }

    /// A reply from the assistant in `language`.
    pub fn bot(text: impl Into<String>, language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_user: false,
            timestamp: Utc::now(),
            language: Some(language),
        }
    }
}

// =============================================================================
// Notices
// =============================================================================

/// Non-fatal conditions surfaced to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The platform has no speech-to-text capability.
    SpeechInputUnsupported,
    /// A transcription attempt failed.
    RecognitionFailed,
    /// The platform has no speech playback capability.
    PlaybackUnsupported,
}

/// A localized, user-visible notice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    /// Build the notice for `kind` in `language` (English fallback).
    pub fn new(kind: NoticeKind, language: Language) -> Self {
        let hindi = language.response_language() == Language::Hindi;
        let (title, description) = match (kind, hindi) {
            (NoticeKind::SpeechInputUnsupported, false) => (
                "Speech recognition not supported",
                "Please type your message instead.",
            ),
            (NoticeKind::SpeechInputUnsupported, true) => (
                "आवाज़ पहचान उपलब्ध नहीं है",
                "कृपया अपना संदेश टाइप करें।",
            ),
            (NoticeKind::RecognitionFailed, false) => (
                "Speech recognition error",
                "Please try again or type your message.",
            ),
            (NoticeKind::RecognitionFailed, true) => (
                "आवाज़ पहचान में त्रुटि",
                "कृपया फिर से कोशिश करें या अपना संदेश टाइप करें।",
            ),
            (NoticeKind::PlaybackUnsupported, false) => (
                "Speech playback not supported",
                "Replies will be shown as text only.",
            ),
            (NoticeKind::PlaybackUnsupported, true) => (
                "आवाज़ में जवाब उपलब्ध नहीं है",
                "जवाब केवल लिखित रूप में दिखाए जाएंगे।",
            ),
        };
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
            assert_eq!(lang.to_string(), lang.code());
        }
    }

    #[test]
    fn test_from_code_is_lenient_about_case_and_whitespace() {
        assert_eq!(Language::from_code(" HI "), Some(Language::Hindi));
        assert_eq!(Language::from_code("En"), Some(Language::English));
    }

    #[test]
    fn test_from_code_unknown() {
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
        let err = "xx".parse::<Language>().unwrap_err();
        assert!(matches!(err, ArogyaError::UnknownLanguage(code) if code == "xx"));
    }

    #[test]
    fn test_unsupported_languages_fall_back_to_english() {
        assert_eq!(Language::Hindi.response_language(), Language::Hindi);
        assert_eq!(Language::English.response_language(), Language::English);
        for lang in [
            Language::Tamil,
            Language::Telugu,
            Language::Bengali,
            Language::Marathi,
        ] {
            assert!(!lang.is_supported());
            assert_eq!(lang.response_language(), Language::English);
        }
    }

    #[test]
    fn test_locales() {
        assert_eq!(Language::Hindi.locale(), "hi-IN");
        assert_eq!(Language::English.locale(), "en-IN");
        assert_eq!(Language::Marathi.locale(), "en-IN");
    }

    #[test]
    fn test_popular_flags() {
        let popular: Vec<_> = Language::ALL.iter().filter(|l| l.is_popular()).collect();
        assert_eq!(popular, vec![&Language::English, &Language::Hindi]);
    }

    #[test]
    fn test_language_serde_uses_codes() {
        let json = serde_json::to_string(&Language::Hindi).unwrap();
        assert_eq!(json, "\"hi\"");
        let parsed: Language = serde_json::from_str("\"bn\"").unwrap();
        assert_eq!(parsed, Language::Bengali);
    }

    #[test]
    fn test_message_constructors() {
        let user = Message::user("dengue symptoms");
        assert!(user.is_user);
        assert_eq!(user.text, "dengue symptoms");
        assert!(user.language.is_none());

        let bot = Message::bot("reply", Language::Hindi);
        assert!(!bot.is_user);
        assert_eq!(bot.language, Some(Language::Hindi));
        assert_ne!(user.id, bot.id);
    }

    #[test]
    fn test_user_message_omits_language_in_json() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert!(json.get("language").is_none());
        assert_eq!(json["is_user"], true);
    }

    #[test]
    fn test_notice_localization() {
        let en = Notice::new(NoticeKind::SpeechInputUnsupported, Language::English);
        assert_eq!(en.title, "Speech recognition not supported");
        assert_eq!(en.description, "Please type your message instead.");

        let hi = Notice::new(NoticeKind::RecognitionFailed, Language::Hindi);
        assert_eq!(hi.kind, NoticeKind::RecognitionFailed);
        assert!(hi.title.contains("त्रुटि"));

        // Unsupported selector languages get English notices.
        let ta = Notice::new(NoticeKind::PlaybackUnsupported, Language::Tamil);
        assert_eq!(ta.title, "Speech playback not supported");
        assert!(ta.to_string().starts_with("Speech playback not supported: "));
    }
}
