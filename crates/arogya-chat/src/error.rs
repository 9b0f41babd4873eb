//! Error types for the conversational core.

use arogya_core::error::ArogyaError;
use arogya_core::types::Language;

use crate::table::TopicKey;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("response table entry '{topic}' for language '{language}' is empty")]
    EmptyEntry { language: Language, topic: TopicKey },
    #[error("response table parse error: {0}")]
    TableParse(String),
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),
    #[error("unknown topic: {0}")]
    UnknownTopic(String),
    #[error("session is closed")]
    SessionClosed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        ChatError::TableParse(err.to_string())
    }
}

impl From<ChatError> for ArogyaError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyEntry { .. } | ChatError::TableParse(_) => {
                ArogyaError::ResponseTable(err.to_string())
            }
            ChatError::UnknownLanguage(code) => ArogyaError::UnknownLanguage(code),
            ChatError::Io(e) => ArogyaError::Io(e),
            other => ArogyaError::Chat(other.to_string()),
        }
    }
}
