//! Error types for the speech bindings.

use arogya_core::types::{Language, Notice, NoticeKind};

use crate::state::ListeningState;

/// Errors from speech input and playback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech input is not supported on this platform")]
    InputUnsupported,
    #[error("speech playback is not supported on this platform")]
    PlaybackUnsupported,
    #[error("already listening")]
    AlreadyListening,
    #[error("invalid listening state transition: {from} -> {to}")]
    InvalidTransition {
        from: ListeningState,
        to: ListeningState,
    },
    #[error("recognition failed: {0}")]
    Recognition(String),
    #[error("listening cancelled")]
    Cancelled,
    #[error("playback failed: {0}")]
    Playback(String),
}

impl SpeechError {
    /// The user-visible notice for this error, if it warrants one.
    ///
    /// Cancellation and state errors are driven by the host itself and
    /// produce no notice.
    pub fn notice(&self, language: Language) -> Option<Notice> {
        let kind = match self {
            SpeechError::InputUnsupported => NoticeKind::SpeechInputUnsupported,
            SpeechError::Recognition(_) => NoticeKind::RecognitionFailed,
            SpeechError::PlaybackUnsupported => NoticeKind::PlaybackUnsupported,
            SpeechError::AlreadyListening
            | SpeechError::InvalidTransition { .. }
            | SpeechError::Cancelled
            | SpeechError::Playback(_) => return None,
        };
        Some(Notice::new(kind, language))
    }
}
