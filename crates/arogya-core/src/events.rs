use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Language, Message};

/// Events emitted by a conversation session.
///
/// Consumed by host views to re-render the transcript and the pending
/// indicator without polling the session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SessionEvent {
    /// A message was appended to the log.
    MessageAppended { session_id: Uuid, message: Message },

    /// The pending-reply indicator flipped.
    ReplyPendingChanged { session_id: Uuid, pending: bool },

    /// A deferred reply was dropped because the session was torn down.
    ReplyCancelled { session_id: Uuid, user_message_id: Uuid },

    /// The selected language changed.
    LanguageChanged { session_id: Uuid, language: Language },

    /// The session was closed; no further events follow.
    SessionClosed { session_id: Uuid, message_count: usize },
}

impl SessionEvent {
    /// The session that produced this event.
    pub fn session_id(&self) -> Uuid {
        match self {
            SessionEvent::MessageAppended { session_id, .. }
            | SessionEvent::ReplyPendingChanged { session_id, .. }
            | SessionEvent::ReplyCancelled { session_id, .. }
            | SessionEvent::LanguageChanged { session_id, .. }
            | SessionEvent::SessionClosed { session_id, .. } => *session_id,
        }
    }
}
