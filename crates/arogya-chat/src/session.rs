//! Conversation session: the append-only message log behind a chat view.
//!
//! A submission appends the user message immediately and schedules a
//! one-shot deferred reply. Replies are tracked by abort handles so that
//! closing the session cancels them; the reply task also re-checks the
//! closed flag under the lock, so no message is appended after `close`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use arogya_core::config::{ChatConfig, LanguageBinding};
use arogya_core::events::SessionEvent;
use arogya_core::types::{Language, Message};
use arogya_speech::{SpeechPlayback, Utterance};
use tokio::sync::broadcast;
use tokio::task::{AbortHandle, JoinHandle};
use uuid::Uuid;

use crate::error::ChatError;
use crate::resolver::ResponseResolver;

/// Capacity of the per-session event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Default relative speaking rate for replies.
const DEFAULT_SPEAKING_RATE: f32 = 0.8;

struct SessionState {
    messages: Vec<Message>,
    language: Language,
    /// Outstanding replies keyed by the user message that triggered them.
    pending: HashMap<Uuid, AbortHandle>,
    closed: bool,
}

struct Shared {
    id: Uuid,
    state: Mutex<SessionState>,
    resolver: ResponseResolver,
    playback: Option<Arc<dyn SpeechPlayback>>,
    speaking_rate: f32,
    language_binding: LanguageBinding,
    reply_delay: Duration,
    events: broadcast::Sender<SessionEvent>,
}

impl Shared {
    // Every critical section leaves the state consistent, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Append the reply for `user_message_id`. Runs on the deferred task.
    fn deliver_reply(
        &self,
        user_message_id: Uuid,
        utterance: &str,
        submit_language: Language,
    ) -> Option<Message> {
        let message = {
            let mut state = self.lock();
            if state.closed {
                tracing::debug!(session_id = %self.id, "Reply dropped, session closed");
                return None;
            }
            state.pending.remove(&user_message_id);

            let language = match self.language_binding {
                LanguageBinding::AtReply => state.language,
                LanguageBinding::AtSubmit => submit_language,
            };
            let message = Message::bot(self.resolver.resolve(utterance, language), language);
            state.messages.push(message.clone());

            self.emit(SessionEvent::MessageAppended {
                session_id: self.id,
                message: message.clone(),
            });
            if state.pending.is_empty() {
                self.emit(SessionEvent::ReplyPendingChanged {
                    session_id: self.id,
                    pending: false,
                });
            }
            // Started under the lock so a concurrent close cannot miss it.
            self.speak(&message);
            message
        };

        tracing::info!(
            session_id = %self.id,
            message_id = %message.id,
            language = %message.language.unwrap_or_default(),
            "Reply appended"
        );
        Some(message)
    }

    /// Hand a reply to playback. `speak` only starts playback, so this is
    /// safe to call with the state locked.
    fn speak(&self, message: &Message) {
        let Some(playback) = &self.playback else {
            return;
        };
        if !playback.is_available() {
            tracing::debug!("Playback unavailable, reply not spoken");
            return;
        }
        let utterance = Utterance::new(
            message.text.clone(),
            message.language.unwrap_or_default(),
            self.speaking_rate,
        );
        if let Err(e) = playback.speak(&utterance) {
            tracing::warn!(error = %e, "Failed to speak reply");
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Configures and creates a [`ConversationSession`].
pub struct SessionBuilder {
    resolver: ResponseResolver,
    language: Language,
    config: ChatConfig,
    playback: Option<Arc<dyn SpeechPlayback>>,
    speaking_rate: f32,
}

impl SessionBuilder {
    pub fn new(resolver: ResponseResolver) -> Self {
        Self {
            resolver,
            language: Language::default(),
            config: ChatConfig::default(),
            playback: None,
            speaking_rate: DEFAULT_SPEAKING_RATE,
        }
    }

    /// Initially selected language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn config(mut self, config: ChatConfig) -> Self {
        self.config = config;
        self
    }

    /// Speak replies through `playback` at `rate`.
    pub fn playback(mut self, playback: Arc<dyn SpeechPlayback>, rate: f32) -> Self {
        self.playback = Some(playback);
        self.speaking_rate = rate;
        self
    }

    pub fn build(self) -> ConversationSession {
        let id = Uuid::new_v4();
        let mut messages = Vec::new();
        if self.config.greeting {
            messages.push(Message::bot(
                self.resolver.greeting(self.language),
                self.language,
            ));
        }
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        tracing::info!(
            session_id = %id,
            language = %self.language,
            reply_delay_ms = self.config.reply_delay_ms,
            "Conversation session started"
        );

        ConversationSession {
            shared: Arc::new(Shared {
                id,
                state: Mutex::new(SessionState {
                    messages,
                    language: self.language,
                    pending: HashMap::new(),
                    closed: false,
                }),
                resolver: self.resolver,
                playback: self.playback,
                speaking_rate: self.speaking_rate,
                language_binding: self.config.language_binding,
                reply_delay: self.config.reply_delay(),
                events,
            }),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Handle to a reply that has been scheduled but not necessarily appended.
///
/// Dropping the handle does not cancel the reply.
#[derive(Debug)]
pub struct PendingReply {
    user_message_id: Uuid,
    handle: JoinHandle<Option<Message>>,
}

impl PendingReply {
    /// The user message this reply answers.
    pub fn user_message_id(&self) -> Uuid {
        self.user_message_id
    }

    /// Wait for the reply. Returns `None` if the session was closed first.
    pub async fn wait(self) -> Option<Message> {
        self.handle.await.ok().flatten()
    }
}

/// In-memory conversation state for one chat view.
///
/// Replies are scheduled on the ambient tokio runtime, so `submit` must be
/// called from within one. Dropping the session closes it.
pub struct ConversationSession {
    shared: Arc<Shared>,
}

impl ConversationSession {
    pub fn builder(resolver: ResponseResolver) -> SessionBuilder {
        SessionBuilder::new(resolver)
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn resolver(&self) -> &ResponseResolver {
        &self.shared.resolver
    }

    /// Snapshot of the log in append order.
    pub fn messages(&self) -> Vec<Message> {
        self.shared.lock().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.shared.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn language(&self) -> Language {
        self.shared.lock().language
    }

    /// Whether at least one reply is still outstanding.
    pub fn is_pending(&self) -> bool {
        !self.shared.lock().pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.shared.lock().pending.len()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Receive events for messages appended after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    /// Submit user text.
    ///
    /// Blank text and submissions to a closed session are ignored and
    /// return `None`. Otherwise the user message is appended now and the
    /// reply after the configured delay.
    pub fn submit(&self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            tracing::debug!(session_id = %self.shared.id, "Ignoring blank submission");
            return None;
        }

        let user_message = Message::user(text);
        let user_message_id = user_message.id;

        let mut state = self.shared.lock();
        if state.closed {
            tracing::warn!(session_id = %self.shared.id, "Submission to closed session ignored");
            return None;
        }
        let submit_language = state.language;
        let was_pending = !state.pending.is_empty();

        state.messages.push(user_message.clone());
        self.shared.emit(SessionEvent::MessageAppended {
            session_id: self.shared.id,
            message: user_message,
        });

        // Spawned while holding the lock so the abort handle is registered
        // before the task can look for it.
        let shared = Arc::clone(&self.shared);
        let utterance = text.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.reply_delay).await;
            shared.deliver_reply(user_message_id, &utterance, submit_language)
        });
        state.pending.insert(user_message_id, handle.abort_handle());

        if !was_pending {
            self.shared.emit(SessionEvent::ReplyPendingChanged {
                session_id: self.shared.id,
                pending: true,
            });
        }
        drop(state);

        tracing::info!(
            session_id = %self.shared.id,
            message_id = %user_message_id,
            text_len = text.len(),
            "User message appended"
        );

        Some(PendingReply {
            user_message_id,
            handle,
        })
    }

    /// Select a language for future replies. Existing messages keep theirs.
    pub fn set_language(&self, language: Language) {
        let mut state = self.shared.lock();
        if state.language == language {
            return;
        }
        state.language = language;
        self.shared.emit(SessionEvent::LanguageChanged {
            session_id: self.shared.id,
            language,
        });
        tracing::info!(session_id = %self.shared.id, %language, "Language changed");
    }

    /// Select a language by code such as `"hi"`.
    pub fn set_language_code(&self, code: &str) -> Result<Language, ChatError> {
        let language =
            Language::from_code(code).ok_or_else(|| ChatError::UnknownLanguage(code.to_string()))?;
        self.set_language(language);
        Ok(language)
    }

    /// Tear the session down: cancel outstanding replies and playback.
    /// Idempotent.
    pub fn close(&self) {
        let cancelled: Vec<(Uuid, AbortHandle)> = {
            let mut state = self.shared.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            let cancelled: Vec<_> = state.pending.drain().collect();

            for (user_message_id, _) in &cancelled {
                self.shared.emit(SessionEvent::ReplyCancelled {
                    session_id: self.shared.id,
                    user_message_id: *user_message_id,
                });
            }
            if !cancelled.is_empty() {
                self.shared.emit(SessionEvent::ReplyPendingChanged {
                    session_id: self.shared.id,
                    pending: false,
                });
            }
            self.shared.emit(SessionEvent::SessionClosed {
                session_id: self.shared.id,
                message_count: state.messages.len(),
            });
            cancelled
        };

        for (_, handle) in &cancelled {
            handle.abort();
        }
        if let Some(playback) = &self.shared.playback {
            playback.cancel();
        }

        tracing::info!(
            session_id = %self.shared.id,
            cancelled_replies = cancelled.len(),
            "Conversation session closed"
        );
    }

    /// Like [`close`](Self::close), but reports whether the session was
    /// already closed.
    pub fn try_close(&self) -> Result<(), ChatError> {
        if self.is_closed() {
            return Err(ChatError::SessionClosed);
        }
        self.close();
        Ok(())
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("ConversationSession")
            .field("id", &self.shared.id)
            .field("language", &state.language)
            .field("messages", &state.messages.len())
            .field("pending", &state.pending.len())
            .field("closed", &state.closed)
            .field("has_playback", &self.shared.playback.is_some())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
