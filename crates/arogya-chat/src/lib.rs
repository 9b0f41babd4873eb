//! Conversational core for Arogya.
//!
//! Provides the keyword-driven response resolver over a validated bilingual
//! response table, the append-only conversation session with deferred and
//! cancellable replies, and the static topic catalogue used for navigation.

pub mod error;
pub mod navigation;
pub mod resolver;
pub mod session;
pub mod table;
pub mod topics;

pub use error::ChatError;
pub use navigation::{Navigator, View};
pub use resolver::ResponseResolver;
pub use session::{ConversationSession, PendingReply, SessionBuilder};
pub use table::{LanguageResponses, ResponseTable, TopicKey};
pub use topics::{find_topic, topics, Topic, TopicId};
