//! Dashboard/chat view switching.

use arogya_core::types::Language;

use crate::topics::{find_topic, Topic, TopicId};

/// Which view the host is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Chat,
}

/// Tracks the active view.
///
/// Selecting a topic opens the chat but does not put anything into the
/// conversation; the topic is only remembered for display.
#[derive(Debug, Default)]
pub struct Navigator {
    view: View,
    last_topic: Option<TopicId>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn last_topic(&self) -> Option<TopicId> {
        self.last_topic
    }

    /// Open the chat from a topic card.
    pub fn select_topic(&mut self, language: Language, id: TopicId) -> &'static Topic {
        let topic = find_topic(language, id);
        tracing::debug!(topic = %id, from = ?self.view, "Topic selected");
        self.last_topic = Some(id);
        self.view = View::Chat;
        topic
    }

    pub fn start_chat(&mut self) {
        if self.view != View::Chat {
            tracing::debug!("Chat opened");
        }
        self.view = View::Chat;
    }

    /// Return to the dashboard. Returns false if already there.
    pub fn back(&mut self) -> bool {
        if self.view == View::Dashboard {
            return false;
        }
        tracing::debug!("Back to dashboard");
        self.view = View::Dashboard;
        true
    }
}
