//! Keyword-driven response resolver.
//!
//! Lower-cases the utterance and checks trigger substrings topic by topic in
//! a fixed priority order. The first topic with a matching trigger wins;
//! with no match the language's `default` response is returned. Triggers in
//! both scripts are checked whatever language is selected.

use std::sync::Arc;

use arogya_core::types::Language;

use crate::table::{ResponseTable, TopicKey};

/// Trigger substrings in priority order. Earlier entries win when an
/// utterance matches more than one topic.
const TRIGGERS: [(TopicKey, &[&str]); 4] = [
    (TopicKey::VaccinationSchedule, &["vaccination", "vaccine", "टीका"]),
    (TopicKey::DengueSymptoms, &["dengue", "डेंगू"]),
    (TopicKey::PreventDiseases, &["prevent", "बचाव"]),
    (TopicKey::WhyVaccinesImportant, &["important", "जरूरी"]),
];

/// Maps free-text utterances to canned responses. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ResponseResolver {
    table: Arc<ResponseTable>,
}

impl Default for ResponseResolver {
    fn default() -> Self {
        Self::new(ResponseTable::builtin())
    }
}

impl ResponseResolver {
    pub fn new(table: ResponseTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// The topic an utterance selects. Never returns [`TopicKey::Greeting`].
    pub fn classify(&self, utterance: &str) -> TopicKey {
        let lowered = utterance.to_lowercase();
        let topic = TRIGGERS
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| lowered.contains(n)))
            .map(|(topic, _)| *topic)
            .unwrap_or(TopicKey::Default);
        tracing::debug!(%topic, utterance_len = utterance.len(), "Utterance classified");
        topic
    }

    /// Resolve an utterance to response text in `language`.
    ///
    /// Languages without content resolve in English. Always returns text.
    pub fn resolve(&self, utterance: &str, language: Language) -> String {
        let topic = self.classify(utterance);
        self.table.get(language, topic).to_string()
    }

    /// The opening message for a session in `language`.
    pub fn greeting(&self, language: Language) -> String {
        self.table.get(language, TopicKey::Greeting).to_string()
    }
}
