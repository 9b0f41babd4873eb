//! End-to-end conversation tests.
//!
//! Drive a session the way the terminal host does: load a table, build a
//! session from config, submit text, switch language and tear down.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use arogya_chat::{
    topics, ConversationSession, Navigator, ResponseResolver, ResponseTable, TopicId, TopicKey,
    View,
};
use arogya_core::config::{ArogyaConfig, ChatConfig};
use arogya_core::events::SessionEvent;
use arogya_core::types::Language;
use arogya_speech::{RecordingSpeaker, ScriptedRecognizer, SpeechError, SpeechInput};

// =============================================================================
// Helpers
// =============================================================================

fn custom_table_toml() -> String {
    let mut text = String::new();
    for (code, prefix) in [("en", "EN"), ("hi", "HI")] {
        text.push_str(&format!("[{}]\n", code));
        for key in TopicKey::ALL {
            text.push_str(&format!("{} = \"{} {}\"\n", key, prefix, key));
        }
        text.push('\n');
    }
    text
}

fn session_with(config: ChatConfig) -> ConversationSession {
    ConversationSession::builder(ResponseResolver::default())
        .config(config)
        .build()
}

// =============================================================================
// Conversation flow
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_full_conversation_with_custom_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(custom_table_toml().as_bytes()).unwrap();
    let table = ResponseTable::load(file.path()).unwrap();

    let speaker = Arc::new(RecordingSpeaker::new());
    let session = ConversationSession::builder(ResponseResolver::new(table))
        .language(Language::English)
        .config(ArogyaConfig::default().chat)
        .playback(speaker.clone(), 0.8)
        .build();
    assert_eq!(session.messages()[0].text, "EN greeting");

    let reply = session.submit("Why is vaccination important?").unwrap();
    assert!(session.is_pending());
    let reply = reply.wait().await.unwrap();
    assert_eq!(reply.text, "EN vaccination_schedule");

    session.set_language_code("hi").unwrap();
    let reply = session.submit("मुझे बुखार है").unwrap().wait().await.unwrap();
    assert_eq!(reply.text, "HI default");
    assert_eq!(reply.language, Some(Language::Hindi));

    let texts: Vec<String> = session.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            "EN greeting",
            "Why is vaccination important?",
            "EN vaccination_schedule",
            "मुझे बुखार है",
            "HI default",
        ]
    );

    let spoken: Vec<String> = speaker.spoken().into_iter().map(|u| u.text).collect();
    assert_eq!(spoken, vec!["EN vaccination_schedule", "HI default"]);

    session.close();
    assert_eq!(speaker.cancel_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_blank_input_never_schedules_a_reply() {
    let session = session_with(ChatConfig {
        greeting: false,
        ..ChatConfig::default()
    });
    let mut rx = session.subscribe();
    for input in ["", " ", "\t\n"] {
        assert!(session.submit(input).is_none());
    }
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(session.is_empty());
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_every_vaccination_trigger_in_any_language() {
    let session = session_with(ChatConfig {
        reply_delay_ms: 10,
        greeting: false,
        ..ChatConfig::default()
    });
    let table = ResponseTable::builtin();
    for language in Language::SUPPORTED {
        session.set_language(language);
        for utterance in ["vaccination please", "Vaccine?", "टीका"] {
            let reply = session.submit(utterance).unwrap().wait().await.unwrap();
            assert_eq!(
                reply.text,
                table.get(language, TopicKey::VaccinationSchedule),
                "{:?} in {}",
                utterance,
                language
            );
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_close_in_pending_window_prevents_append() {
    let session = session_with(ChatConfig::default());
    let mut rx = session.subscribe();
    let pending = session.submit("dengue").unwrap();

    tokio::time::sleep(Duration::from_millis(500)).await;
    session.close();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(pending.wait().await.is_none());
    // Greeting and the user message only.
    assert_eq!(session.len(), 2);

    let mut appended = 0;
    let mut closed = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            SessionEvent::MessageAppended { .. } => appended += 1,
            SessionEvent::SessionClosed { message_count, .. } => {
                assert_eq!(message_count, 2);
                closed = true;
            }
            _ => {}
        }
    }
    assert_eq!(appended, 1);
    assert!(closed);
}

// =============================================================================
// Navigation and speech input
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_topic_selection_does_not_seed_conversation() {
    let session = session_with(ChatConfig::default());
    let before = session.messages();

    let mut nav = Navigator::new();
    for topic in topics(Language::English) {
        nav.select_topic(Language::English, topic.id);
        assert_eq!(nav.view(), View::Chat);
        nav.back();
    }
    nav.select_topic(Language::Hindi, TopicId::Nutrition);

    assert_eq!(session.messages(), before);
    assert!(!session.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_dictated_text_flows_into_session() {
    let recognizer = ScriptedRecognizer::new();
    recognizer.push_transcript("  डेंगू के लक्षण  ");
    let input = SpeechInput::new(recognizer);

    let session = session_with(ChatConfig {
        greeting: false,
        ..ChatConfig::default()
    });
    session.set_language(Language::Hindi);

    let transcript = input.listen(session.language()).await.unwrap();
    assert_eq!(transcript, "डेंगू के लक्षण");

    let reply = session.submit(&transcript).unwrap().wait().await.unwrap();
    assert_eq!(
        reply.text,
        ResponseTable::builtin().get(Language::Hindi, TopicKey::DengueSymptoms)
    );
}

#[tokio::test]
async fn test_unsupported_speech_input_leaves_typed_input_working() {
    let input = SpeechInput::new(ScriptedRecognizer::unavailable());
    let err = input.listen(Language::English).await.unwrap_err();
    assert_eq!(err, SpeechError::InputUnsupported);
    assert!(err.notice(Language::English).is_some());

    let session = session_with(ChatConfig {
        reply_delay_ms: 0,
        greeting: false,
        ..ChatConfig::default()
    });
    assert!(session.submit("prevent").unwrap().wait().await.is_some());
}
