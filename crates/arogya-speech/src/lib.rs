//! Arogya speech crate - speech-to-text and text-to-speech bindings.
//!
//! Both capabilities are external to the assistant and are modeled as traits
//! with explicit availability detection and cancellation:
//! - [`SpeechRecognizer`] produces one transcript per listen, driven by
//!   [`SpeechInput`] through a strict Idle -> Listening -> Idle state machine.
//! - [`SpeechPlayback`] speaks a reply fire-and-forget.

pub mod command;
pub mod error;
pub mod playback;
pub mod recognizer;
pub mod state;

pub use error::SpeechError;
pub use playback::{CommandSpeaker, RecordingSpeaker, SpeechPlayback, Utterance};
pub use recognizer::{
    CommandRecognizer, ScriptedRecognizer, SpeechInput, SpeechRecognizer, UnsupportedRecognizer,
};
pub use state::ListeningState;
