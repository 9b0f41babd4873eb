//! Text-to-speech binding.
//!
//! Playback is fire-and-forget: `speak` returns as soon as the utterance is
//! handed to the engine, and nothing waits for it to finish.

use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use arogya_core::types::Language;

use crate::command::{expand_args, find_program};
use crate::error::SpeechError;

/// Words per minute an engine speaks at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// A request to speak some text.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: Language,
    /// Relative speaking rate; 1.0 is the engine's normal speed.
    pub rate: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, language: Language, rate: f32) -> Self {
        Self {
            text: text.into(),
            language,
            rate,
        }
    }

    pub fn locale(&self) -> &'static str {
        self.language.locale()
    }

    /// Rate expressed in words per minute, clamped to a sane range.
    pub fn words_per_minute(&self) -> u32 {
        (BASE_WORDS_PER_MINUTE * self.rate).round().clamp(40.0, 600.0) as u32
    }
}

/// A platform text-to-speech capability.
pub trait SpeechPlayback: Send + Sync {
    /// Whether the capability exists on this platform.
    fn is_available(&self) -> bool;

    /// Start speaking. Returns once playback has been started.
    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Stop everything currently being spoken.
    fn cancel(&self);
}

// =============================================================================
// External program
// =============================================================================

/// Speaks through an external program such as `espeak-ng` or `say`.
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    children: Mutex<Vec<Child>>,
}

impl CommandSpeaker {
    /// # Arguments
    /// * `program` - Executable name or path.
    /// * `args` - Argument template; `{lang}`, `{locale}`, `{wpm}` and
    ///   `{text}` are expanded per utterance.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            children: Mutex::new(Vec::new()),
        }
    }

    fn build_args(&self, utterance: &Utterance) -> Vec<String> {
        let wpm = utterance.words_per_minute().to_string();
        // Text goes last so its content is never itself expanded.
        expand_args(
            &self.args,
            &[
                ("lang", utterance.language.response_language().code()),
                ("locale", utterance.locale()),
                ("wpm", wpm.as_str()),
                ("text", utterance.text.as_str()),
            ],
        )
    }
}

impl SpeechPlayback for CommandSpeaker {
    fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }

    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        if !self.is_available() {
            return Err(SpeechError::PlaybackUnsupported);
        }
        let child = Command::new(&self.program)
            .args(self.build_args(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SpeechError::Playback(format!("{}: {}", self.program, e)))?;

        tracing::debug!(
            pid = child.id(),
            locale = utterance.locale(),
            text_len = utterance.text.len(),
            "Playback started"
        );

        let mut children = self.children.lock().unwrap_or_else(|e| e.into_inner());
        // Reap finished players so the list only holds live ones.
        children.retain_mut(|c| matches!(c.try_wait(), Ok(None)));
        children.push(child);
        Ok(())
    }

    fn cancel(&self) {
        let mut children = self.children.lock().unwrap_or_else(|e| e.into_inner());
        for mut child in children.drain(..) {
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "Player already exited");
            }
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// Recording double
// =============================================================================

/// Playback that records utterances instead of speaking them.
#[derive(Debug)]
pub struct RecordingSpeaker {
    available: bool,
    spoken: Mutex<Vec<Utterance>>,
    cancels: Mutex<usize>,
}

impl Default for RecordingSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self {
            available: true,
            spoken: Mutex::new(Vec::new()),
            cancels: Mutex::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Everything spoken so far, in order.
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// How many times `cancel` was called.
    pub fn cancel_count(&self) -> usize {
        *self.cancels.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SpeechPlayback for RecordingSpeaker {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&self, utterance: &Utterance) -> Result<(), SpeechError> {
        if !self.available {
            return Err(SpeechError::PlaybackUnsupported);
        }
        self.spoken
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(utterance.clone());
        Ok(())
    }

    fn cancel(&self) {
        *self.cancels.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_per_minute() {
        assert_eq!(Utterance::new("x", Language::English, 1.0).words_per_minute(), 175);
        assert_eq!(Utterance::new("x", Language::English, 0.8).words_per_minute(), 140);
        assert_eq!(Utterance::new("x", Language::English, 0.01).words_per_minute(), 40);
        assert_eq!(Utterance::new("x", Language::English, 100.0).words_per_minute(), 600);
    }

    #[test]
    fn test_utterance_locale() {
        assert_eq!(Utterance::new("x", Language::Hindi, 0.8).locale(), "hi-IN");
        assert_eq!(Utterance::new("x", Language::Bengali, 0.8).locale(), "en-IN");
    }

    #[test]
    fn test_command_speaker_builds_args() {
        let speaker = CommandSpeaker::new(
            "espeak-ng",
            vec![
                "-v".to_string(),
                "{lang}".to_string(),
                "-s".to_string(),
                "{wpm}".to_string(),
                "{text}".to_string(),
            ],
        );
        let args = speaker.build_args(&Utterance::new("डेंगू के लक्षण", Language::Hindi, 0.8));
        assert_eq!(args, vec!["-v", "hi", "-s", "140", "डेंगू के लक्षण"]);
    }

    #[test]
    fn test_command_speaker_does_not_expand_placeholders_inside_text() {
        let speaker = CommandSpeaker::new("say", vec!["{text}".to_string()]);
        let args = speaker.build_args(&Utterance::new("say {wpm}", Language::English, 1.0));
        assert_eq!(args, vec!["say {wpm}"]);
    }

    #[test]
    fn test_command_speaker_unavailable_program() {
        let speaker = CommandSpeaker::new("no-such-tts-program-xyz", vec![]);
        assert!(!speaker.is_available());
        assert_eq!(
            speaker.speak(&Utterance::new("hello", Language::English, 0.8)),
            Err(SpeechError::PlaybackUnsupported)
        );
        // Cancelling with nothing playing is harmless.
        speaker.cancel();
    }

    #[test]
    fn test_recording_speaker_records_and_counts_cancels() {
        let speaker = RecordingSpeaker::new();
        speaker
            .speak(&Utterance::new("one", Language::English, 0.8))
            .unwrap();
        speaker
            .speak(&Utterance::new("दो", Language::Hindi, 0.8))
            .unwrap();
        speaker.cancel();

        let spoken = speaker.spoken();
        assert_eq!(spoken.len(), 2);
        assert_eq!(spoken[1].text, "दो");
        assert_eq!(spoken[1].language, Language::Hindi);
        assert_eq!(speaker.cancel_count(), 1);
    }

    #[test]
    fn test_unavailable_recording_speaker() {
        let speaker = RecordingSpeaker::unavailable();
        assert!(!speaker.is_available());
        assert!(speaker
            .speak(&Utterance::new("x", Language::English, 0.8))
            .is_err());
        assert!(speaker.spoken().is_empty());
    }
}
