//! Speech-to-text binding.
//!
//! A [`SpeechRecognizer`] is a platform capability that turns one spoken
//! utterance into one transcript. [`SpeechInput`] wraps it with availability
//! detection, a single-listener guard and cancellation.

use std::collections::VecDeque;
use std::future::Future;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arogya_core::types::Language;
use tokio::sync::Notify;

use crate::command::{expand_args, find_program};
use crate::error::SpeechError;
use crate::state::{ListeningState, StateMachine};

// =============================================================================
// Trait
// =============================================================================

/// A platform speech-to-text capability.
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the capability exists on this platform.
    fn is_available(&self) -> bool;

    /// Listen for a single utterance and return its transcript.
    ///
    /// # Arguments
    /// * `locale` - BCP 47 locale such as `"hi-IN"`.
    fn recognize(&self, locale: &str) -> impl Future<Output = Result<String, SpeechError>> + Send;
}

// =============================================================================
// Binding
// =============================================================================

/// Speech input binding enforcing one listening session at a time.
pub struct SpeechInput<R> {
    recognizer: R,
    state: StateMachine,
    cancel: Arc<Notify>,
}

impl<R: SpeechRecognizer> SpeechInput<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            state: StateMachine::new(),
            cancel: Arc::new(Notify::new()),
        }
    }

    /// Whether speech input can be started at all.
    pub fn is_available(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn state(&self) -> ListeningState {
        self.state.current()
    }

    pub fn is_listening(&self) -> bool {
        self.state.current() == ListeningState::Listening
    }

    /// Listen for one utterance in `language`.
    ///
    /// Returns [`SpeechError::InputUnsupported`] without touching the state
    /// when the capability is absent, and [`SpeechError::AlreadyListening`]
    /// when another listen is in flight. On every other outcome the binding
    /// is back to Idle when this returns.
    pub async fn listen(&self, language: Language) -> Result<String, SpeechError> {
        if !self.recognizer.is_available() {
            tracing::warn!("Speech input requested but no recognizer is available");
            return Err(SpeechError::InputUnsupported);
        }

        // Register for cancellation before flipping state so a cancel issued
        // right after the transition is not lost.
        let cancelled = self.cancel.notified();
        self.state.transition(ListeningState::Listening)?;
        // Back to Idle on every exit, including the future being dropped.
        let _idle = IdleOnDrop(&self.state);

        let locale = language.locale();
        tracing::info!(locale, "Listening for speech");

        let result = tokio::select! {
            r = self.recognizer.recognize(locale) => r,
            _ = cancelled => Err(SpeechError::Cancelled),
        };

        match result {
            Ok(text) if text.trim().is_empty() => {
                tracing::debug!("Recognizer returned an empty transcript");
                Err(SpeechError::Recognition("no speech detected".to_string()))
            }
            Ok(text) => {
                tracing::info!(text_len = text.len(), "Speech transcribed");
                Ok(text.trim().to_string())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Speech recognition ended without a transcript");
                Err(e)
            }
        }
    }

    /// Abort an in-flight listen. Does nothing when idle.
    pub fn cancel(&self) {
        if self.is_listening() {
            tracing::info!("Cancelling speech input");
            self.cancel.notify_waiters();
        }
    }
}

/// Resets the listening state when dropped.
struct IdleOnDrop<'a>(&'a StateMachine);

impl Drop for IdleOnDrop<'_> {
    fn drop(&mut self) {
        self.0.reset();
    }
}

// =============================================================================
// Implementations
// =============================================================================

/// Recognizer for platforms without speech-to-text.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn recognize(&self, _locale: &str) -> Result<String, SpeechError> {
        Err(SpeechError::InputUnsupported)
    }
}

/// Recognizer that runs an external program once per listen and reads the
/// transcript from the first non-empty line of its stdout.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    /// # Arguments
    /// * `program` - Executable name or path.
    /// * `args` - Argument template; `{locale}` and `{lang}` are expanded.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn is_available(&self) -> bool {
        find_program(&self.program).is_some()
    }

    async fn recognize(&self, locale: &str) -> Result<String, SpeechError> {
        let lang = locale.split('-').next().unwrap_or(locale);
        let args = expand_args(&self.args, &[("locale", locale), ("lang", lang)]);

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| SpeechError::Recognition(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Recognition(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_string())
    }
}

/// Recognizer that replays queued outcomes. Used in tests and demos.
#[derive(Debug)]
pub struct ScriptedRecognizer {
    available: bool,
    delay: Duration,
    outcomes: Mutex<VecDeque<Result<String, SpeechError>>>,
    locales: Mutex<Vec<String>>,
}

impl Default for ScriptedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self {
            available: true,
            delay: Duration::ZERO,
            outcomes: Mutex::new(VecDeque::new()),
            locales: Mutex::new(Vec::new()),
        }
    }

    /// Simulate a platform without the capability.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Wait this long before delivering each outcome.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn push_transcript(&self, text: impl Into<String>) {
        self.push(Ok(text.into()));
    }

    pub fn push_error(&self, err: SpeechError) {
        self.push(Err(err));
    }

    fn push(&self, outcome: Result<String, SpeechError>) {
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(outcome);
    }

    /// Locales requested so far, in order.
    pub fn requested_locales(&self) -> Vec<String> {
        self.locales
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, locale: &str) -> Result<String, SpeechError> {
        self.locales
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(locale.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcomes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(SpeechError::Recognition("no speech detected".to_string())))
    }
}

// =============================================================================
// Tests
// =============================================================================
