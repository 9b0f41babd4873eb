//! Listening state machine with thread-safe transitions.
//!
//! Valid transitions:
//! - Idle -> Listening (start a recognition attempt)
//! - Listening -> Idle (transcript delivered, error, or cancel)

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::SpeechError;

/// Operational state of a speech input binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListeningState {
    /// Ready to start listening.
    Idle,
    /// A recognition attempt is in flight.
    Listening,
}

impl fmt::Display for ListeningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListeningState::Idle => write!(f, "Idle"),
            ListeningState::Listening => write!(f, "Listening"),
        }
    }
}

impl ListeningState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &ListeningState) -> bool {
        matches!(
            (self, target),
            (ListeningState::Idle, ListeningState::Listening)
                | (ListeningState::Listening, ListeningState::Idle)
        )
    }
}

/// Shared listening state. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<ListeningState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ListeningState::Idle)),
        }
    }

    // The guarded value is a plain enum, so a poisoned lock still holds a
    // valid state.
    fn lock(&self) -> MutexGuard<'_, ListeningState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the current state.
    pub fn current(&self) -> ListeningState {
        *self.lock()
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: ListeningState) -> Result<(), SpeechError> {
        let mut state = self.lock();
        if state.can_transition_to(&target) {
            tracing::debug!("Listening state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else if *state == ListeningState::Listening {
            Err(SpeechError::AlreadyListening)
        } else {
            Err(SpeechError::InvalidTransition {
                from: *state,
                to: target,
            })
        }
    }

    /// Force the state machine back to Idle.
    pub fn reset(&self) {
        let mut state = self.lock();
        if *state != ListeningState::Idle {
            tracing::debug!("Listening state reset to Idle from {}", *state);
        }
        *state = ListeningState::Idle;
    }
}
