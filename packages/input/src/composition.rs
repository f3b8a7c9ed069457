//! # Composition State
//!
//! Tracks whether an IME, spellchecker or dictation session is in
//! progress. Only two states exist; update signals carry no transition
//! and go through the ordinary content path.
//!
//! Resuming a composition after the user clicks elsewhere is not reliable
//! across platforms, so an abort gives up on the session and the surface
//! is reset without diffing what it held.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionState {
    #[default]
    Idle,
    Composing,
}

/// External event that may force a composition abort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortTrigger {
    /// Mouse button pressed on the host view outside the surface
    PointerDown,
    /// Touch started on the host view outside the surface
    TouchStart,
    /// The surface lost focus
    FocusLoss,
}

#[derive(Debug, Default)]
pub struct CompositionMachine {
    state: CompositionState,
}

impl CompositionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CompositionState {
        self.state
    }

    pub fn is_composing(&self) -> bool {
        self.state == CompositionState::Composing
    }

    pub fn start(&mut self) {
        self.state = CompositionState::Composing;
    }

    pub fn end(&mut self) {
        self.state = CompositionState::Idle;
    }

    /// Apply an abort trigger; returns whether the surface must be reset
    ///
    /// Pointer and touch interaction always reset: the remote caret has
    /// moved and the surface content no longer lines up with it. Focus
    /// loss only matters mid-composition.
    pub fn abort(&mut self, trigger: AbortTrigger) -> bool {
        let was_composing = self.is_composing();
        match trigger {
            AbortTrigger::PointerDown | AbortTrigger::TouchStart => {
                self.state = CompositionState::Idle;
                true
            }
            AbortTrigger::FocusLoss => {
                self.state = CompositionState::Idle;
                was_composing
            }
        }
    }
}
