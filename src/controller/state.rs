use std::time::{Duration, Instant};

use crate::models::{AnalysisResult, InputSource};

/// Screen states. Derived from [`UiState`], never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// No usable text: trigger disabled
    Idle,
    /// Text or file present: trigger enabled
    HasInput,
    /// Request in flight: trigger disabled, spinner shown
    Analyzing,
    /// Last request succeeded and its result is displayed
    Result,
    /// Last request failed and its error is displayed
    Error,
}

/// What the last settled request left on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(AnalysisResult),
    Failure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Inline message (validation and clipboard feedback), optionally expiring
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Option<Instant>,
}

impl StatusMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), message_type: MessageType::Error, expires_at: None }
    }

    pub fn success_for(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            message_type: MessageType::Success,
            expires_at: Some(Instant::now() + duration),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Everything the analysis screen shows. Mutated only by the controller.
#[derive(Debug, Default)]
pub struct UiState {
    pub(super) input: InputSource,
    pub(super) outcome: Option<Outcome>,
    pub(super) analyzing: bool,
    /// Trimmed text of the request in flight
    pub(super) pending_text: Option<String>,
    pub(super) status: Option<StatusMessage>,
}

impl UiState {
    pub fn input(&self) -> &InputSource {
        &self.input
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn screen(&self) -> Screen {
        if self.analyzing {
            return Screen::Analyzing;
        }
        match &self.outcome {
            Some(Outcome::Success(_)) => Screen::Result,
            Some(Outcome::Failure(_)) => Screen::Error,
            None if self.input.has_text() => Screen::HasInput,
            None => Screen::Idle,
        }
    }

    /// Whether the analyze trigger accepts a press
    pub fn trigger_enabled(&self) -> bool {
        !self.analyzing && self.input.has_text()
    }

    /// Result on display, only ever a successful one
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.outcome {
            Some(Outcome::Success(result)) if !self.analyzing => Some(result),
            _ => None,
        }
    }

    /// Failure message on display
    pub fn failure(&self) -> Option<&str> {
        match &self.outcome {
            Some(Outcome::Failure(message)) if !self.analyzing => Some(message),
            _ => None,
        }
    }
}
