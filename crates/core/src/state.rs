//! Lifecycle state and the snapshots the presentation layer renders from.
//!
//! The transitions here are pure: they take the state by `&mut self` and
//! never touch the network. Ordering of concurrent asks is the
//! controller's concern.

use serde::{Deserialize, Serialize};

use crate::request::AssistanceResult;

/// Observable state of one widget instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleState {
    /// An ask is in flight.
    pub is_loading: bool,

    /// Text of the last successful answer.
    pub response: String,

    /// User-facing error message; empty when there is none.
    pub error: String,

    /// Set only by a successful answer.
    pub has_asked: bool,

    /// Identifier the service attached to the last successful answer.
    pub request_id: Option<String>,
}

/// The four named states of the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Loading,
    Answered,
    Errored,
}

impl LifecycleState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if !self.error.is_empty() {
            Phase::Errored
        } else if self.has_asked {
            Phase::Answered
        } else {
            Phase::Idle
        }
    }

    /// Whether the ask affordance should be offered.
    ///
    /// Hidden only for a clean successful answer.
    pub fn ask_available(&self) -> bool {
        !self.has_asked || !self.error.is_empty()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Enter `Loading`. Prior response and error are cleared; `has_asked`
    /// is left alone.
    pub fn begin_ask(&mut self) {
        self.is_loading = true;
        self.error.clear();
        self.response.clear();
    }

    /// Leave `Loading` with the outcome of the call.
    pub fn finish(&mut self, result: AssistanceResult) {
        self.is_loading = false;
        match result {
            AssistanceResult::Success { text, request_id } => {
                self.response = text;
                self.request_id = request_id;
                self.error.clear();
                self.has_asked = true;
            }
            AssistanceResult::Failure { message } => {
                self.request_id = None;
                self.error = message;
            }
        }
    }

    /// Record a configuration error without starting a request.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = message.into();
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace only the error field.
    pub fn clear_error(&mut self, message: &str) {
        self.error = message.to_string();
    }
}

/// What the request view needs to render.
///
/// The view's `onAsk` handler is the controller's `ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub is_loading: bool,
    /// True only for a clean successful answer; the view hides itself then.
    pub has_asked: bool,
    pub message: String,
    pub button_text: String,
    /// Never asserted by the controller; kept for the view contract.
    pub disabled: bool,
}

impl RequestView {
    /// The view renders something (a spinner or the button).
    pub fn is_rendered(&self) -> bool {
        !self.has_asked || self.is_loading
    }

    /// The ask button itself is showing.
    pub fn shows_button(&self) -> bool {
        !self.has_asked && !self.is_loading
    }
}

/// What the response view needs to render.
///
/// Its handlers map to the controller: `onAskAgain` → `ask_again`,
/// `onClear` → `reset`, `onError` → `clear_error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseView {
    pub response: String,
    pub error: String,
    pub is_loading: bool,
    pub show_actions: bool,
    pub allow_copy: bool,
    pub allow_download: bool,
}

/// Lifecycle snapshot for the development debug panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub course_id: Option<String>,
    pub unit_id: Option<String>,
    pub sequence_id: Option<String>,
    pub endpoint: String,
    pub request_id: Option<String>,
    pub has_asked: bool,
    pub has_error: bool,
}
