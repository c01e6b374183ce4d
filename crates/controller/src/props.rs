//! Inbound widget configuration.

use lessonaid_config::AppConfig;
use lessonaid_core::context::{ContextInputs, Sequence};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything the host page passes to one widget instance.
///
/// Unknown keys land in `extra` and are forwarded into the context payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProps {
    #[serde(default)]
    pub sequence: Option<Sequence>,

    #[serde(default)]
    pub course_id: Option<String>,

    #[serde(default)]
    pub unit_id: Option<String>,

    /// Overrides the configured default endpoint
    #[serde(default)]
    pub api_endpoint: Option<String>,

    /// Shown next to the ask button, and sent as the query
    #[serde(default = "default_request_message")]
    pub request_message: String,

    #[serde(default = "default_button_text")]
    pub button_text: String,

    #[serde(default = "default_true")]
    pub show_response_actions: bool,

    #[serde(default = "default_true")]
    pub allow_copy: bool,

    #[serde(default)]
    pub allow_download: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_request_message() -> String {
    "Need help understanding this content?".into()
}
fn default_button_text() -> String {
    "Get AI Assistance".into()
}
fn default_true() -> bool {
    true
}

impl Default for WidgetProps {
    fn default() -> Self {
        Self {
            sequence: None,
            course_id: None,
            unit_id: None,
            api_endpoint: None,
            request_message: default_request_message(),
            button_text: default_button_text(),
            show_response_actions: true,
            allow_copy: true,
            allow_download: false,
            extra: Map::new(),
        }
    }
}

impl WidgetProps {
    /// Props whose presentation defaults come from the `[widget]` config table.
    pub fn from_config(config: &AppConfig) -> Self {
        let widget = &config.widget;
        Self {
            request_message: widget.request_message.clone(),
            button_text: widget.button_text.clone(),
            show_response_actions: widget.show_response_actions,
            allow_copy: widget.allow_copy,
            allow_download: widget.allow_download,
            ..Self::default()
        }
    }

    pub fn with_sequence(mut self, sequence: Sequence) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_course_id(mut self, course_id: impl Into<String>) -> Self {
        self.course_id = Some(course_id.into());
        self
    }

    pub fn with_unit_id(mut self, unit_id: impl Into<String>) -> Self {
        self.unit_id = Some(unit_id.into());
        self
    }

    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_request_message(mut self, message: impl Into<String>) -> Self {
        self.request_message = message.into();
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The subset of props that feeds context assembly.
    pub fn context_inputs(&self) -> ContextInputs {
        ContextInputs {
            sequence: self.sequence.clone(),
            course_id: self.course_id.clone(),
            unit_id: self.unit_id.clone(),
            extra: self.extra.clone(),
        }
    }

    /// The query to send: the request message, or `fallback` when blank.
    pub fn query<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.request_message.trim().is_empty() {
            fallback
        } else {
            &self.request_message
        }
    }
}
