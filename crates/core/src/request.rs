//! The outbound assistance request and its normalized outcome.

use serde::{Deserialize, Serialize};

use crate::context::RequestContext;

/// The JSON body posted to the assistance endpoint.
///
/// Wire shape: `{"context": {...}, "courseId": "..." | null, "query": "..."}`.
/// Built fresh for every ask and never mutated after it is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistanceRequest {
    pub context: RequestContext,
    pub course_id: Option<String>,
    pub query: String,
}

impl AssistanceRequest {
    pub fn new(context: RequestContext, course_id: Option<String>, query: impl Into<String>) -> Self {
        Self {
            context,
            course_id,
            query: query.into(),
        }
    }
}

/// Normalized result of one call to the assistance service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssistanceResult {
    Success {
        text: String,
        #[serde(rename = "requestId", default)]
        request_id: Option<String>,
    },
    Failure {
        message: String,
    },
}

impl AssistanceResult {
    pub fn success(text: impl Into<String>, request_id: Option<String>) -> Self {
        Self::Success {
            text: text.into(),
            request_id,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The success text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text, .. } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}
