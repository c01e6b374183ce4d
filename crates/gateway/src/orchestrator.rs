//! Canned orchestrators that stand in for the real workflow backend.

use lessonaid_core::request::AssistanceRequest;
use serde_json::{Value, json};

/// How the development gateway answers a workflow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orchestrator {
    /// Fixed reply naming the query.
    Mock,
    /// Reply built from the course and unit found in the context.
    Context,
}

impl Orchestrator {
    /// Parse the configured name. Unknown names fall back to `Mock`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "context" => Self::Context,
            _ => Self::Mock,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Context => "context",
        }
    }

    /// Produce the orchestrator part of the reply.
    pub fn run(&self, request: &AssistanceRequest) -> Value {
        match self {
            Self::Mock => json!({
                "response": format!("Mock response for {}", request.query),
                "status": "completed",
            }),
            Self::Context => {
                let course_id = request
                    .course_id
                    .as_deref()
                    .or_else(|| request.context.get("courseId").and_then(Value::as_str))
                    .unwrap_or("unknown");
                let unit_id = request
                    .context
                    .get("unitId")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                json!({
                    "response": format!("course_id: {course_id}\nunit_id: {unit_id}"),
                    "status": "completed",
                    "metadata": {
                        "context_fields": request.context.len(),
                    },
                })
            }
        }
    }
}
