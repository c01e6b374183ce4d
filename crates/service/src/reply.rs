//! Interpretation of the assistance service's reply body.
//!
//! The reply shape is not fixed. A list of field extractors is tried in
//! order and the first one that matches decides the outcome. When none
//! match, the whole body becomes the answer text.

use lessonaid_core::error::AssistError;
use serde_json::{Map, Value};
use tracing::debug;

/// A successfully interpreted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub request_id: Option<String>,
}

/// What a matching extractor turns its field into.
enum Probe {
    Text(String),
    Error(String),
}

struct FieldExtractor {
    field: &'static str,
    on_match: fn(&Value) -> Probe,
}

/// Tried top to bottom; first present field wins.
const EXTRACTORS: &[FieldExtractor] = &[
    FieldExtractor { field: "response", on_match: as_text },
    FieldExtractor { field: "message", on_match: as_text },
    FieldExtractor { field: "content", on_match: as_text },
    FieldExtractor { field: "result", on_match: as_text },
    FieldExtractor { field: "error", on_match: as_error },
];

const REQUEST_ID_FIELDS: [&str; 2] = ["requestId", "request_id"];

fn as_text(value: &Value) -> Probe {
    Probe::Text(render(value))
}

fn as_error(value: &Value) -> Probe {
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| render(value));
    Probe::Error(message)
}

/// Strings verbatim, everything else as pretty JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// A field counts only when it holds a "truthy" value: not null, not
/// `false`, not zero, not the empty string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn request_id(object: &Map<String, Value>) -> Option<String> {
    REQUEST_ID_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_str))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Turn a 2xx reply body into answer text, or an application error.
///
/// A body that is not JSON is used as the answer verbatim; only a blank
/// body is an error.
pub fn interpret_reply(body: &str) -> Result<Reply, AssistError> {
    if body.trim().is_empty() {
        return Err(AssistError::EmptyReply);
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Reply is not JSON, using raw body");
            return Ok(Reply {
                text: body.to_string(),
                request_id: None,
            });
        }
    };

    let Some(object) = value.as_object() else {
        return Ok(Reply {
            text: render_whole(&value),
            request_id: None,
        });
    };

    let request_id = request_id(object);

    for extractor in EXTRACTORS {
        let Some(field) = object.get(extractor.field).filter(|v| is_present(v)) else {
            continue;
        };
        return match (extractor.on_match)(field) {
            Probe::Text(text) => Ok(Reply { text, request_id }),
            Probe::Error(message) => Err(AssistError::Application(message)),
        };
    }

    debug!("No recognized field in reply, using whole body");
    Ok(Reply {
        text: render_whole(&value),
        request_id,
    })
}

fn render_whole(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(body: Value) -> String {
        interpret_reply(&body.to_string()).unwrap().text
    }

    #[test]
    fn response_field_is_used() {
        assert_eq!(text_of(json!({ "response": "Photosynthesis is..." })), "Photosynthesis is...");
    }

    #[test]
    fn priority_order_is_respected() {
        assert_eq!(text_of(json!({ "message": "A", "content": "B" })), "A");
        assert_eq!(
            text_of(json!({ "result": "R", "content": "C", "response": "P" })),
            "P"
        );
        assert_eq!(text_of(json!({ "result": "C" })), "C");
    }

    #[test]
    fn response_beats_error() {
        let reply = interpret_reply(r#"{"error": "ignored", "response": "ok"}"#).unwrap();
        assert_eq!(reply.text, "ok");
    }

    #[test]
    fn falsy_fields_are_skipped() {
        assert_eq!(text_of(json!({ "response": "", "message": null, "content": "C" })), "C");
        assert_eq!(text_of(json!({ "response": 0, "result": false, "content": "D" })), "D");
    }

    #[test]
    fn unrecognized_body_is_stringified() {
        let body = json!({ "foo": 1 });
        assert_eq!(text_of(body.clone()), serde_json::to_string_pretty(&body).unwrap());
    }

    #[test]
    fn error_field_is_application_error() {
        let err = interpret_reply(r#"{"error": "bad input"}"#).unwrap_err();
        match err {
            AssistError::Application(message) => assert_eq!(message, "bad input"),
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[test]
    fn structured_error_uses_its_message() {
        let err = interpret_reply(r#"{"error": {"message": "quota exceeded", "code": 7}}"#)
            .unwrap_err();
        assert!(matches!(err, AssistError::Application(m) if m == "quota exceeded"));
    }

    #[test]
    fn non_string_result_is_pretty_printed() {
        let text = text_of(json!({ "result": { "summary": "short" } }));
        assert!(text.contains("\"summary\": \"short\""));
    }

    #[test]
    fn request_id_is_captured() {
        let reply =
            interpret_reply(r#"{"response": "ok", "requestId": "req-42", "status": "completed"}"#)
                .unwrap();
        assert_eq!(reply.request_id.as_deref(), Some("req-42"));

        let reply = interpret_reply(r#"{"content": "ok", "request_id": "req-43"}"#).unwrap();
        assert_eq!(reply.request_id.as_deref(), Some("req-43"));
    }

    #[test]
    fn non_json_body_is_used_verbatim() {
        let reply = interpret_reply("Plain text answer").unwrap();
        assert_eq!(reply.text, "Plain text answer");
        assert!(reply.request_id.is_none());
    }

    #[test]
    fn blank_body_is_empty_reply() {
        assert!(matches!(interpret_reply("  \n"), Err(AssistError::EmptyReply)));
    }

    #[test]
    fn non_object_json_is_stringified() {
        assert_eq!(interpret_reply("[1,2]").unwrap().text, "[\n  1,\n  2\n]");
    }
}
