//! Context assembly.

use lessonaid_core::context::{ContextInputs, RequestContext};
use serde_json::Value;

/// Assemble the context payload from whatever the host supplied.
///
/// Absent, `null`, and blank fields are left out. Known fields
/// (`sequence`, `courseId`, `unitId`) take precedence over extras with the
/// same key. Never fails.
pub fn prepare_context_data(inputs: &ContextInputs) -> RequestContext {
    let mut ctx = RequestContext::new();

    for (key, value) in &inputs.extra {
        if !value.is_null() {
            ctx.insert(key.clone(), value.clone());
        }
    }

    if let Some(sequence) = inputs.sequence.as_ref().filter(|s| !s.is_empty()) {
        // Sequence holds only strings and JSON values, so this cannot fail.
        if let Ok(value) = serde_json::to_value(sequence) {
            ctx.insert("sequence", value);
        }
    }

    if let Some(course_id) = non_blank(inputs.course_id.as_deref()) {
        ctx.insert("courseId", Value::String(course_id.to_string()));
    }

    if let Some(unit_id) = non_blank(inputs.unit_id.as_deref()) {
        ctx.insert("unitId", Value::String(unit_id.to_string()));
    }

    ctx
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lessonaid_core::context::Sequence;
    use serde_json::json;

    #[test]
    fn all_null_inputs_give_empty_context() {
        let ctx = prepare_context_data(&ContextInputs::default());
        assert!(ctx.is_empty());
        assert!(!ctx.contains_key("sequence"));
        assert!(!ctx.contains_key("courseId"));
        assert!(!ctx.contains_key("unitId"));
    }

    #[test]
    fn collects_known_fields() {
        let inputs = ContextInputs {
            sequence: Some(Sequence::new("seq-1").with_display_name("Intro")),
            course_id: Some("course-v1:edX+DemoX+Demo_Course".into()),
            unit_id: Some("unit-123".into()),
            ..ContextInputs::default()
        };
        let ctx = prepare_context_data(&inputs);
        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.get("unitId"), Some(&json!("unit-123")));
        assert_eq!(
            ctx.get("sequence"),
            Some(&json!({ "id": "seq-1", "displayName": "Intro" }))
        );
    }

    #[test]
    fn extras_are_forwarded_without_nulls() {
        let mut inputs = ContextInputs::default();
        inputs.extra.insert("language".into(), json!("es"));
        inputs.extra.insert("position".into(), json!(3));
        inputs.extra.insert("userRole".into(), Value::Null);

        let ctx = prepare_context_data(&inputs);
        assert_eq!(ctx.get("language"), Some(&json!("es")));
        assert_eq!(ctx.get("position"), Some(&json!(3)));
        assert!(!ctx.contains_key("userRole"));
    }

    #[test]
    fn known_fields_override_extras() {
        let mut inputs = ContextInputs {
            unit_id: Some("unit-real".into()),
            ..ContextInputs::default()
        };
        inputs.extra.insert("unitId".into(), json!("unit-stale"));

        let ctx = prepare_context_data(&inputs);
        assert_eq!(ctx.get("unitId"), Some(&json!("unit-real")));
    }

    #[test]
    fn blank_ids_and_empty_sequence_are_omitted() {
        let inputs = ContextInputs {
            sequence: Some(Sequence::default()),
            course_id: Some("  ".into()),
            unit_id: Some(String::new()),
            ..ContextInputs::default()
        };
        assert!(prepare_context_data(&inputs).is_empty());
    }
}
