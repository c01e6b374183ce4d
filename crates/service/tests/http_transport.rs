//! End-to-end tests for the HTTP transport against a real local server.
//!
//! Each test binds an ephemeral port, serves either the development
//! gateway or a small scripted router, and calls `call_ai_service` over
//! actual HTTP.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use lessonaid_config::AppConfig;
use lessonaid_core::context::{ContextInputs, Sequence};
use lessonaid_core::request::AssistanceResult;
use lessonaid_service::{CallParams, HttpTransport, call_ai_service, prepare_context_data};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn ask(endpoint: &str, transport: &HttpTransport) -> AssistanceResult {
    let inputs = ContextInputs {
        sequence: Some(Sequence::new("seq-1").with_display_name("Week 1")),
        course_id: Some("course-v1:edX+DemoX+Demo_Course".into()),
        unit_id: Some("unit-123".into()),
        ..ContextInputs::default()
    };
    let ctx = prepare_context_data(&inputs);
    call_ai_service(
        transport,
        CallParams {
            context_data: &ctx,
            api_endpoint: endpoint,
            course_id: inputs.course_id.as_deref(),
            user_query: "Need help understanding this content?",
        },
    )
    .await
}

fn transport() -> HttpTransport {
    HttpTransport::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn gateway_round_trip() {
    let mut config = AppConfig::default();
    config.gateway.orchestrator = "context".into();
    let base = spawn(lessonaid_gateway::router_from_config(&config)).await;
    let endpoint = format!("{base}{}", config.workflows_path);

    let result = ask(&endpoint, &transport()).await;
    match result {
        AssistanceResult::Success { text, request_id } => {
            assert_eq!(text, "course_id: course-v1:edX+DemoX+Demo_Course\nunit_id: unit-123");
            assert!(request_id.is_some());
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_friendly_failure() {
    let app = Router::new().route(
        "/assist",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Traceback: KeyError 'unitId'") }),
    );
    let base = spawn(app).await;

    let result = ask(&format!("{base}/assist"), &transport()).await;
    let message = result.message().expect("failure expected");
    assert!(message.contains("temporarily unavailable"));
    assert!(!message.contains("Traceback"));
}

#[tokio::test]
async fn plain_text_reply_is_absorbed() {
    let app = Router::new().route("/assist", post(|| async { "Just read the chapter again." }));
    let base = spawn(app).await;

    let result = ask(&format!("{base}/assist"), &transport()).await;
    assert_eq!(result.text(), Some("Just read the chapter again."));
}

#[tokio::test]
async fn error_field_on_200_is_failure() {
    let app = Router::new().route(
        "/assist",
        post(|| async { axum::Json(serde_json::json!({ "error": "bad input", "status": "MCPLLMProcessor error" })) }),
    );
    let base = spawn(app).await;

    let result = ask(&format!("{base}/assist"), &transport()).await;
    assert_eq!(result, AssistanceResult::failure("bad input"));
}

#[tokio::test]
async fn slow_server_times_out() {
    let app = Router::new().route(
        "/assist",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            "late"
        }),
    );
    let base = spawn(app).await;

    let impatient = HttpTransport::new(Duration::from_millis(200)).unwrap();
    let result = ask(&format!("{base}/assist"), &impatient).await;
    assert!(result.message().unwrap().contains("took too long"));
}
