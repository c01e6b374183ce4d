//! Development gateway for LessonAid.
//!
//! Serves a stand-in for the LMS workflows API so the widget and CLI can be
//! exercised without a running platform:
//! - `GET /health`
//! - `POST {workflows_path}` with `{context, courseId, query}`
//!
//! Built on Axum.

pub mod orchestrator;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use lessonaid_config::AppConfig;
use lessonaid_core::request::AssistanceRequest;
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub use orchestrator::Orchestrator;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub orchestrator: Orchestrator,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub requests_served: AtomicU64,
}

impl GatewayState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            started_at: chrono::Utc::now(),
            requests_served: AtomicU64::new(0),
        }
    }
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(config: &AppConfig, state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(&config.workflows_path, post(workflow_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors_layer(&config.gateway.allowed_origin))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Router with state derived from `config`.
pub fn router_from_config(config: &AppConfig) -> Router {
    let state = Arc::new(GatewayState::new(Orchestrator::from_name(
        &config.gateway.orchestrator,
    )));
    build_router(config, state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    match HeaderValue::from_str(origin) {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            warn!(origin, "Invalid allowed_origin, cross-origin requests will be refused");
            cors
        }
    }
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let app = router_from_config(&config);

    info!(
        addr = %addr,
        path = %config.workflows_path,
        orchestrator = %config.gateway.orchestrator,
        "Gateway starting"
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    orchestrator: &'static str,
    requests_served: u64,
    uptime_secs: i64,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        orchestrator: state.orchestrator.name(),
        requests_served: state.requests_served.load(Ordering::Relaxed),
        uptime_secs: (chrono::Utc::now() - state.started_at).num_seconds(),
    })
}

async fn workflow_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let request_id = uuid::Uuid::new_v4().to_string();
    let timestamp = chrono::Utc::now().to_rfc3339();

    let request = match parse_workflow_request(&body) {
        Ok(request) => request,
        Err(reason) => {
            warn!(request_id = %request_id, reason = %reason, "Rejected workflow request");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": reason,
                    "requestId": request_id,
                    "timestamp": timestamp,
                    "workflow_created": false,
                })),
            );
        }
    };

    info!(
        request_id = %request_id,
        course_id = request.course_id.as_deref().unwrap_or("-"),
        context_fields = request.context.len(),
        "Workflow request received"
    );

    let mut reply = state.orchestrator.run(&request);
    if let Some(object) = reply.as_object_mut() {
        object.insert("requestId".into(), json!(request_id));
        object.insert("timestamp".into(), json!(timestamp));
        object.insert("workflow_created".into(), json!(false));
    }
    state.requests_served.fetch_add(1, Ordering::Relaxed);

    (StatusCode::OK, Json(reply))
}

fn parse_workflow_request(body: &[u8]) -> Result<AssistanceRequest, String> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| format!("Invalid JSON body: {e}"))?;
    if !value.is_object() {
        return Err("Request body must be a JSON object".into());
    }
    serde_json::from_value(value).map_err(|e| format!("Invalid workflow request: {e}"))
}
