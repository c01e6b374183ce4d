//! Context & request service for LessonAid.
//!
//! Stateless functions around the single network call:
//! - [`prepare_context_data`] assembles the context payload
//! - [`get_default_endpoint`] / [`validate_endpoint`] resolve the target
//! - [`call_ai_service`] performs the call and normalizes the outcome
//! - [`format_error_message`] turns any error into display text
//!
//! The network itself sits behind `lessonaid_core::Transport`;
//! [`HttpTransport`] is the reqwest implementation.

pub mod context;
pub mod endpoint;
pub mod http;
pub mod message;
pub mod reply;

pub use context::prepare_context_data;
pub use endpoint::{get_default_endpoint, resolve_endpoint, validate_endpoint};
pub use http::HttpTransport;
pub use message::{format_error_message, user_message};
pub use reply::{Reply, interpret_reply};

use lessonaid_core::context::RequestContext;
use lessonaid_core::error::AssistError;
use lessonaid_core::request::{AssistanceRequest, AssistanceResult};
use lessonaid_core::transport::Transport;
use tracing::{debug, warn};

/// Inputs for one call to the assistance service.
#[derive(Debug, Clone, Copy)]
pub struct CallParams<'a> {
    pub context_data: &'a RequestContext,
    pub api_endpoint: &'a str,
    pub course_id: Option<&'a str>,
    pub user_query: &'a str,
}

/// Send one assistance request and normalize the outcome.
///
/// An invalid endpoint fails without touching the transport. Every other
/// failure (transport, status, or an `error` field in the reply) becomes a
/// [`AssistanceResult::Failure`] carrying display text.
pub async fn call_ai_service(transport: &dyn Transport, params: CallParams<'_>) -> AssistanceResult {
    if !validate_endpoint(params.api_endpoint) {
        let err = AssistError::Configuration(format!(
            "invalid assistance endpoint '{}'",
            params.api_endpoint
        ));
        warn!(endpoint = params.api_endpoint, "Refusing to call invalid endpoint");
        return AssistanceResult::failure(format_error_message(&err));
    }

    let request = AssistanceRequest::new(
        params.context_data.clone(),
        params.course_id.map(str::to_string),
        params.user_query,
    );

    debug!(
        transport = transport.name(),
        endpoint = params.api_endpoint,
        "Calling assistance service"
    );

    let outcome = transport
        .post(params.api_endpoint, &request)
        .await
        .and_then(|body| interpret_reply(&body));

    match outcome {
        Ok(reply) => AssistanceResult::success(reply.text, reply.request_id),
        Err(e) => {
            warn!(error = %e, kind = ?e.kind(), "Assistance request failed");
            AssistanceResult::failure(format_error_message(&e))
        }
    }
}
