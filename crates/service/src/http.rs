//! reqwest-backed transport.
//!
//! Posts the assistance request as JSON and returns the body of any 2xx
//! reply. Non-success statuses and network failures are mapped onto
//! [`AssistError`] here so nothing above this layer sees reqwest types.

use std::time::Duration;

use async_trait::async_trait;
use lessonaid_config::AppConfig;
use lessonaid_core::error::AssistError;
use lessonaid_core::request::AssistanceRequest;
use lessonaid_core::transport::Transport;
use tracing::{debug, warn};

/// HTTP transport to the assistance endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, AssistError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lessonaid/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AssistError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AssistError> {
        Self::new(Duration::from_secs(config.request_timeout_secs))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post(
        &self,
        endpoint: &str,
        request: &AssistanceRequest,
    ) -> std::result::Result<String, AssistError> {
        debug!(
            endpoint,
            course_id = request.course_id.as_deref().unwrap_or("-"),
            context_fields = request.context.len(),
            "Sending assistance request"
        );

        let response = self
            .client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Assistance service returned error");
            return Err(AssistError::Status {
                status_code: status.as_u16(),
                message: error_body,
            });
        }

        response.text().await.map_err(|e| classify_reqwest_error(&e))
    }
}

/// Map a reqwest error onto the error taxonomy.
pub fn classify_reqwest_error(err: &reqwest::Error) -> AssistError {
    if err.is_timeout() {
        AssistError::Timeout(err.to_string())
    } else if let Some(status) = err.status() {
        AssistError::Status {
            status_code: status.as_u16(),
            message: err.to_string(),
        }
    } else if err.is_connect() || err.is_request() || err.is_body() {
        AssistError::Network(err.to_string())
    } else if err.is_builder() {
        AssistError::Configuration(err.to_string())
    } else {
        AssistError::Internal(err.to_string())
    }
}
