//! Transport trait — the abstraction over the network library.
//!
//! A transport posts one JSON body to one endpoint and hands back the raw
//! reply text. It decides nothing about the reply's meaning: non-success
//! statuses and network failures come back as [`AssistError`], and any
//! 2xx body comes back as-is for the service layer to interpret.
//!
//! Implementations: `HttpTransport` (reqwest) in `lessonaid-service`, and
//! scripted transports in tests.

use async_trait::async_trait;

use crate::error::AssistError;
use crate::request::AssistanceRequest;

#[async_trait]
pub trait Transport: Send + Sync {
    /// A human-readable name for this transport (e.g., "http").
    fn name(&self) -> &str;

    /// POST `request` as JSON to `endpoint` and return the 2xx body text.
    async fn post(
        &self,
        endpoint: &str,
        request: &AssistanceRequest,
    ) -> std::result::Result<String, AssistError>;
}
