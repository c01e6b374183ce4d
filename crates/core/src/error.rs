//! Error types for the LessonAid domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Every failure of a
//! single ask is one of these variants; `kind()` groups them into the
//! categories the widget reports on.

use thiserror::Error;

/// The top-level error type for all LessonAid operations.
#[derive(Debug, Error)]
pub enum AssistError {
    // --- Detected before any network attempt ---
    #[error("Configuration error: {0}")]
    Configuration(String),

    // --- Transport errors ---
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API request failed: {message} (status: {status_code})")]
    Status { status_code: u16, message: String },

    // --- The service answered, but with an explicit error ---
    #[error("Application error: {0}")]
    Application(String),

    #[error("Assistance service returned an empty response")]
    EmptyReply,

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our error.
pub type Result<T> = std::result::Result<T, AssistError>;

/// Coarse classification of an [`AssistError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid or missing endpoint; no request was sent.
    Configuration,
    /// Network failure, timeout, or a non-success HTTP status.
    Transport,
    /// The service replied successfully but carried an `error` field.
    Application,
    /// Anything else.
    Internal,
}

impl AssistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Network(_) | Self::Timeout(_) | Self::Status { .. } => ErrorKind::Transport,
            Self::Application(_) | Self::EmptyReply => ErrorKind::Application,
            Self::Serialization(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether this error was raised before anything touched the network.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}
