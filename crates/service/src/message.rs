//! User-facing error messages.
//!
//! Everything that reaches the response view goes through here, so no raw
//! error chain, response body, or status text is ever shown to a learner.

use std::error::Error as StdError;

use lessonaid_core::error::AssistError;

pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";
pub const CONFIGURATION_MESSAGE: &str = "Invalid API endpoint configuration";

/// Map any error to a single displayable sentence. Never panics.
///
/// The error and its `source()` chain are searched for a recognized type;
/// unknown errors get the generic message.
pub fn format_error_message(err: &(dyn StdError + 'static)) -> String {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(assist) = e.downcast_ref::<AssistError>() {
            return user_message(assist);
        }
        if let Some(http) = e.downcast_ref::<reqwest::Error>() {
            return user_message(&crate::http::classify_reqwest_error(http));
        }
        if e.downcast_ref::<serde_json::Error>().is_some() {
            return user_message(&AssistError::Internal(e.to_string()));
        }
        current = e.source();
    }
    GENERIC_MESSAGE.to_string()
}

/// The message for a known [`AssistError`].
pub fn user_message(err: &AssistError) -> String {
    match err {
        AssistError::Configuration(_) => CONFIGURATION_MESSAGE.to_string(),
        AssistError::Network(_) => {
            "Unable to reach the AI service. Please check your connection and try again.".into()
        }
        AssistError::Timeout(_) => {
            "The AI service took too long to respond. Please try again.".into()
        }
        AssistError::Status { status_code, .. } => status_message(*status_code),
        AssistError::Application(message) => {
            let message = message.trim();
            if message.is_empty() {
                GENERIC_MESSAGE.to_string()
            } else {
                message.to_string()
            }
        }
        AssistError::EmptyReply => "The AI service returned an empty response.".into(),
        AssistError::Serialization(_) | AssistError::Internal(_) => GENERIC_MESSAGE.to_string(),
    }
}

fn status_message(status_code: u16) -> String {
    match status_code {
        401 | 403 => "You are not authorized to use AI assistance for this content.".into(),
        404 => "The AI assistance service could not be found.".into(),
        429 => "Too many requests. Please wait a moment and try again.".into(),
        500..=599 => "The AI service is temporarily unavailable. Please try again later.".into(),
        other => format!("The AI service returned an error (status {other})."),
    }
}
