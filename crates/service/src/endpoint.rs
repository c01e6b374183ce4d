//! Endpoint resolution and validation.

use lessonaid_config::AppConfig;
use reqwest::Url;

/// The configured fallback endpoint.
pub fn get_default_endpoint(config: &AppConfig) -> String {
    config.default_endpoint()
}

/// Pick the caller's endpoint if one was given, otherwise the default.
pub fn resolve_endpoint(override_endpoint: Option<&str>, config: &AppConfig) -> String {
    match override_endpoint.map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => endpoint.to_string(),
        _ => get_default_endpoint(config),
    }
}

/// An endpoint is usable when it is an absolute `http`/`https` URL with a host.
pub fn validate_endpoint(endpoint: &str) -> bool {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return false;
    }

    match Url::parse(endpoint) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
