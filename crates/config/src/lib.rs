//! Configuration loading, validation, and management for LessonAid.
//!
//! Loads configuration from `~/.lessonaid/config.toml` with environment
//! variable overrides. The endpoint itself is not validated here: it is
//! checked before every ask.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.lessonaid/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Explicit assistance endpoint; overrides the LMS-derived default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Base URL of the LMS that hosts the workflows API
    #[serde(default = "default_lms_base_url")]
    pub lms_base_url: String,

    /// Path of the workflows API below the LMS base URL
    #[serde(default = "default_workflows_path")]
    pub workflows_path: String,

    /// Transport timeout per request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Expose the debug snapshot
    #[serde(default = "default_diagnostics")]
    pub diagnostics: bool,

    /// Widget defaults
    #[serde(default)]
    pub widget: WidgetConfig,

    /// Development gateway
    #[serde(default)]
    pub gateway: GatewayConfig,
}

fn default_lms_base_url() -> String {
    "http://local.openedx.io:8000".into()
}
fn default_workflows_path() -> String {
    "/openedx-ai-extensions/v1/workflows/".into()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_diagnostics() -> bool {
    cfg!(debug_assertions)
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_request_message")]
    pub request_message: String,

    #[serde(default = "default_button_text")]
    pub button_text: String,

    /// Query sent when the widget has no request message
    #[serde(default = "default_query")]
    pub default_query: String,

    #[serde(default = "default_true")]
    pub show_response_actions: bool,

    #[serde(default = "default_true")]
    pub allow_copy: bool,

    #[serde(default)]
    pub allow_download: bool,
}

fn default_request_message() -> String {
    "Need help understanding this content?".into()
}
fn default_button_text() -> String {
    "Get AI Assistance".into()
}
fn default_query() -> String {
    "Provide learning assistance for this content".into()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            request_message: default_request_message(),
            button_text: default_button_text(),
            default_query: default_query(),
            show_response_actions: true,
            allow_copy: true,
            allow_download: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin allowed by CORS (the learning MFE in development)
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Which canned orchestrator answers: "mock" or "context"
    #[serde(default = "default_orchestrator")]
    pub orchestrator: String,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    18400
}
fn default_allowed_origin() -> String {
    "http://localhost:2000".into()
}
fn default_orchestrator() -> String {
    "mock".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
            orchestrator: default_orchestrator(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.lessonaid/config.toml),
    /// then apply environment overrides:
    /// - `LESSONAID_ENDPOINT`
    /// - `LESSONAID_LMS_BASE_URL`
    /// - `LESSONAID_TIMEOUT_SECS`
    /// - `LESSONAID_DIAGNOSTICS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// Unparseable numeric or boolean values are ignored with a warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("LESSONAID_ENDPOINT").filter(|s| !s.trim().is_empty()) {
            self.endpoint = Some(endpoint);
        }

        if let Some(base) = lookup("LESSONAID_LMS_BASE_URL").filter(|s| !s.trim().is_empty()) {
            self.lms_base_url = base;
        }

        if let Some(raw) = lookup("LESSONAID_TIMEOUT_SECS") {
            match raw.trim().parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid LESSONAID_TIMEOUT_SECS"),
            }
        }

        if let Some(raw) = lookup("LESSONAID_DIAGNOSTICS") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.diagnostics = true,
                "0" | "false" | "no" | "off" => self.diagnostics = false,
                _ => tracing::warn!(value = %raw, "Ignoring invalid LESSONAID_DIAGNOSTICS"),
            }
        }
    }

    /// The process-wide fallback endpoint.
    pub fn default_endpoint(&self) -> String {
        match self.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => endpoint.to_string(),
            _ => format!(
                "{}{}",
                self.lms_base_url.trim_end_matches('/'),
                self.workflows_path
            ),
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".lessonaid")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=600).contains(&self.request_timeout_secs) {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be between 1 and 600".into(),
            ));
        }

        if !self.workflows_path.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "workflows_path must start with '/'".into(),
            ));
        }

        if !matches!(self.gateway.orchestrator.as_str(), "mock" | "context") {
            return Err(ConfigError::ValidationError(format!(
                "unknown gateway orchestrator '{}' (expected \"mock\" or \"context\")",
                self.gateway.orchestrator
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            lms_base_url: default_lms_base_url(),
            workflows_path: default_workflows_path(),
            request_timeout_secs: default_request_timeout_secs(),
            diagnostics: default_diagnostics(),
            widget: WidgetConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.widget.button_text, "Get AI Assistance");
        assert!(config.widget.allow_copy);
        assert!(!config.widget.allow_download);
    }

    #[test]
    fn default_endpoint_joins_lms_and_path() {
        let config = AppConfig {
            lms_base_url: "https://lms.example.com/".into(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.default_endpoint(),
            "https://lms.example.com/openedx-ai-extensions/v1/workflows/"
        );
    }

    #[test]
    fn explicit_endpoint_wins() {
        let config = AppConfig {
            endpoint: Some("https://ai.example.com/assist".into()),
            ..AppConfig::default()
        };
        assert_eq!(config.default_endpoint(), "https://ai.example.com/assist");
    }

    #[test]
    fn blank_endpoint_falls_back() {
        let config = AppConfig {
            endpoint: Some("   ".into()),
            ..AppConfig::default()
        };
        assert!(config.default_endpoint().ends_with("/v1/workflows/"));
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.lms_base_url, config.lms_base_url);
        assert_eq!(parsed.gateway.port, config.gateway.port);
    }

    #[test]
    fn invalid_timeout_rejected() {
        let config = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_orchestrator_rejected() {
        let mut config = AppConfig::default();
        config.gateway.orchestrator = "llm".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
lms_base_url = "https://courses.example.org"
request_timeout_secs = 12

[widget]
button_text = "Ask the tutor"
allow_download = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.widget.button_text, "Ask the tutor");
        assert!(config.widget.allow_download);
        // Unset keys keep their defaults
        assert_eq!(
            config.widget.request_message,
            "Need help understanding this content?"
        );
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = \"soon\"").unwrap();
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LESSONAID_ENDPOINT", "https://ai.example.com/v2"),
            ("LESSONAID_TIMEOUT_SECS", "45"),
            ("LESSONAID_DIAGNOSTICS", "off"),
        ]);
        let mut config = AppConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.default_endpoint(), "https://ai.example.com/v2");
        assert_eq!(config.request_timeout_secs, 45);
        assert!(!config.diagnostics);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            "LESSONAID_TIMEOUT_SECS" => Some("forever".into()),
            "LESSONAID_ENDPOINT" => Some("".into()),
            _ => None,
        });
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("lms_base_url"));
        assert!(toml_str.contains("18400"));
    }
}
