// --- File: crates/bookwire_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CALENDAR_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Deployment mode. Controls how much error detail is returned to clients.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum RunEnvironment {
    #[default]
    Development,
    Test,
    Production,
}

impl RunEnvironment {
    /// Raw downstream error messages are only returned outside production.
    pub fn exposes_error_detail(self) -> bool {
        !matches!(self, RunEnvironment::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunEnvironment::Development => "development",
            RunEnvironment::Test => "test",
            RunEnvironment::Production => "production",
        }
    }
}

// Anything unrecognised is treated as production so detail is never leaked by a typo.
impl From<String> for RunEnvironment {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => RunEnvironment::Development,
            "test" => RunEnvironment::Test,
            _ => RunEnvironment::Production,
        }
    }
}

impl From<RunEnvironment> for String {
    fn from(value: RunEnvironment) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RunEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- n8n Webhook Config ---
// Both URLs are mandatory at startup, see AppConfig::validate.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct N8nConfig {
    pub book_webhook_url: Option<String>,   // N8N_BOOK_WEBHOOK_URL
    pub cancel_webhook_url: Option<String>, // N8N_CANCEL_WEBHOOK_URL
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

impl Default for N8nConfig {
    fn default() -> Self {
        Self {
            book_webhook_url: None,
            cancel_webhook_url: None,
            timeout_secs: default_webhook_timeout(),
        }
    }
}

fn default_webhook_timeout() -> u64 {
    DEFAULT_WEBHOOK_TIMEOUT_SECS
}

// --- Google Calendar Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    /// Service account key, base64 encoded or raw JSON (GOOGLE_SERVICE_ACCOUNT_JSON).
    #[serde(skip_serializing)]
    pub service_account_json: Option<String>,
    /// Path to the service account key file (GOOGLE_SERVICE_ACCOUNT_KEY_PATH).
    pub key_path: Option<String>,
    /// Calendar used when a request names none (GOOGLE_CALENDAR_ID).
    pub calendar_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_calendar_timeout")]
    pub timeout_secs: u64,
}

impl Default for GcalConfig {
    fn default() -> Self {
        Self {
            service_account_json: None,
            key_path: None,
            calendar_id: None,
            token_uri: default_token_uri(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_calendar_timeout(),
        }
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_CALENDAR_API_BASE.to_string()
}

fn default_calendar_timeout() -> u64 {
    DEFAULT_CALENDAR_TIMEOUT_SECS
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub environment: RunEnvironment,
    #[serde(default)]
    pub n8n: N8nConfig,
    #[serde(default)]
    pub gcal: GcalConfig,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Configuration errors:\n{}", .0.join("\n"))]
pub struct ConfigValidationError(pub Vec<String>);

impl AppConfig {
    /// Checks the settings the server cannot start without.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut errors = Vec::new();
        if is_blank(self.n8n.book_webhook_url.as_deref()) {
            errors.push("N8N_BOOK_WEBHOOK_URL is required".to_string());
        }
        if is_blank(self.n8n.cancel_webhook_url.as_deref()) {
            errors.push("N8N_CANCEL_WEBHOOK_URL is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigValidationError(errors))
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
