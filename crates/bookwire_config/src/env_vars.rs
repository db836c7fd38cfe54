//! Conventional environment variable names.
//!
//! Deployments of the relay are usually configured through a handful of flat
//! variables (`PORT`, `N8N_BOOK_WEBHOOK_URL`, ...) rather than the prefixed
//! `BOOKWIRE__SECTION__KEY` form understood by the `config` crate. This module
//! maps those flat names onto [`AppConfig`] fields. They take precedence over
//! every other source.

use crate::models::{AppConfig, RunEnvironment};
use std::env;
use tracing::warn;

/// The default prefix for structured configuration environment variables
pub const DEFAULT_PREFIX: &str = "BOOKWIRE";

/// The separator for structured configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

pub const PORT: &str = "PORT";
pub const NODE_ENV: &str = "NODE_ENV";
pub const APP_ENV: &str = "APP_ENV";
pub const N8N_BOOK_WEBHOOK_URL: &str = "N8N_BOOK_WEBHOOK_URL";
pub const N8N_CANCEL_WEBHOOK_URL: &str = "N8N_CANCEL_WEBHOOK_URL";
pub const GOOGLE_SERVICE_ACCOUNT_JSON: &str = "GOOGLE_SERVICE_ACCOUNT_JSON";
pub const GOOGLE_SERVICE_ACCOUNT_KEY_PATH: &str = "GOOGLE_SERVICE_ACCOUNT_KEY_PATH";
pub const GOOGLE_CALENDAR_ID: &str = "GOOGLE_CALENDAR_ID";

/// Get the prefix for structured configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "n8n.timeout_secs")
///
/// # Returns
///
/// The environment variable name (e.g., "BOOKWIRE__N8N__TIMEOUT_SECS")
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Applies the flat variables from the process environment.
pub fn apply_conventional_env_vars(config: AppConfig) -> AppConfig {
    apply_conventional_vars_with(config, |name| env::var(name).ok())
}

/// Applies the flat variables using `lookup` to resolve each name.
///
/// Empty values are ignored so an exported-but-blank variable does not
/// clobber a value from a config file.
pub fn apply_conventional_vars_with<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = get(PORT) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => warn!("Ignoring {}={:?}: not a valid port", PORT, port),
        }
    }
    if let Some(mode) = get(APP_ENV).or_else(|| get(NODE_ENV)) {
        config.environment = RunEnvironment::from(mode);
    }
    if let Some(url) = get(N8N_BOOK_WEBHOOK_URL) {
        config.n8n.book_webhook_url = Some(url);
    }
    if let Some(url) = get(N8N_CANCEL_WEBHOOK_URL) {
        config.n8n.cancel_webhook_url = Some(url);
    }
    if let Some(blob) = get(GOOGLE_SERVICE_ACCOUNT_JSON) {
        config.gcal.service_account_json = Some(blob);
    }
    if let Some(path) = get(GOOGLE_SERVICE_ACCOUNT_KEY_PATH) {
        config.gcal.key_path = Some(path);
    }
    if let Some(calendar_id) = get(GOOGLE_CALENDAR_ID) {
        config.gcal.calendar_id = Some(calendar_id);
    }
    config
}
