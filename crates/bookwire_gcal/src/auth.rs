// File: crates/bookwire_gcal/src/auth.rs
//! Service-account credential exchange.
//!
//! A short-lived RS256 assertion is signed with the service account's key and
//! traded for a bearer token at the OAuth2 token endpoint. Tokens are not
//! cached: every calendar operation performs a fresh exchange.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bookwire_common::classify_transport_error;
use bookwire_config::GcalConfig;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};

use crate::error::GcalError;

pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Lifetime of a signed assertion, in seconds.
pub const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Deserialize, Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceAccountKey {
    // Keys pasted into env files often carry literal `\n` sequences.
    fn with_unescaped_key(mut self) -> Self {
        self.private_key = self.private_key.replace("\\n", "\n");
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub scope: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Parses `GOOGLE_SERVICE_ACCOUNT_JSON`, which may be base64 encoded JSON or
/// the raw JSON document.
pub fn parse_service_account_blob(blob: &str) -> Result<ServiceAccountKey, GcalError> {
    let blob = blob.trim();
    let decoded = STANDARD
        .decode(blob)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|text| serde_json::from_str::<ServiceAccountKey>(&text).ok());

    let key = match decoded {
        Some(key) => key,
        None => serde_json::from_str::<ServiceAccountKey>(blob).map_err(|_| {
            GcalError::Credentials("Failed to parse GOOGLE_SERVICE_ACCOUNT_JSON".to_string())
        })?,
    };
    Ok(key.with_unescaped_key())
}

/// Loads the service account, preferring the inline blob over the key file.
pub async fn load_service_account(config: &GcalConfig) -> Result<ServiceAccountKey, GcalError> {
    if let Some(blob) = config
        .service_account_json
        .as_deref()
        .filter(|b| !b.trim().is_empty())
    {
        return parse_service_account_blob(blob);
    }

    let Some(path) = config.key_path.as_deref().filter(|p| !p.trim().is_empty()) else {
        return Err(GcalError::Credentials(
            "No service account configured: set GOOGLE_SERVICE_ACCOUNT_JSON or GOOGLE_SERVICE_ACCOUNT_KEY_PATH"
                .to_string(),
        ));
    };

    let load_failed =
        |reason: String| GcalError::Credentials(format!("Failed to load service account from {path}: {reason}"));
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| load_failed(e.to_string()))?;
    let key: ServiceAccountKey =
        serde_json::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
    Ok(key.with_unescaped_key())
}

/// Signs the token-request assertion for `key`, valid from `now` (Unix seconds).
pub fn build_assertion(
    key: &ServiceAccountKey,
    audience: &str,
    now: i64,
) -> Result<String, GcalError> {
    let claims = Claims {
        iss: key.client_email.clone(),
        sub: key.client_email.clone(),
        aud: audience.to_string(),
        scope: CALENDAR_SCOPE.to_string(),
        iat: now,
        exp: now + ASSERTION_TTL_SECS,
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?)
}

/// Exchanges a signed assertion for an access token.
pub async fn fetch_access_token(
    http: &Client,
    token_uri: &str,
    assertion: &str,
) -> Result<String, GcalError> {
    debug!("Requesting access token from {}", token_uri);
    let response = http
        .post(token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
        .send()
        .await
        .map_err(|e| {
            let kind = classify_transport_error(&e);
            error!(url = %token_uri, kind = %kind, error = %e, "Token request failed");
            GcalError::Transport {
                kind,
                message: format!("Token request to {token_uri} failed: {e}"),
            }
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| GcalError::Transport {
        kind: classify_transport_error(&e),
        message: format!("Token request to {token_uri} failed: {e}"),
    })?;

    if !status.is_success() {
        error!(status = status.as_u16(), body = %body, "Token endpoint rejected assertion");
        return Err(GcalError::TokenRequest {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| GcalError::InvalidResponse(format!("token response: {e}")))?;
    Ok(token.access_token)
}

/// Runs the whole exchange: load credentials, sign, trade for a token.
pub async fn obtain_access_token(http: &Client, config: &GcalConfig) -> Result<String, GcalError> {
    let key = load_service_account(config).await?;
    debug!(
        client_email = %key.client_email,
        project_id = key.project_id.as_deref().unwrap_or("-"),
        "Loaded service account"
    );
    let assertion = build_assertion(&key, &config.token_uri, chrono::Utc::now().timestamp())?;
    fetch_access_token(http, &config.token_uri, &assertion).await
}
