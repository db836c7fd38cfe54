// --- File: crates/bookwire_n8n/src/service.rs ---
//! Delivery of normalized appointment payloads to the n8n webhooks.

use bookwire_common::{classify_transport_error, create_client, downstream_error};
use bookwire_common::{BookwireError, FailureKind};
use bookwire_config::env_vars::{N8N_BOOK_WEBHOOK_URL, N8N_CANCEL_WEBHOOK_URL};
use bookwire_config::N8nConfig;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::{BookingPayload, CancellationPayload, RelayOutcome};

const SERVICE_NAME: &str = "n8n";

/// Which webhook a payload is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOperation {
    Booking,
    Cancellation,
}

impl RelayOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            RelayOperation::Booking => "booking",
            RelayOperation::Cancellation => "cancellation",
        }
    }

    /// Name of the variable that configures this operation's webhook.
    pub fn url_var(self) -> &'static str {
        match self {
            RelayOperation::Booking => N8N_BOOK_WEBHOOK_URL,
            RelayOperation::Cancellation => N8N_CANCEL_WEBHOOK_URL,
        }
    }
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("n8n returned error: {status} - {status_text}")]
    RemoteError {
        status: u16,
        status_text: String,
        body: Value,
    },

    #[error("{message}")]
    Transport { kind: FailureKind, message: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl RelayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            RelayError::NotConfigured(_) | RelayError::Client(_) => FailureKind::Other,
            RelayError::RemoteError { .. } => FailureKind::RemoteError,
            RelayError::Transport { kind, .. } => *kind,
        }
    }
}

impl From<RelayError> for BookwireError {
    fn from(err: RelayError) -> Self {
        match &err {
            RelayError::NotConfigured(_) | RelayError::Client(_) => {
                BookwireError::ConfigError(err.to_string())
            }
            RelayError::RemoteError { status, .. } => {
                downstream_error(SERVICE_NAME, err.kind(), Some(*status), err.to_string())
            }
            RelayError::Transport { kind, message } => {
                downstream_error(SERVICE_NAME, *kind, None, message.clone())
            }
        }
    }
}

fn transport_message(
    kind: FailureKind,
    operation: RelayOperation,
    url: &str,
    timeout_ms: u64,
    err: &reqwest::Error,
) -> String {
    match kind {
        FailureKind::Timeout => format!(
            "Request to n8n timed out after {timeout_ms}ms. Check if n8n is running at {url}"
        ),
        FailureKind::ConnectionRefused => format!(
            "Connection refused. n8n may not be running or URL is incorrect: {url}"
        ),
        FailureKind::DnsFailure => format!("Host not found. Check webhook URL: {url}"),
        FailureKind::NoResponse => format!(
            "No response received from n8n webhook at {url}. Check if n8n is running and webhook is active."
        ),
        FailureKind::RemoteError | FailureKind::Other => format!(
            "Failed to send {} to n8n: {err}",
            operation.as_str()
        ),
    }
}

/// Forwards appointment payloads to the configured n8n webhooks.
#[derive(Debug, Clone)]
pub struct N8nClient {
    http: Client,
    book_url: Option<String>,
    cancel_url: Option<String>,
    timeout_secs: u64,
}

impl N8nClient {
    pub fn new(config: &N8nConfig) -> Result<Self, RelayError> {
        let http = create_client(config.timeout_secs, true).map_err(RelayError::Client)?;
        Ok(Self {
            http,
            book_url: config.book_webhook_url.clone(),
            cancel_url: config.cancel_webhook_url.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub async fn relay_booking(&self, booking: &BookingPayload) -> Result<RelayOutcome, RelayError> {
        self.relay(RelayOperation::Booking, booking).await
    }

    pub async fn relay_cancellation(
        &self,
        cancellation: &CancellationPayload,
    ) -> Result<RelayOutcome, RelayError> {
        self.relay(RelayOperation::Cancellation, cancellation).await
    }

    fn url_for(&self, operation: RelayOperation) -> Option<&str> {
        let url = match operation {
            RelayOperation::Booking => self.book_url.as_deref(),
            RelayOperation::Cancellation => self.cancel_url.as_deref(),
        };
        url.filter(|u| !u.trim().is_empty())
    }

    async fn relay<T: Serialize>(
        &self,
        operation: RelayOperation,
        payload: &T,
    ) -> Result<RelayOutcome, RelayError> {
        let url = self.url_for(operation).ok_or_else(|| {
            error!("{} webhook URL missing", operation.as_str());
            RelayError::NotConfigured(operation.url_var())
        })?;

        info!(operation = operation.as_str(), %url, "Sending request to n8n");
        if let Ok(body) = serde_json::to_string(payload) {
            debug!(operation = operation.as_str(), payload = %body, "n8n request payload");
        }

        let timeout_ms = self.timeout_secs * 1000;
        let transport = |err: reqwest::Error| {
            let kind = classify_transport_error(&err);
            let message = transport_message(kind, operation, url, timeout_ms, &err);
            error!(operation = operation.as_str(), %url, kind = %kind, error = %err, "n8n request failed");
            RelayError::Transport { kind, message }
        };

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(&transport)?;

        let status = response.status();
        let text = response.text().await.map_err(&transport)?;
        let data = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

        if !status.is_success() {
            error!(
                operation = operation.as_str(),
                status = status.as_u16(),
                body = %data,
                "n8n webhook returned an error status"
            );
            return Err(RelayError::RemoteError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: data,
            });
        }

        info!(
            operation = operation.as_str(),
            status = status.as_u16(),
            "n8n webhook accepted request"
        );
        debug!(response = %data, "n8n response body");

        Ok(RelayOutcome {
            success: true,
            data,
            status: status.as_u16(),
        })
    }
}
