// --- File: crates/bookwire_gcal/src/error.rs ---
use bookwire_common::{downstream_error, BookwireError, FailureKind};
use thiserror::Error;

pub(crate) const SERVICE_NAME: &str = "Google Calendar";

/// Errors that can occur when talking to Google Calendar.
#[derive(Error, Debug)]
pub enum GcalError {
    /// The service account could not be found or parsed.
    #[error("{0}")]
    Credentials(String),

    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Token request failed: {status} {body}")]
    TokenRequest { status: u16, body: String },

    /// Non-success answer from the Calendar API. `context` names the call.
    #[error("{context} failed: {status} {body}")]
    Api {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("{message}")]
    Transport { kind: FailureKind, message: String },

    #[error("Unexpected Calendar API response: {0}")]
    InvalidResponse(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GcalError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GcalError::TokenRequest { .. } | GcalError::Api { .. } => FailureKind::RemoteError,
            GcalError::Transport { kind, .. } => *kind,
            _ => FailureKind::Other,
        }
    }
}

impl From<GcalError> for BookwireError {
    fn from(err: GcalError) -> Self {
        match &err {
            GcalError::Credentials(_) | GcalError::Signing(_) | GcalError::Client(_) => {
                BookwireError::ConfigError(err.to_string())
            }
            GcalError::TokenRequest { status, .. } | GcalError::Api { status, .. } => {
                downstream_error(SERVICE_NAME, err.kind(), Some(*status), err.to_string())
            }
            GcalError::Transport { kind, message } => {
                downstream_error(SERVICE_NAME, *kind, None, message.clone())
            }
            GcalError::InvalidResponse(_) => BookwireError::UnexpectedError(err.to_string()),
        }
    }
}
