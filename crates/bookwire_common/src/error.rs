// --- File: crates/bookwire_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Why an outbound HTTP call failed, independent of the HTTP client in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response within the configured timeout.
    Timeout,
    /// The remote host actively refused the connection.
    ConnectionRefused,
    /// The host name could not be resolved.
    DnsFailure,
    /// The remote answered with a non-success status.
    RemoteError,
    /// The request went out but no usable response came back.
    NoResponse,
    Other,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::ConnectionRefused => "connection-refused",
            FailureKind::DnsFailure => "dns-failure",
            FailureKind::RemoteError => "remote-error",
            FailureKind::NoResponse => "no-response",
            FailureKind::Other => "other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The base error type shared by all Bookwire crates.
///
/// Integration crates convert their own errors into this taxonomy at the
/// handler boundary, see `From<RelayError>` and `From<GcalError>`.
#[derive(Error, Debug)]
pub enum BookwireError {
    /// Client input was malformed. Always carries itemized reasons.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    /// A required endpoint or credential is missing or unusable.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The downstream service did not answer in time.
    #[error("{message}")]
    DownstreamTimeout { service: String, message: String },

    /// DNS or connection failure, or the connection dropped without a response.
    #[error("{message}")]
    DownstreamUnreachable { service: String, message: String },

    /// The downstream service answered with a non-success status.
    #[error("{message}")]
    DownstreamErrorResponse {
        service: String,
        status: u16,
        message: String,
    },

    /// Anything else.
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl BookwireError {
    /// A message that is safe to show to clients in production.
    pub fn public_message(&self) -> String {
        match self {
            BookwireError::ValidationError(_) => "The request contained invalid fields".to_string(),
            BookwireError::ConfigError(_) => "The service is not configured correctly".to_string(),
            BookwireError::DownstreamTimeout { service, .. } => {
                format!("{service} did not respond in time")
            }
            BookwireError::DownstreamUnreachable { service, .. } => {
                format!("{service} is currently unreachable")
            }
            BookwireError::DownstreamErrorResponse { service, .. } => {
                format!("{service} rejected the request")
            }
            BookwireError::UnexpectedError(_) => "An unexpected error occurred".to_string(),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

// Downstream failures are reported as 500: clients cannot act on a 502/504.
impl HttpStatusCode for BookwireError {
    fn status_code(&self) -> u16 {
        match self {
            BookwireError::ValidationError(_) => 400,
            BookwireError::ConfigError(_) => 500,
            BookwireError::DownstreamTimeout { .. } => 500,
            BookwireError::DownstreamUnreachable { .. } => 500,
            BookwireError::DownstreamErrorResponse { .. } => 500,
            BookwireError::UnexpectedError(_) => 500,
        }
    }
}

/// Maps a classified transport failure onto the shared taxonomy.
pub fn downstream_error(
    service: &str,
    kind: FailureKind,
    status: Option<u16>,
    message: impl Into<String>,
) -> BookwireError {
    let service = service.to_string();
    let message = message.into();
    match kind {
        FailureKind::Timeout => BookwireError::DownstreamTimeout { service, message },
        FailureKind::ConnectionRefused | FailureKind::DnsFailure | FailureKind::NoResponse => {
            BookwireError::DownstreamUnreachable { service, message }
        }
        FailureKind::RemoteError => BookwireError::DownstreamErrorResponse {
            service,
            status: status.unwrap_or(500),
            message,
        },
        FailureKind::Other => BookwireError::UnexpectedError(message),
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> BookwireError {
    BookwireError::ConfigError(message.to_string())
}

pub fn validation_error(details: Vec<String>) -> BookwireError {
    BookwireError::ValidationError(details)
}
