// --- File: crates/bookwire_n8n/src/models.rs ---
//! Request and response bodies for the appointment endpoints.

use bookwire_common::lenient_string;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Raw booking body as received from the client.
#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingInput {
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "jane@example.com"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2030-05-14"))]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "14:30"))]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "Initial consultation"))]
    pub reason: Option<String>,
}

/// Raw cancellation body as received from the client.
#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancellationInput {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().unwrap_or_default().trim().to_string()
}

/// Normalized booking forwarded to the booking webhook.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingPayload {
    pub name: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub reason: String,
}

impl From<&BookingInput> for BookingPayload {
    fn from(input: &BookingInput) -> Self {
        Self {
            name: trimmed(&input.name),
            email: trimmed(&input.email).to_lowercase(),
            date: trimmed(&input.date),
            time: trimmed(&input.time),
            reason: trimmed(&input.reason),
        }
    }
}

/// Normalized cancellation forwarded to the cancellation webhook.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancellationPayload {
    pub email: String,
    pub date: String,
    pub time: String,
}

impl From<&CancellationInput> for CancellationPayload {
    fn from(input: &CancellationInput) -> Self {
        Self {
            email: trimmed(&input.email).to_lowercase(),
            date: trimmed(&input.date),
            time: trimmed(&input.time),
        }
    }
}

/// Outcome of a successful webhook delivery.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RelayOutcome {
    pub success: bool,
    /// Parsed JSON body of the webhook response, or its raw text.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: Value,
    pub status: u16,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub data: BookingPayload,
    #[serde(rename = "n8nResult")]
    pub n8n_result: RelayOutcome,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
    pub data: CancellationPayload,
    #[serde(rename = "n8nResult")]
    pub n8n_result: RelayOutcome,
}
