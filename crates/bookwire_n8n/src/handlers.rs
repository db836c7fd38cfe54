// File: crates/bookwire_n8n/src/handlers.rs
use axum::{extract::State, response::Json};
use bookwire_common::{ApiError, ApiPayload, BookwireError};
use bookwire_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{
    BookingInput, BookingPayload, BookingResponse, CancellationInput, CancellationPayload,
    CancellationResponse,
};
use crate::service::N8nClient;
use crate::validator::{validate_booking, validate_cancellation};

// Shared state for the appointment handlers
#[derive(Clone)]
pub struct N8nState {
    pub config: Arc<AppConfig>,
    pub relay: Arc<N8nClient>,
}

impl N8nState {
    fn relay_failure(&self, summary: &str, err: impl Into<BookwireError>) -> ApiError {
        let err = err.into();
        ApiError::from_error(summary, &err, self.config.environment.exposes_error_detail())
    }
}

/// Validate, normalize and forward a booking request to n8n.
///
/// The body may be JSON or an urlencoded form.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/appointments/book",
    request_body(content(
        (BookingInput = "application/json"),
        (BookingInput = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "Booking forwarded to n8n", body = BookingResponse),
        (status = 400, description = "Validation failed or malformed body", body = bookwire_common::ErrorBody),
        (status = 500, description = "n8n could not be reached or rejected the request", body = bookwire_common::ErrorBody)
    ),
    tag = "Appointments"
))]
pub async fn book_appointment_handler(
    State(state): State<Arc<N8nState>>,
    ApiPayload(input): ApiPayload<BookingInput>,
) -> Result<Json<BookingResponse>, ApiError> {
    let validation = validate_booking(&input);
    if !validation.valid {
        warn!("Booking validation failed: {:?}", validation.errors);
        return Err(ApiError::validation(validation.errors));
    }

    let booking = BookingPayload::from(&input);
    info!("Relaying booking for {} on {} at {}", booking.email, booking.date, booking.time);

    let n8n_result = state
        .relay
        .relay_booking(&booking)
        .await
        .map_err(|e| state.relay_failure("Failed to process booking request", e))?;

    Ok(Json(BookingResponse {
        success: true,
        message: "Appointment booking request processed successfully".to_string(),
        data: booking,
        n8n_result,
    }))
}

/// Validate, normalize and forward a cancellation request to n8n.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/appointments/cancel",
    request_body(content(
        (CancellationInput = "application/json"),
        (CancellationInput = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "Cancellation forwarded to n8n", body = CancellationResponse),
        (status = 400, description = "Validation failed or malformed body", body = bookwire_common::ErrorBody),
        (status = 500, description = "n8n could not be reached or rejected the request", body = bookwire_common::ErrorBody)
    ),
    tag = "Appointments"
))]
pub async fn cancel_appointment_handler(
    State(state): State<Arc<N8nState>>,
    ApiPayload(input): ApiPayload<CancellationInput>,
) -> Result<Json<CancellationResponse>, ApiError> {
    let validation = validate_cancellation(&input);
    if !validation.valid {
        warn!("Cancellation validation failed: {:?}", validation.errors);
        return Err(ApiError::validation(validation.errors));
    }

    let cancellation = CancellationPayload::from(&input);
    info!(
        "Relaying cancellation for {} on {} at {}",
        cancellation.email, cancellation.date, cancellation.time
    );

    let n8n_result = state
        .relay
        .relay_cancellation(&cancellation)
        .await
        .map_err(|e| state.relay_failure("Failed to process cancellation request", e))?;

    Ok(Json(CancellationResponse {
        success: true,
        message: "Appointment cancellation request processed successfully".to_string(),
        data: cancellation,
        n8n_result,
    }))
}
