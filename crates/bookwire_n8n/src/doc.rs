// --- File: crates/bookwire_n8n/src/doc.rs ---
use utoipa::OpenApi;

use crate::models::{
    BookingInput, BookingPayload, BookingResponse, CancellationInput, CancellationPayload,
    CancellationResponse, RelayOutcome,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::book_appointment_handler,
        crate::handlers::cancel_appointment_handler
    ),
    components(
        schemas(
            BookingInput,
            BookingPayload,
            BookingResponse,
            CancellationInput,
            CancellationPayload,
            CancellationResponse,
            RelayOutcome,
            bookwire_common::ErrorBody
        )
    ),
    tags(
        (name = "Appointments", description = "Appointment requests relayed to n8n")
    )
)]
pub struct N8nApiDoc;
