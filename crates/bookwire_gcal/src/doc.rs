// --- File: crates/bookwire_gcal/src/doc.rs ---
use bookwire_common::services::CreatedEvent;
use utoipa::OpenApi;

use crate::handlers::{
    CreateEventRequest, CreateEventResponse, DeleteEventResponse, SearchEventsRequest,
    SearchEventsResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_event_handler,
        crate::handlers::search_events_handler,
        crate::handlers::delete_event_handler
    ),
    components(
        schemas(
            CreateEventRequest,
            CreateEventResponse,
            CreatedEvent,
            SearchEventsRequest,
            SearchEventsResponse,
            DeleteEventResponse,
            bookwire_common::ErrorBody
        )
    ),
    tags(
        (name = "Google Calendar", description = "Event proxy authenticated with a service account")
    )
)]
pub struct GcalApiDoc;
