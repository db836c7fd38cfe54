// --- File: crates/bookwire_gcal/src/routes.rs ---

use axum::{
    routing::{delete, post},
    Router,
};
use bookwire_common::handlers::not_found_handler;
use bookwire_config::AppConfig;
use std::sync::Arc;

use crate::error::GcalError;
use crate::handlers::{
    create_event_handler, delete_event_handler, search_events_handler, GcalState, SharedCalendar,
};
use crate::service::GoogleCalendarService;

/// Creates the calendar router backed by the Google Calendar REST API.
/// The backend nests it under `/api/google-calendar`.
///
/// Credentials are not read here; a missing or broken service account only
/// fails the requests that need it.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, GcalError> {
    let calendar = GoogleCalendarService::new(&config.gcal)?;
    Ok(routes_with_calendar(config, Arc::new(calendar)))
}

/// Same routes over any calendar implementation.
pub fn routes_with_calendar(config: Arc<AppConfig>, calendar: SharedCalendar) -> Router {
    let state = Arc::new(GcalState { config, calendar });

    Router::new()
        .route("/create", post(create_event_handler))
        .route("/search", post(search_events_handler))
        .route("/delete/{event_id}", delete(delete_event_handler))
        .method_not_allowed_fallback(not_found_handler)
        .with_state(state)
}
