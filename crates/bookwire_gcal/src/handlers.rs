// File: crates/bookwire_gcal/src/handlers.rs
use axum::{
    extract::{Path, State},
    response::Json,
};
use bookwire_common::services::{CalendarService, CreatedEvent};
use bookwire_common::{lenient_string, ApiError, ApiJson, ApiQuery, BookwireError};
use bookwire_config::AppConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::error::GcalError;

pub type SharedCalendar = Arc<dyn CalendarService<Error = GcalError>>;

// Define shared state needed by the calendar handlers
#[derive(Clone)]
pub struct GcalState {
    pub config: Arc<AppConfig>,
    pub calendar: SharedCalendar,
}

impl GcalState {
    fn failure(&self, summary: &str, err: GcalError) -> ApiError {
        error!("{}: {}", summary, err);
        let err = BookwireError::from(err);
        ApiError::from_error(summary, &err, self.config.environment.exposes_error_detail())
    }
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateEventRequest {
    /// Calendar event resource. `summary`, `start` and `end` are required.
    #[serde(rename = "eventData", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub event_data: Option<Value>,
    #[serde(rename = "calendarId", default, deserialize_with = "lenient_string")]
    pub calendar_id: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateEventResponse {
    pub success: bool,
    pub event: CreatedEvent,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchEventsRequest {
    #[serde(rename = "calendarId", default, deserialize_with = "lenient_string")]
    pub calendar_id: Option<String>,
    #[serde(rename = "timeMin", default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2030-05-01T00:00:00Z"))]
    pub time_min: Option<String>,
    #[serde(rename = "timeMax", default, deserialize_with = "lenient_string")]
    #[cfg_attr(feature = "openapi", schema(example = "2030-05-31T23:59:59Z"))]
    pub time_max: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchEventsResponse {
    pub success: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub events: Vec<Value>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DeleteEventQuery {
    #[serde(rename = "calendarId")]
    pub calendar_id: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteEventResponse {
    pub success: bool,
    pub message: String,
}

/// JSON truthiness: null, false, 0 and "" count as missing.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

fn required_event_fields(event_data: Option<Value>) -> Option<Map<String, Value>> {
    match event_data {
        Some(Value::Object(map))
            if ["summary", "start", "end"]
                .iter()
                .all(|field| is_present(map.get(*field))) =>
        {
            Some(map)
        }
        _ => None,
    }
}

/// Handler to create a calendar event.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/google-calendar/create",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = CreateEventResponse),
        (status = 400, description = "eventData.summary, start or end missing", body = bookwire_common::ErrorBody),
        (status = 500, description = "Credential exchange or Calendar API failure", body = bookwire_common::ErrorBody)
    ),
    tag = "Google Calendar"
))]
pub async fn create_event_handler(
    State(state): State<Arc<GcalState>>,
    ApiJson(request): ApiJson<CreateEventRequest>,
) -> Result<Json<CreateEventResponse>, ApiError> {
    let Some(event) = required_event_fields(request.event_data) else {
        return Err(ApiError::bad_request(
            "Missing required fields: eventData.summary, eventData.start, eventData.end",
        ));
    };

    let created = state
        .calendar
        .create_event(request.calendar_id.as_deref(), event)
        .await
        .map_err(|e| state.failure("Failed to create calendar event", e))?;

    Ok(Json(CreateEventResponse {
        success: true,
        event: created,
    }))
}

/// Handler to list events between two instants.
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/google-calendar/search",
    request_body = SearchEventsRequest,
    responses(
        (status = 200, description = "Matching events, at most 50", body = SearchEventsResponse),
        (status = 400, description = "timeMin or timeMax missing", body = bookwire_common::ErrorBody),
        (status = 500, description = "Credential exchange or Calendar API failure", body = bookwire_common::ErrorBody)
    ),
    tag = "Google Calendar"
))]
pub async fn search_events_handler(
    State(state): State<Arc<GcalState>>,
    ApiJson(request): ApiJson<SearchEventsRequest>,
) -> Result<Json<SearchEventsResponse>, ApiError> {
    let (Some(time_min), Some(time_max)) = (
        request.time_min.filter(|t| !t.is_empty()),
        request.time_max.filter(|t| !t.is_empty()),
    ) else {
        return Err(ApiError::bad_request(
            "Missing required fields: timeMin, timeMax",
        ));
    };

    let events = state
        .calendar
        .search_events(request.calendar_id.as_deref(), &time_min, &time_max)
        .await
        .map_err(|e| state.failure("Failed to search calendar events", e))?;

    Ok(Json(SearchEventsResponse {
        success: true,
        events,
    }))
}

/// Handler to delete a calendar event.
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/google-calendar/delete/{event_id}",
    params(
        ("event_id" = String, Path, description = "Calendar event id"),
        DeleteEventQuery
    ),
    responses(
        (status = 200, description = "Event deleted", body = DeleteEventResponse),
        (status = 400, description = "Malformed query string", body = bookwire_common::ErrorBody),
        (status = 500, description = "Credential exchange or Calendar API failure", body = bookwire_common::ErrorBody)
    ),
    tag = "Google Calendar"
))]
pub async fn delete_event_handler(
    State(state): State<Arc<GcalState>>,
    Path(event_id): Path<String>,
    ApiQuery(query): ApiQuery<DeleteEventQuery>,
) -> Result<Json<DeleteEventResponse>, ApiError> {
    info!("Delete requested for event {}", event_id);
    state
        .calendar
        .delete_event(query.calendar_id.as_deref(), &event_id)
        .await
        .map_err(|e| state.failure("Failed to delete calendar event", e))?;

    Ok(Json(DeleteEventResponse {
        success: true,
        message: "Event deleted successfully".to_string(),
    }))
}
