// --- File: crates/bookwire_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait on top
//! of the Calendar v3 REST API.

use bookwire_common::classify_transport_error;
use bookwire_common::services::{BoxFuture, CalendarService, CreatedEvent};
use bookwire_common::create_client;
use bookwire_config::GcalConfig;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{error, info, warn};

use crate::auth::obtain_access_token;
use crate::error::GcalError;

/// Calendar used when neither the request nor the configuration names one.
pub const FALLBACK_CALENDAR_ID: &str = "primary";
/// Upper bound on events returned by a search. Further pages are not fetched.
pub const SEARCH_MAX_RESULTS: u32 = 50;

#[derive(Deserialize)]
struct EventList {
    // The API may send `null` as well as omit the field.
    #[serde(default)]
    items: Option<Vec<Value>>,
}

/// Google Calendar service implementation.
#[derive(Debug, Clone)]
pub struct GoogleCalendarService {
    http: Client,
    config: GcalConfig,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl GoogleCalendarService {
    pub fn new(config: &GcalConfig) -> Result<Self, GcalError> {
        let http = create_client(config.timeout_secs, true).map_err(GcalError::Client)?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Explicit id, else the configured default, else `primary`.
    pub fn resolve_calendar_id(&self, explicit: Option<&str>) -> String {
        non_blank(explicit)
            .or_else(|| non_blank(self.config.calendar_id.as_deref()))
            .unwrap_or(FALLBACK_CALENDAR_ID)
            .to_string()
    }

    fn events_url(&self, calendar_id: &str) -> String {
        format!(
            "{}/calendars/{}/events",
            self.config.api_base_url.trim_end_matches('/'),
            urlencoding::encode(calendar_id)
        )
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> GcalError {
        let kind = classify_transport_error(&err);
        error!(%url, kind = %kind, error = %err, "Calendar API request failed");
        GcalError::Transport {
            kind,
            message: format!("Calendar API request to {url} failed: {err}"),
        }
    }

    async fn read_body(&self, url: &str, response: Response) -> Result<String, GcalError> {
        response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))
    }

    async fn create(
        &self,
        calendar_id: String,
        mut event: Map<String, Value>,
    ) -> Result<CreatedEvent, GcalError> {
        if event.remove("attendees").is_some() {
            warn!("Removed attendees field from event data (service accounts cannot invite attendees)");
        }

        let token = obtain_access_token(&self.http, &self.config).await?;
        let url = self.events_url(&calendar_id);
        info!("Creating calendar event in {}", calendar_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&event)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        let status = response.status();
        let body = self.read_body(&url, response).await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<Value>(&body)
                .unwrap_or_else(|_| json!({ "message": body }));
            error!(status = status.as_u16(), body = %detail, "Calendar API rejected event");
            return Err(GcalError::Api {
                context: "Calendar API",
                status: status.as_u16(),
                body: detail.to_string(),
            });
        }

        let created: CreatedEvent = serde_json::from_str(&body)
            .map_err(|e| GcalError::InvalidResponse(format!("created event: {e}")))?;
        info!("Created calendar event {:?}", created.id);
        Ok(created)
    }

    async fn search(
        &self,
        calendar_id: String,
        time_min: String,
        time_max: String,
    ) -> Result<Vec<Value>, GcalError> {
        let token = obtain_access_token(&self.http, &self.config).await?;
        let url = self.events_url(&calendar_id);
        let max_results = SEARCH_MAX_RESULTS.to_string();
        info!(
            "Searching calendar {} between {} and {}",
            calendar_id, time_min, time_max
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        let status = response.status();
        let body = self.read_body(&url, response).await?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "Calendar search failed");
            return Err(GcalError::Api {
                context: "Search request",
                status: status.as_u16(),
                body,
            });
        }

        let list: EventList = serde_json::from_str(&body)
            .map_err(|e| GcalError::InvalidResponse(format!("event list: {e}")))?;
        let items = list.items.unwrap_or_default();
        info!("Found {} calendar events", items.len());
        Ok(items)
    }

    async fn delete(&self, calendar_id: String, event_id: String) -> Result<(), GcalError> {
        let token = obtain_access_token(&self.http, &self.config).await?;
        let url = format!(
            "{}/{}",
            self.events_url(&calendar_id),
            urlencoding::encode(&event_id)
        );
        info!("Deleting calendar event {} from {}", event_id, calendar_id);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;
        let status = response.status();

        if !status.is_success() {
            let body = self.read_body(&url, response).await?;
            error!(status = status.as_u16(), body = %body, "Calendar delete failed");
            return Err(GcalError::Api {
                context: "Delete request",
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalError;

    fn create_event(
        &self,
        calendar_id: Option<&str>,
        event: Map<String, Value>,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let calendar_id = self.resolve_calendar_id(calendar_id);
        Box::pin(self.create(calendar_id, event))
    }

    fn search_events(
        &self,
        calendar_id: Option<&str>,
        time_min: &str,
        time_max: &str,
    ) -> BoxFuture<'_, Vec<Value>, Self::Error> {
        let calendar_id = self.resolve_calendar_id(calendar_id);
        Box::pin(self.search(calendar_id, time_min.to_string(), time_max.to_string()))
    }

    fn delete_event(
        &self,
        calendar_id: Option<&str>,
        event_id: &str,
    ) -> BoxFuture<'_, (), Self::Error> {
        let calendar_id = self.resolve_calendar_id(calendar_id);
        Box::pin(self.delete(calendar_id, event_id.to_string()))
    }
}
