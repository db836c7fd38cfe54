// --- File: crates/bookwire_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers depend on these traits rather than on concrete clients so the
//! HTTP layer can be exercised against substitutes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Calendar event operations.
///
/// `calendar_id` of `None` means "the configured default calendar".
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create an event from an open JSON object.
    fn create_event(
        &self,
        calendar_id: Option<&str>,
        event: Map<String, Value>,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error>;

    /// List single events between two RFC 3339 instants, ordered by start time.
    fn search_events(
        &self,
        calendar_id: Option<&str>,
        time_min: &str,
        time_max: &str,
    ) -> BoxFuture<'_, Vec<Value>, Self::Error>;

    /// Delete a calendar event.
    fn delete_event(&self, calendar_id: Option<&str>, event_id: &str)
        -> BoxFuture<'_, (), Self::Error>;
}

/// The subset of a created event returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub start: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub end: Option<Value>,
}
