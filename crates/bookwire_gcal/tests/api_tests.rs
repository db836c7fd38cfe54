use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bookwire_common::services::{BoxFuture, CalendarService, CreatedEvent};
use bookwire_config::{AppConfig, RunEnvironment};
use bookwire_gcal::{routes_with_calendar, GcalError};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Records every call and answers from canned data.
#[derive(Default)]
struct FakeCalendar {
    calls: Mutex<Vec<(String, Option<String>, Value)>>,
    fail: bool,
}

impl FakeCalendar {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn record(&self, op: &str, calendar_id: Option<&str>, payload: Value) {
        self.calls
            .lock()
            .unwrap()
            .push((op.to_string(), calendar_id.map(str::to_string), payload));
    }

    fn calls(&self) -> Vec<(String, Option<String>, Value)> {
        self.calls.lock().unwrap().clone()
    }

    fn failure(&self) -> GcalError {
        GcalError::Api {
            context: "Calendar API",
            status: 403,
            body: "{\"message\":\"Forbidden\"}".to_string(),
        }
    }
}

impl CalendarService for FakeCalendar {
    type Error = GcalError;

    fn create_event(
        &self,
        calendar_id: Option<&str>,
        event: Map<String, Value>,
    ) -> BoxFuture<'_, CreatedEvent, GcalError> {
        let summary = event.get("summary").and_then(Value::as_str).map(str::to_string);
        self.record("create", calendar_id, Value::Object(event));
        let result = if self.fail {
            Err(self.failure())
        } else {
            Ok(CreatedEvent {
                id: Some("evt-1".to_string()),
                html_link: Some("https://calendar.google.com/event?eid=evt-1".to_string()),
                summary,
                start: Some(json!({ "dateTime": "2030-06-01T14:30:00Z" })),
                end: Some(json!({ "dateTime": "2030-06-01T15:00:00Z" })),
            })
        };
        Box::pin(async move { result })
    }

    fn search_events(
        &self,
        calendar_id: Option<&str>,
        time_min: &str,
        time_max: &str,
    ) -> BoxFuture<'_, Vec<Value>, GcalError> {
        self.record("search", calendar_id, json!([time_min, time_max]));
        let result = if self.fail {
            Err(self.failure())
        } else {
            Ok(vec![json!({ "id": "a" })])
        };
        Box::pin(async move { result })
    }

    fn delete_event(
        &self,
        calendar_id: Option<&str>,
        event_id: &str,
    ) -> BoxFuture<'_, (), GcalError> {
        self.record("delete", calendar_id, json!(event_id));
        let result = if self.fail { Err(self.failure()) } else { Ok(()) };
        Box::pin(async move { result })
    }
}

fn app(calendar: Arc<FakeCalendar>, environment: RunEnvironment) -> Router {
    let config = AppConfig {
        environment,
        ..AppConfig::default()
    };
    Router::new().nest(
        "/api/google-calendar",
        routes_with_calendar(Arc::new(config), calendar),
    )
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_without_required_fields_never_reaches_calendar() {
    let calendar = Arc::new(FakeCalendar::default());

    for body in [
        json!({}),
        json!({ "eventData": "nope" }),
        json!({ "eventData": { "start": {}, "end": {} } }),
        json!({ "eventData": { "summary": "", "start": {}, "end": {} } }),
        json!({ "eventData": { "summary": "x", "start": null, "end": {} } }),
    ] {
        let response = app(calendar.clone(), RunEnvironment::Development)
            .oneshot(json_request("POST", "/api/google-calendar/create", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            read_json(response).await,
            json!({
                "success": false,
                "error": "Missing required fields: eventData.summary, eventData.start, eventData.end"
            })
        );
    }
    assert!(calendar.calls().is_empty());
}

#[tokio::test]
async fn test_create_returns_event_subset() {
    let calendar = Arc::new(FakeCalendar::default());
    let body = json!({
        "calendarId": "team@example.com",
        "eventData": {
            "summary": "Consultation",
            "start": { "dateTime": "2030-06-01T14:30:00Z" },
            "end": { "dateTime": "2030-06-01T15:00:00Z" }
        }
    });

    let response = app(calendar.clone(), RunEnvironment::Development)
        .oneshot(json_request("POST", "/api/google-calendar/create", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["event"]["id"], "evt-1");
    assert_eq!(json["event"]["htmlLink"], "https://calendar.google.com/event?eid=evt-1");
    assert_eq!(json["event"]["summary"], "Consultation");

    let calls = calendar.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1.as_deref(), Some("team@example.com"));
}

#[tokio::test]
async fn test_search_requires_both_bounds() {
    let calendar = Arc::new(FakeCalendar::default());
    let response = app(calendar.clone(), RunEnvironment::Development)
        .oneshot(json_request(
            "POST",
            "/api/google-calendar/search",
            json!({ "timeMin": "2030-06-01T00:00:00Z" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await["error"],
        "Missing required fields: timeMin, timeMax"
    );
    assert!(calendar.calls().is_empty());
}

#[tokio::test]
async fn test_search_returns_events() {
    let calendar = Arc::new(FakeCalendar::default());
    let response = app(calendar.clone(), RunEnvironment::Development)
        .oneshot(json_request(
            "POST",
            "/api/google-calendar/search",
            json!({ "timeMin": "2030-06-01T00:00:00Z", "timeMax": "2030-06-02T00:00:00Z" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "success": true, "events": [{ "id": "a" }] })
    );
    assert_eq!(calendar.calls()[0].1, None);
}

#[tokio::test]
async fn test_delete_passes_event_and_calendar_ids() {
    let calendar = Arc::new(FakeCalendar::default());
    let response = app(calendar.clone(), RunEnvironment::Development)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/google-calendar/delete/evt-9?calendarId=team%40example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "success": true, "message": "Event deleted successfully" })
    );
    assert_eq!(
        calendar.calls(),
        vec![(
            "delete".to_string(),
            Some("team@example.com".to_string()),
            json!("evt-9")
        )]
    );
}

#[tokio::test]
async fn test_delete_with_malformed_query_is_400_envelope() {
    let calendar = Arc::new(FakeCalendar::default());
    let response = app(calendar.clone(), RunEnvironment::Development)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/google-calendar/delete/evt-9?calendarId=a&calendarId=b")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Bad Request");
    assert!(json["message"].as_str().unwrap().contains("calendarId"));
    assert!(calendar.calls().is_empty());
}

#[tokio::test]
async fn test_wrong_method_is_404_envelope() {
    let calendar = Arc::new(FakeCalendar::default());
    let response = app(calendar.clone(), RunEnvironment::Development)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/google-calendar/create")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await,
        json!({
            "success": false,
            "error": "Not Found",
            "message": "Route GET /api/google-calendar/create not found"
        })
    );
    assert!(calendar.calls().is_empty());
}

#[tokio::test]
async fn test_calendar_failure_detail_is_environment_gated() {
    let body = json!({ "timeMin": "a", "timeMax": "b" });

    let response = app(Arc::new(FakeCalendar::failing()), RunEnvironment::Development)
        .oneshot(json_request("POST", "/api/google-calendar/search", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({
            "success": false,
            "error": "Failed to search calendar events",
            "message": "Calendar API failed: 403 {\"message\":\"Forbidden\"}"
        })
    );

    let response = app(Arc::new(FakeCalendar::failing()), RunEnvironment::Production)
        .oneshot(json_request("POST", "/api/google-calendar/search", body))
        .await
        .unwrap();
    assert_eq!(
        read_json(response).await["message"],
        "Google Calendar rejected the request"
    );
}
