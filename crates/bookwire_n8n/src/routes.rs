// --- File: crates/bookwire_n8n/src/routes.rs ---

use axum::{routing::post, Router};
use bookwire_common::handlers::not_found_handler;
use bookwire_config::AppConfig;
use std::sync::Arc;

use crate::handlers::{book_appointment_handler, cancel_appointment_handler, N8nState};
use crate::service::{N8nClient, RelayError};

/// Creates the appointment router. Mounted under `/appointments` by the backend.
///
/// Missing webhook URLs are not an error here: they surface per request.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, RelayError> {
    let relay = N8nClient::new(&config.n8n)?;
    let state = Arc::new(N8nState {
        config,
        relay: Arc::new(relay),
    });

    Ok(Router::new()
        .route("/book", post(book_appointment_handler))
        .route("/cancel", post(cancel_appointment_handler))
        .method_not_allowed_fallback(not_found_handler)
        .with_state(state))
}
