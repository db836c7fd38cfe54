// --- File: crates/bookwire_common/src/routes.rs ---

use axum::{routing::get, Router};

use crate::handlers::{health_check, not_found_handler};

/// Creates a router containing the routes every deployment exposes.
pub fn routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .method_not_allowed_fallback(not_found_handler)
}
