// --- File: crates/bookwire_common/src/handlers.rs ---
// Handlers shared by the whole application: health, unmatched routes and
// the last-resort panic boundary.

use axum::{
    extract::OriginalUri,
    http::Method,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::any::Any;

use crate::http::ApiError;
use crate::logging::log_error;

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe. Never touches downstream services.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Health"
))]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Fallback for every unmatched route, including a known path requested
/// with a method it does not serve.
///
/// Reports the full request path, also from inside nested routers.
pub async fn not_found_handler(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::not_found(method.as_str(), uri.path())
}

/// Builds the response used by the panic-catching layer.
///
/// The panic payload is logged and only echoed back when `expose_detail` is
/// set.
pub fn panic_response(
    expose_detail: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    move |payload: Box<dyn Any + Send + 'static>| {
        let detail = if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "unknown panic payload".to_string()
        };
        log_error(&detail, "Unhandled error");

        let message = if expose_detail {
            detail
        } else {
            "An unexpected error occurred".to_string()
        };
        ApiError::internal(message).into_response()
    }
}
