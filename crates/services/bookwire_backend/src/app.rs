// File: crates/services/bookwire_backend/src/app.rs
use axum::Router;
use bookwire_common::handlers::{not_found_handler, panic_response};
use bookwire_common::BookwireError;
use bookwire_config::AppConfig;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Request tracing with span, request and response events at INFO, so the
/// default `tower_http=info` filter shows one line per request.
pub fn http_trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Assembles every route, the 404 fallbacks and the outer layers.
///
/// Layers, outermost first: request tracing, then the panic boundary.
pub fn build_app(config: Arc<AppConfig>) -> Result<Router, BookwireError> {
    let appointments = bookwire_n8n::routes(config.clone())?;

    #[allow(unused_mut)] // only mutated when optional features are enabled
    let mut app = bookwire_common::routes().nest("/appointments", appointments);

    #[cfg(feature = "gcal")]
    {
        let calendar = bookwire_gcal::routes(config.clone())?;
        app = app.nest("/api/google-calendar", calendar);
        tracing::info!("Google Calendar routes mounted at /api/google-calendar");
    }

    #[cfg(feature = "openapi")]
    {
        app = app.merge(swagger_ui());
        tracing::info!("Adding Swagger UI at /api/docs");
    }

    Ok(app
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(panic_response(
            config.environment.exposes_error_detail(),
        )))
        .layer(http_trace_layer()))
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Bookwire API",
            version = "0.1.0",
            description = "Appointment relay to n8n and Google Calendar",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        paths(bookwire_common::handlers::health_check),
        components(schemas(bookwire_common::handlers::HealthResponse)),
        tags((name = "Health", description = "Liveness probe"))
    )]
    struct ApiDoc;

    let mut openapi_doc = ApiDoc::openapi();
    openapi_doc.merge(bookwire_n8n::doc::N8nApiDoc::openapi());
    #[cfg(feature = "gcal")]
    openapi_doc.merge(bookwire_gcal::doc::GcalApiDoc::openapi());

    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
