// --- File: crates/bookwire_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;     // Error taxonomy
pub mod handlers;  // Health, 404 and panic handlers
pub mod http;      // Error responses, JSON extraction, outbound client
pub mod logging;   // Logging utilities
pub mod routes;    // Route definitions
pub mod services;  // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    config_error, downstream_error, validation_error, BookwireError, FailureKind, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{classify_transport_error, create_client, DEFAULT_TIMEOUT_SECS},
    lenient_string, ApiError, ApiJson, ApiPayload, ApiQuery, ErrorBody,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};
