// --- File: crates/bookwire_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod service;

pub use error::GcalError;
pub use routes::{routes, routes_with_calendar};
pub use service::GoogleCalendarService;
