// --- File: crates/bookwire_n8n/src/lib.rs ---
// Declare modules within this crate
#[cfg(feature = "openapi")]
pub mod doc;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod validator;
#[cfg(test)]
mod validator_proptest;

pub use routes::routes;
pub use service::{N8nClient, RelayError, RelayOperation};
