// File: crates/services/bookwire_backend/src/lib.rs
pub mod app;
pub mod shutdown;

pub use app::build_app;
