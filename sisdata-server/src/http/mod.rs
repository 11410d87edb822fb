//! HTTP server layer
//!
//! Axum server with:
//! - Record endpoints under a configurable base path
//! - Permissive cross-origin headers on every response
//! - Request tracing
//! - Graceful shutdown

pub mod cors;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
