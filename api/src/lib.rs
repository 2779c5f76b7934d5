//! # AuthGate API
//!
//! HTTP layer: route handlers, bearer-token middleware, error mapping and the
//! application factory. Exposed as a library so integration tests can build
//! the same application against in-memory stores.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::AppState;
