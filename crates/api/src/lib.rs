//! HTTP API layer for bazaar.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: one module per resource, CRUD routes
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token resolution
//! - **Response**: the JSON envelope shared by all endpoints
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
