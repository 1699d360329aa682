//! Libris node: the bookstore HTTP API.
//!
//! Wires the account, catalog, and token services into an axum router
//! with CORS, tracing, and rate limiting.

pub mod api;
pub mod auth_api;
pub mod books_api;
pub mod config;
pub mod guard;
pub mod rate_limit;
