//! HTTP/REST API layer for Solace.
//!
//! Axum-based JSON API at `/api/v1/` with the envelope response format and
//! CORS support. Sessions live in memory only.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
