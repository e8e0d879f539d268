//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (add unique ID to each request)
//!
//! Authentication is not a layer: handlers that need it take a [`BasicAuth`]
//! argument, so registration can stay open.

pub mod auth;
pub mod request_id;

pub use auth::{BasicAuth, parse_basic_credentials};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
