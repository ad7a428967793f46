//! HTTP middleware for storefront.
//!
//! # Layer Order (outermost first, as applied in `main`)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//!
//! Authentication is not a layer: protected handlers take [`RequireAuth`].

pub mod auth;

pub use auth::{RequireAuth, require_login};
