//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Static credential login and the token gate

pub mod auth;
