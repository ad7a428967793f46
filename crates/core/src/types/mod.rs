//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod sort;
pub mod token;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use sort::SortDirective;
pub use token::AuthToken;
