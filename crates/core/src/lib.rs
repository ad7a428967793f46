//! Shopfront Core - Shared types and cart/listing logic.
//!
//! This crate provides the pieces of the storefront that have no I/O:
//! - product and price types shared by the feed client and the stores
//! - cart consolidation (flat unit entries into quantity-bearing line items)
//! - the listing pipeline (title search plus price sort)
//! - feed pagination types
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no storage, no HTTP
//! clients. The `storefront` crate wires these into persistent stores and
//! route handlers.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, tokens and sort directives
//! - [`cart`] - Line items and the consolidator
//! - [`listing`] - Filter/sort view over fetched products
//! - [`feed`] - Page numbers and feed pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod feed;
pub mod listing;
pub mod types;

pub use cart::{LineItem, cart_total, consolidate, unit_count};
pub use feed::{FeedPage, PageNumber};
pub use listing::view;
pub use types::*;
