//! View-level models shared by routes and templates.

pub mod notice;

pub use notice::{ListingNotice, LoginNotice};
