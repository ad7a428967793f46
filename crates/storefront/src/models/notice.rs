//! One-shot notices carried in the query string after a redirect.
//!
//! Both notice kinds are read leniently: an unknown `?notice=` value shows no
//! notice rather than rejecting the request.

use std::str::FromStr;

/// Why a visitor was sent to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginNotice {
    /// A protected page was requested.
    Required,
    /// Tried to add to the cart.
    Cart,
    /// Tried to add to the wishlist.
    Wishlist,
}

impl LoginNotice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Required => "Please login to continue.",
            Self::Cart => "Please login to add items to your cart.",
            Self::Wishlist => "Please login to add items to your wishlist.",
        }
    }

    /// Login page URL carrying this notice.
    #[must_use]
    pub fn login_url(self) -> String {
        format!("/login?notice={}", self.as_str())
    }

    /// Parse a raw query value; unknown values mean no notice.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }
}

impl FromStr for LoginNotice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Self::Required),
            "cart" => Ok(Self::Cart),
            "wishlist" => Ok(Self::Wishlist),
            _ => Err(format!("Unknown login notice: {s}")),
        }
    }
}

/// Outcome shown on the listing after a cart or wishlist action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingNotice {
    AddedToCart,
    AddedToWishlist,
    AlreadyInWishlist,
}

impl ListingNotice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddedToCart => "added_to_cart",
            Self::AddedToWishlist => "added_to_wishlist",
            Self::AlreadyInWishlist => "already_in_wishlist",
        }
    }

    /// Message naming the product the action applied to.
    #[must_use]
    pub fn message(self, title: &str) -> String {
        match self {
            Self::AddedToCart => format!("{title} has been added to your cart!"),
            Self::AddedToWishlist => format!("{title} added to wishlist!"),
            Self::AlreadyInWishlist => format!("{title} is already in your wishlist."),
        }
    }

    /// Parse a raw query value; unknown values mean no notice.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }
}

impl FromStr for ListingNotice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "added_to_cart" => Ok(Self::AddedToCart),
            "added_to_wishlist" => Ok(Self::AddedToWishlist),
            "already_in_wishlist" => Ok(Self::AlreadyInWishlist),
            _ => Err(format!("Unknown listing notice: {s}")),
        }
    }
}
