//! Custom Askama template filters.

use std::fmt::Display;

/// Characters of a description shown on a product card.
const EXCERPT_CHARS: usize = 100;

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Shortens text to its first 100 characters followed by `...`.
///
/// Text that already fits is returned unchanged.
///
/// Usage in templates: `{{ product.description|excerpt }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn excerpt(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(shorten(&value.to_string()))
}

fn shorten(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_string(),
    }
}
