//! Sort directive for the product listing.

/// How the listing orders products by price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirective {
    /// Keep feed order.
    #[default]
    None,
    /// Cheapest first.
    LowestFirst,
    /// Most expensive first.
    HighestFirst,
}

impl SortDirective {
    /// Query-string value for this directive (empty for [`SortDirective::None`]).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::LowestFirst => "lowest",
            Self::HighestFirst => "highest",
        }
    }

    /// Parse a query-string value. Unknown or missing values mean no sorting.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl std::fmt::Display for SortDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortDirective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "lowest" => Ok(Self::LowestFirst),
            "highest" => Ok(Self::HighestFirst),
            _ => Err(format!("invalid sort directive: {s}")),
        }
    }
}
