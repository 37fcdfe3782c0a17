//! Search text and category/price filters over listings.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use crate::model::Listing;

/// Active search/filter predicate for a grid. The default matches
/// everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Case-insensitive substring searched in title, description, category,
    /// seller and location.
    pub text: String,
    /// Case-insensitive exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<u64>,
    /// Inclusive upper price bound.
    pub max_price: Option<u64>,
}

impl ListingQuery {
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self { text: text.to_owned(), ..Self::default() }
    }

    /// Set both price bounds from a `"min-max"` range string.
    #[must_use]
    pub fn with_price_range(mut self, raw: &str) -> Self {
        let (min, max) = parse_price_range(raw);
        self.min_price = min;
        self.max_price = max;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.category.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }

    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_text(listing) && self.matches_category(listing) && self.matches_price(listing)
    }

    /// Keep only matching listings, preserving order.
    #[must_use]
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        if self.is_empty() {
            return listings;
        }
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            listing.title.as_str(),
            listing.description.as_str(),
            listing.category.as_str(),
            listing.seller_username.as_str(),
            listing.location.as_deref().unwrap_or_default(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, listing: &Listing) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(category) => listing.category.trim().eq_ignore_ascii_case(category),
        }
    }

    fn matches_price(&self, listing: &Listing) -> bool {
        self.min_price.is_none_or(|min| listing.price >= min) && self.max_price.is_none_or(|max| listing.price <= max)
    }
}

/// Parse `"min-max"`, `"min-"` or `"-max"` into inclusive bounds.
///
/// Blank or non-numeric sides are unbounded; a zero side is unbounded as
/// well, matching the price filter menu where `0` means "no limit".
#[must_use]
pub fn parse_price_range(raw: &str) -> (Option<u64>, Option<u64>) {
    let (min, max) = raw.split_once('-').unwrap_or((raw, ""));
    (parse_bound(min), parse_bound(max))
}

fn parse_bound(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|v| *v > 0)
}
