//! View models for cards, the hero strip, the gallery and paged grids.
//!
//! DESIGN
//! ======
//! Everything here is a pure function of listings plus the viewer. The UI
//! rebuilds these models after every mutation and replaces grid contents
//! wholesale, so no view model outlives a single render.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use chrono::NaiveDate;

use crate::model::{Actor, Listing};
use crate::permissions::{ViewContext, can_delete};
use crate::pins::can_pin;

pub const PIN_MARK: &str = "📌";
pub const MISSING_CONTACT: &str = "N/A";

// =============================================================================
// PRICE
// =============================================================================

/// `"FREE"` for zero, otherwise `"Rs. "` plus Indian-grouped digits.
#[must_use]
pub fn format_price(price: u64) -> String {
    if price == 0 { "FREE".to_owned() } else { format!("Rs. {}", group_indian(price)) }
}

/// Group digits the Indian way: last three, then pairs (`12,34,567`).
#[must_use]
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

// =============================================================================
// CARDS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    View,
    Delete,
    Pin,
    Unpin,
}

impl CardAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Delete => "Delete",
            Self::Pin => "Pin",
            Self::Unpin => "Unpin",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    /// Pinned and active; drives the pin mark.
    pub pinned: bool,
    pub thumbnail: String,
    pub price: String,
    pub actions: Vec<CardAction>,
    pub compact: bool,
}

impl CardView {
    /// Title with the pin mark appended for featured listings.
    #[must_use]
    pub fn display_title(&self) -> String {
        if self.pinned { format!("{} {PIN_MARK}", self.title) } else { self.title.clone() }
    }

    #[must_use]
    pub fn has_action(&self, action: CardAction) -> bool {
        self.actions.contains(&action)
    }
}

fn thumbnail(listing: &Listing, placeholder: &str) -> String {
    listing.images.first().map_or_else(|| placeholder.to_owned(), Clone::clone)
}

/// Full grid card with the actions `actor` may take in `view`.
#[must_use]
pub fn card(listing: &Listing, actor: Option<&Actor>, view: ViewContext, today: NaiveDate, placeholder: &str) -> CardView {
    let pinned = listing.is_featured(today);
    let mut actions = vec![CardAction::View];
    if can_delete(listing, actor, view) {
        actions.push(CardAction::Delete);
    }
    if can_pin(actor) {
        actions.push(if pinned { CardAction::Unpin } else { CardAction::Pin });
    }
    CardView {
        id: listing.id.clone(),
        title: listing.title.clone(),
        pinned,
        thumbnail: thumbnail(listing, placeholder),
        price: format_price(listing.price),
        actions,
        compact: false,
    }
}

/// Hero strip card: same content, View action only.
#[must_use]
pub fn compact_card(listing: &Listing, today: NaiveDate, placeholder: &str) -> CardView {
    CardView {
        id: listing.id.clone(),
        title: listing.title.clone(),
        pinned: listing.is_featured(today),
        thumbnail: thumbnail(listing, placeholder),
        price: format_price(listing.price),
        actions: vec![CardAction::View],
        compact: true,
    }
}

// =============================================================================
// GALLERY
// =============================================================================

/// Details modal state: every image of one listing and a cyclic cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub contact: String,
    pub price: String,
    pub location: Option<String>,
    pub seller: String,
    images: Vec<String>,
    index: usize,
}

impl GalleryView {
    #[must_use]
    pub fn new(listing: &Listing, placeholder: &str) -> Self {
        let images = if listing.images.is_empty() { vec![placeholder.to_owned()] } else { listing.images.clone() };
        let contact = if listing.contact.trim().is_empty() { MISSING_CONTACT.to_owned() } else { listing.contact.clone() };
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            contact,
            price: format_price(listing.price),
            location: listing.location.clone(),
            seller: listing.seller_username.clone(),
            images,
            index: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        self.images.get(self.index).map_or("", String::as_str)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// One page of a grid. `page` is 1-based and always within
/// `1..=page_count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page { items: self.items.into_iter().map(f).collect(), page: self.page, page_count: self.page_count, total: self.total }
    }
}

/// Slice `items` into the requested page, clamping `page` into range.
/// A `page_size` of zero puts everything on one page.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    if page_size == 0 {
        return Page { items, page: 1, page_count: 1, total };
    }
    let page_count = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, page_count);
    let items = items.into_iter().skip((page - 1) * page_size).take(page_size).collect();
    Page { items, page, page_count, total }
}
