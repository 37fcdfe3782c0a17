//! Transient UI state: current page, search/filter inputs, open modals.
//!
//! DESIGN
//! ======
//! Nothing here is persisted. Listings, users and the session live in
//! storage behind the `Marketplace`; this struct only remembers what the
//! user is looking at. `revision` is bumped after every successful mutation
//! so grids that read it recompute from storage.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use market::query::ListingQuery;
use market::view::GalleryView;
use market::ViewContext;

/// In-app screens. Switching screens does not touch the URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    Products,
    Profile,
    Sell,
    Login,
}

impl Page {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Products => "Products",
            Self::Profile => "My Listings",
            Self::Sell => "Sell",
            Self::Login => "Login",
        }
    }
}

/// Category and price-range selections on the products page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    /// Empty means all categories.
    pub category: String,
    /// `"min-max"` as offered by the price menu; empty means any price.
    pub price_range: String,
}

/// A destructive action waiting for the user's yes/no.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingConfirm {
    DeleteListing { id: String, view: ViewContext },
}

impl PendingConfirm {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::DeleteListing { .. } => "Delete this ad?",
        }
    }
}

/// Current pin shown as a replacement choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinnedOption {
    pub id: String,
    pub title: String,
}

/// Pin attempt rejected by the cap, waiting for the admin to pick a pin to
/// replace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinReplace {
    pub target: String,
    pub limit: usize,
    pub pinned: Vec<PinnedOption>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    pub page: Page,
    pub search: String,
    pub filters: Filters,
    /// 1-based grid page; clamped by the grid when out of range.
    pub grid_page: usize,
    pub gallery: Option<GalleryView>,
    pub confirm: Option<PendingConfirm>,
    pub pin_replace: Option<PinReplace>,
    pub notice: Option<String>,
    pub revision: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            page: Page::Home,
            search: String::new(),
            filters: Filters::default(),
            grid_page: 1,
            gallery: None,
            confirm: None,
            pin_replace: None,
            notice: None,
            revision: 0,
        }
    }
}

impl UiState {
    /// Search and filter inputs as a listing query.
    #[must_use]
    pub fn query(&self) -> ListingQuery {
        let category = Some(self.filters.category.trim()).filter(|c| !c.is_empty()).map(str::to_owned);
        ListingQuery { category, ..ListingQuery::text(&self.search) }.with_price_range(&self.filters.price_range)
    }

    /// Switch screens, closing any open modal and returning to page one.
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        self.grid_page = 1;
        self.gallery = None;
        self.confirm = None;
        self.pin_replace = None;
    }

    pub fn set_search(&mut self, text: String) {
        if self.search != text {
            self.search = text;
            self.grid_page = 1;
        }
    }

    pub fn set_category(&mut self, category: String) {
        if self.filters.category != category {
            self.filters.category = category;
            self.grid_page = 1;
        }
    }

    pub fn set_price_range(&mut self, range: String) {
        if self.filters.price_range != range {
            self.filters.price_range = range;
            self.grid_page = 1;
        }
    }

    /// Jump to grid page `page` (1-based; zero means the first page).
    pub fn goto_page(&mut self, page: usize) {
        self.grid_page = page.max(1);
    }

    pub fn open_gallery(&mut self, gallery: GalleryView) {
        self.gallery = Some(gallery);
    }

    pub fn close_gallery(&mut self) {
        self.gallery = None;
    }

    pub fn gallery_next(&mut self) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.next();
        }
    }

    pub fn gallery_prev(&mut self) {
        if let Some(gallery) = self.gallery.as_mut() {
            gallery.prev();
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Record that storage changed so grids recompute.
    pub fn mutated(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
