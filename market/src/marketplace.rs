//! Application facade over one store, one clock and one configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every front end (the browser client, the `bazar` CLI, tests) goes through
//! a [`Marketplace`] instead of touching storage keys directly. Each call
//! re-reads what it needs from the store, so two facades over the same
//! storage always agree and no cached state can go stale after a mutation.
//!
//! ERROR HANDLING
//! ==============
//! Permission and validation failures are returned before anything is
//! written. Operations on ids that do not exist report "nothing happened"
//! (`false` / [`PinOutcome::Missing`]) rather than an error.

#[cfg(test)]
#[path = "marketplace_test.rs"]
mod marketplace_test;

use chrono::NaiveDate;
use mockable::Clock;

use crate::config::MarketConfig;
use crate::image::ImageUpload;
use crate::intake::{IntakeError, SellForm, Submission, validate};
use crate::model::{Actor, Listing};
use crate::permissions::{DeleteError, ViewContext, can_delete};
use crate::pins::{PinError, PinOutcome, PinPolicy, sort_featured};
use crate::query::ListingQuery;
use crate::repository::{ListingRepository, today};
use crate::store::{KvStore, StoreError};
use crate::users::{AuthError, UserStore};
use crate::view::{CardView, GalleryView, Page, card, compact_card, paginate};

pub struct Marketplace<S, C> {
    store: S,
    clock: C,
    config: MarketConfig,
}

impl<S: KvStore, C: Clock> Marketplace<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_config(store, clock, MarketConfig::default())
    }

    pub fn with_config(store: S, clock: C, config: MarketConfig) -> Self {
        Self { store, clock, config }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        today(&self.clock)
    }

    // =========================================================================
    // COMPONENTS
    // =========================================================================

    pub fn listings(&self) -> ListingRepository<'_, S, C> {
        ListingRepository::new(&self.store, &self.clock, &self.config.keys.products)
    }

    pub fn users(&self) -> UserStore<'_, S> {
        UserStore::new(&self.store, &self.config.keys)
    }

    pub fn pins(&self) -> PinPolicy<'_, S, C> {
        PinPolicy::new(self.listings(), &self.clock, self.config.pin_limit)
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Seed the default accounts on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the accounts cannot be written.
    pub fn ensure_default_users(&self) -> Result<bool, StoreError> {
        self.users().ensure_defaults()
    }

    /// # Errors
    ///
    /// See [`UserStore::login`].
    pub fn login(&self, username: &str, password: &str) -> Result<Actor, AuthError> {
        self.users().login(username, password)
    }

    /// # Errors
    ///
    /// Returns an error if the session cannot be cleared.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.users().logout()
    }

    pub fn current_actor(&self) -> Option<Actor> {
        self.users().current_actor()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Delete `id` on behalf of `actor` viewing `view`. Returns whether a
    /// listing was removed.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError::NotPermitted`] when `actor` may not delete the
    /// listing, or a storage error.
    pub fn delete(&self, id: &str, actor: Option<&Actor>, view: ViewContext) -> Result<bool, DeleteError> {
        let repo = self.listings();
        let Some(listing) = repo.get(id) else {
            tracing::debug!(id, "delete: listing not found");
            return Ok(false);
        };
        if !can_delete(&listing, actor, view) {
            return Err(DeleteError::NotPermitted);
        }
        let removed = repo.remove(id)?;
        tracing::info!(id, by = actor.map_or("", |a| a.username.as_str()), "listing deleted");
        Ok(removed)
    }

    /// # Errors
    ///
    /// See [`PinPolicy::pin`].
    pub fn pin(&self, id: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        self.pins().pin(id, actor)
    }

    /// # Errors
    ///
    /// See [`PinPolicy::unpin`].
    pub fn unpin(&self, id: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        self.pins().unpin(id, actor)
    }

    /// # Errors
    ///
    /// See [`PinPolicy::toggle`].
    pub fn toggle_pin(&self, id: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        self.pins().toggle(id, actor)
    }

    /// # Errors
    ///
    /// See [`PinPolicy::pin_replacing`].
    pub fn pin_replacing(&self, target: &str, replaced: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        self.pins().pin_replacing(target, replaced, actor)
    }

    /// Validate a sell form and store the listing it describes.
    ///
    /// The seller is `actor`, or the guest account when nobody is logged in.
    /// The returned submission holds the stored listing (with its id and
    /// creation time) and any image warnings.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure without writing anything, or a
    /// storage error.
    pub fn submit(&self, form: &SellForm, uploads: &[ImageUpload], actor: Option<&Actor>) -> Result<Submission, IntakeError> {
        let seller = actor.map_or(self.config.guest_username.as_str(), |a| a.username.as_str());
        let Submission { listing, warnings } = validate(form, uploads, seller, self.today(), &self.config)?;
        let listing = self.listings().add(listing)?;
        tracing::info!(id = %listing.id, seller, images = listing.images.len(), "listing posted");
        Ok(Submission { listing, warnings })
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Active listings visible in `view`: everything when browsing, only
    /// the actor's own listings on their profile.
    pub fn candidates(&self, view: ViewContext, actor: Option<&Actor>) -> Vec<Listing> {
        let active = self.listings().get_active();
        match view {
            ViewContext::Browse => active,
            ViewContext::MyListings => {
                let Some(actor) = actor else {
                    return Vec::new();
                };
                active.into_iter().filter(|l| l.is_owned_by(&actor.username)).collect()
            }
        }
    }

    /// Candidates matching `query`, in featured order.
    pub fn search(&self, view: ViewContext, query: &ListingQuery, actor: Option<&Actor>) -> Vec<Listing> {
        let mut listings = query.apply(self.candidates(view, actor));
        sort_featured(&mut listings, self.today());
        listings
    }

    /// One page of grid cards for `actor` in `view`.
    pub fn grid(&self, view: ViewContext, query: &ListingQuery, actor: Option<&Actor>, page: usize) -> Page<CardView> {
        let today = self.today();
        let placeholder = self.config.placeholder_image.as_str();
        paginate(self.search(view, query, actor), page, self.config.page_size)
            .map(|listing| card(&listing, actor, view, today, placeholder))
    }

    /// Compact cards for the hero strip.
    pub fn hero_cards(&self) -> Vec<CardView> {
        let today = self.today();
        self.pins()
            .hero()
            .iter()
            .map(|listing| compact_card(listing, today, &self.config.placeholder_image))
            .collect()
    }

    /// Gallery for `id`, or `None` if it no longer exists.
    pub fn gallery(&self, id: &str) -> Option<GalleryView> {
        self.listings().get(id).map(|listing| GalleryView::new(&listing, &self.config.placeholder_image))
    }
}
