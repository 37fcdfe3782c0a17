//! Pin/feature policy: who may pin, how many pins fit, and display order.
//!
//! DESIGN
//! ======
//! Pin state lives on the listing itself (`pinned` + `pinnedAt`). Only
//! active listings count as pinned, so an expired pinned listing silently
//! frees its slot without anyone unpinning it.
//!
//! When the cap is reached, [`PinError::LimitReached`] carries the current
//! pins so the caller can offer a replacement; [`PinPolicy::pin_replacing`]
//! then swaps one pin for another in a single write.

#[cfg(test)]
#[path = "pins_test.rs"]
mod pins_test;

use std::cmp::Ordering;

use chrono::NaiveDate;
use mockable::Clock;

use crate::config::PinLimit;
use crate::model::{Actor, Listing, ListingPatch};
use crate::repository::{ListingRepository, today};
use crate::store::{KvStore, Notice, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("Only admins can pin listings.")]
    NotAdmin,
    #[error("You can only pin up to {limit} listings.")]
    LimitReached { limit: usize, pinned: Vec<Listing> },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Notice for PinError {
    fn notice(&self) -> String {
        match self {
            Self::Store(e) => e.notice(),
            other => format!("❌ {other}"),
        }
    }
}

/// Result of a permitted pin operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PinOutcome {
    Pinned,
    Unpinned,
    /// The target id does not exist; nothing changed.
    Missing,
}

/// Only admins may pin or unpin.
#[must_use]
pub fn can_pin(actor: Option<&Actor>) -> bool {
    actor.is_some_and(Actor::is_admin)
}

/// Featured order: pinned before unpinned, newer pins first, then newer
/// listings first.
///
/// "Pinned" means pinned and active on `today`.
#[must_use]
pub fn compare_featured(a: &Listing, b: &Listing, today: NaiveDate) -> Ordering {
    let a_pinned = a.is_featured(today);
    let b_pinned = b.is_featured(today);
    b_pinned
        .cmp(&a_pinned)
        .then_with(|| if a_pinned && b_pinned { b.pinned_at.cmp(&a.pinned_at) } else { Ordering::Equal })
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Stable sort into featured order; equal keys keep their stored order.
pub fn sort_featured(listings: &mut [Listing], today: NaiveDate) {
    listings.sort_by(|a, b| compare_featured(a, b, today));
}

pub struct PinPolicy<'a, S: ?Sized, C: ?Sized> {
    repo: ListingRepository<'a, S, C>,
    clock: &'a C,
    limit: PinLimit,
}

impl<'a, S, C> PinPolicy<'a, S, C>
where
    S: KvStore + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(repo: ListingRepository<'a, S, C>, clock: &'a C, limit: PinLimit) -> Self {
        Self { repo, clock, limit }
    }

    /// Active pinned listings in featured order.
    pub fn pinned(&self) -> Vec<Listing> {
        let today = today(self.clock);
        let mut pinned: Vec<Listing> = self.repo.get_all().into_iter().filter(|l| l.is_featured(today)).collect();
        sort_featured(&mut pinned, today);
        pinned
    }

    /// Listings for the hero strip: current pins, truncated to the cap.
    pub fn hero(&self) -> Vec<Listing> {
        let mut pinned = self.pinned();
        if let Some(cap) = self.limit.cap() {
            pinned.truncate(cap);
        }
        pinned
    }

    /// Pin `id` as `actor`.
    ///
    /// Re-pinning an already pinned listing refreshes its timestamp without
    /// counting against the cap.
    ///
    /// # Errors
    ///
    /// Returns [`PinError::NotAdmin`] for non-admins,
    /// [`PinError::LimitReached`] when the cap is full, or a storage error.
    pub fn pin(&self, id: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        if !can_pin(actor) {
            return Err(PinError::NotAdmin);
        }
        let Some(target) = self.repo.get(id) else {
            tracing::debug!(id, "pin: listing not found");
            return Ok(PinOutcome::Missing);
        };
        let pinned = self.pinned();
        let already = pinned.iter().any(|l| l.id == target.id);
        if !already && self.limit.is_full(pinned.len()) {
            let limit = self.limit.cap().unwrap_or(pinned.len());
            return Err(PinError::LimitReached { limit, pinned });
        }
        self.repo.update(id, &ListingPatch::pin(self.clock.utc()))?;
        tracing::info!(id, "listing pinned");
        Ok(PinOutcome::Pinned)
    }

    /// Unpin `id` as `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`PinError::NotAdmin`] for non-admins, or a storage error.
    pub fn unpin(&self, id: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        if !can_pin(actor) {
            return Err(PinError::NotAdmin);
        }
        if !self.repo.update(id, &ListingPatch::unpin())? {
            return Ok(PinOutcome::Missing);
        }
        tracing::info!(id, "listing unpinned");
        Ok(PinOutcome::Unpinned)
    }

    /// Unpin `id` if it is pinned, otherwise pin it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::pin`] and [`Self::unpin`].
    pub fn toggle(&self, id: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        if !can_pin(actor) {
            return Err(PinError::NotAdmin);
        }
        let today = today(self.clock);
        match self.repo.get(id) {
            Some(listing) if listing.is_featured(today) => self.unpin(id, actor),
            Some(_) => self.pin(id, actor),
            None => Ok(PinOutcome::Missing),
        }
    }

    /// Unpin `replaced` and pin `target` in one write.
    ///
    /// If `target` does not exist nothing changes. If `replaced` is not among
    /// the current pins the call behaves like [`Self::pin`].
    ///
    /// # Errors
    ///
    /// Returns [`PinError::NotAdmin`] for non-admins,
    /// [`PinError::LimitReached`] if the swap would still exceed the cap, or
    /// a storage error.
    pub fn pin_replacing(&self, target: &str, replaced: &str, actor: Option<&Actor>) -> Result<PinOutcome, PinError> {
        if !can_pin(actor) {
            return Err(PinError::NotAdmin);
        }
        if self.repo.get(target).is_none() {
            tracing::debug!(target, "pin_replacing: target not found");
            return Ok(PinOutcome::Missing);
        }
        let pinned = self.pinned();
        if !pinned.iter().any(|l| l.id == replaced) || target == replaced {
            return self.pin(target, actor);
        }
        let remaining = pinned.iter().filter(|l| l.id != replaced && l.id != target).count();
        if self.limit.is_full(remaining) {
            let limit = self.limit.cap().unwrap_or(pinned.len());
            return Err(PinError::LimitReached { limit, pinned });
        }
        self.repo
            .update_many(&[(replaced, ListingPatch::unpin()), (target, ListingPatch::pin(self.clock.utc()))])?;
        tracing::info!(target, replaced, "listing pin replaced");
        Ok(PinOutcome::Pinned)
    }
}
