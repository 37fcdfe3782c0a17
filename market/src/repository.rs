//! Listing repository: CRUD over the products collection.
//!
//! DESIGN
//! ======
//! The collection is one JSON array under a single key. Every mutation
//! re-reads the whole array, changes it in memory and writes the whole array
//! back; there are no partial updates and the last writer wins. At the data
//! sizes a single browser tab can hold this is cheaper than maintaining an
//! index.
//!
//! Missing ids are silent no-ops: `update` and `remove` report `false` and
//! leave storage untouched.
//!
//! ERROR HANDLING
//! ==============
//! Records are decoded one at a time. Reads skip a record that still fails
//! to decode (logged) so the rest stay visible. Mutations refuse to write
//! while any stored record is undecodable, or the array itself is, and
//! return [`StoreError::Undecodable`]; writing back the decoded subset
//! would erase the skipped records.

#[cfg(test)]
#[path = "repository_test.rs"]
mod repository_test;

use chrono::NaiveDate;
use mockable::Clock;
use serde_json::Value;
use uuid::Uuid;

use crate::model::{Listing, ListingPatch};
use crate::store::{KvStore, StoreError, write_json};

/// Fresh opaque listing id.
#[must_use]
pub fn new_listing_id() -> String {
    format!("p-{}", Uuid::new_v4().simple())
}

/// Local calendar day according to `clock`.
pub fn today<C: Clock + ?Sized>(clock: &C) -> NaiveDate {
    clock.local().date_naive()
}

#[derive(Default)]
struct Decoded {
    listings: Vec<Listing>,
    skipped: usize,
}

pub struct ListingRepository<'a, S: ?Sized, C: ?Sized> {
    store: &'a S,
    clock: &'a C,
    key: &'a str,
}

impl<'a, S, C> ListingRepository<'a, S, C>
where
    S: KvStore + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(store: &'a S, clock: &'a C, key: &'a str) -> Self {
        Self { store, clock, key }
    }

    /// Every stored listing in insertion order.
    pub fn get_all(&self) -> Vec<Listing> {
        match self.decode() {
            Ok(decoded) => decoded.listings,
            Err(e) => {
                tracing::error!(key = self.key, error = %e, "get_all: falling back to an empty collection");
                Vec::new()
            }
        }
    }

    /// Listings whose expiry date has not passed.
    pub fn get_active(&self) -> Vec<Listing> {
        let today = today(self.clock);
        self.get_all().into_iter().filter(|l| l.is_active(today)).collect()
    }

    pub fn get(&self, id: &str) -> Option<Listing> {
        self.get_all().into_iter().find(|l| l.id == id)
    }

    /// Append `listing`, assigning `id` and `createdAt` when absent, and
    /// return the stored record.
    ///
    /// A supplied id that already exists is replaced with a fresh one so ids
    /// stay unique.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be decoded or the
    /// result cannot be written.
    pub fn add(&self, mut listing: Listing) -> Result<Listing, StoreError> {
        let mut list = self.load_for_write()?;
        if listing.id.is_empty() || list.iter().any(|l| l.id == listing.id) {
            if !listing.id.is_empty() {
                tracing::warn!(id = %listing.id, "duplicate listing id on add; assigning a new one");
            }
            listing.id = new_listing_id();
        }
        if listing.created_at.is_none() {
            listing.created_at = Some(self.clock.utc());
        }
        list.push(listing.clone());
        self.save_all(&list)?;
        tracing::debug!(id = %listing.id, "listing added");
        Ok(listing)
    }

    /// Merge `patch` into the listing with `id`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be decoded or the
    /// result cannot be written.
    pub fn update(&self, id: &str, patch: &ListingPatch) -> Result<bool, StoreError> {
        let mut list = self.load_for_write()?;
        let Some(listing) = list.iter_mut().find(|l| l.id == id) else {
            tracing::debug!(id, "update: listing not found");
            return Ok(false);
        };
        patch.apply(listing);
        self.save_all(&list)?;
        Ok(true)
    }

    /// Delete the listing with `id`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be decoded or the
    /// result cannot be written.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut list = self.load_for_write()?;
        let before = list.len();
        list.retain(|l| l.id != id);
        if list.len() == before {
            tracing::debug!(id, "remove: listing not found");
            return Ok(false);
        }
        self.save_all(&list)?;
        Ok(true)
    }

    /// Apply several patches and write once.
    ///
    /// Patches for ids that are not present are skipped. Returns how many
    /// listings were changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be decoded or the
    /// result cannot be written.
    pub fn update_many(&self, patches: &[(&str, ListingPatch)]) -> Result<usize, StoreError> {
        let mut list = self.load_for_write()?;
        let mut changed = 0;
        for (id, patch) in patches {
            if let Some(listing) = list.iter_mut().find(|l| l.id == *id) {
                patch.apply(listing);
                changed += 1;
            }
        }
        if changed > 0 {
            self.save_all(&list)?;
        }
        Ok(changed)
    }

    fn decode(&self) -> Result<Decoded, StoreError> {
        let raw = match self.store.get_item(self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Decoded::default()),
        };
        let records: Vec<Value> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Undecodable { key: self.key.to_owned(), detail: e.to_string() })?;
        let mut decoded = Decoded { listings: Vec::with_capacity(records.len()), skipped: 0 };
        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Listing>(record) {
                Ok(listing) => decoded.listings.push(listing),
                Err(e) => {
                    tracing::warn!(key = self.key, index, error = %e, "skipping undecodable listing");
                    decoded.skipped += 1;
                }
            }
        }
        Ok(decoded)
    }

    fn load_for_write(&self) -> Result<Vec<Listing>, StoreError> {
        let decoded = self.decode()?;
        if decoded.skipped > 0 {
            return Err(StoreError::Undecodable {
                key: self.key.to_owned(),
                detail: format!("{} stored listing(s) are malformed", decoded.skipped),
            });
        }
        Ok(decoded.listings)
    }

    fn save_all(&self, list: &[Listing]) -> Result<(), StoreError> {
        write_json(self.store, self.key, list)
    }
}
