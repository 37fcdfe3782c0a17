//! Delete permission.
//!
//! Admins may delete any listing. A seller may delete their own listing only
//! while looking at their own "my listings" view; from the general browse
//! grids the delete action is not offered to them. Keep this asymmetry
//! unless product decides otherwise.

#[cfg(test)]
#[path = "permissions_test.rs"]
mod permissions_test;

use crate::model::{Actor, Listing};
use crate::store::{Notice, StoreError};

/// Which grid the viewer is looking at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewContext {
    /// Home page and product browse grids.
    #[default]
    Browse,
    /// The logged-in user's own listings (profile page).
    MyListings,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("You are not allowed to delete this listing.")]
    NotPermitted,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Notice for DeleteError {
    fn notice(&self) -> String {
        match self {
            Self::Store(e) => e.notice(),
            other => format!("❌ {other}"),
        }
    }
}

/// Whether `actor` may delete `listing` while viewing `view`.
#[must_use]
pub fn can_delete(listing: &Listing, actor: Option<&Actor>, view: ViewContext) -> bool {
    let Some(actor) = actor else {
        return false;
    };
    actor.is_admin() || (view == ViewContext::MyListings && listing.is_owned_by(&actor.username))
}
