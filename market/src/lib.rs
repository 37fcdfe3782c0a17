//! Domain logic for the Nepali Bazar classified-ads site.
//!
//! All state lives in a `localStorage`-shaped key-value store: the listings
//! array, the user list and the logged-in username. This crate owns every
//! rule applied to that state (which listings are active, who may pin or
//! delete, featured ordering, search and form validation) and produces the
//! view models the front ends render. It compiles both natively and to
//! WebAssembly.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | [`store::KvStore`] port, JSON helpers, in-memory store |
//! | [`file_store`] | JSON-file-backed store used by the CLI |
//! | [`model`] | Persisted listing and user records |
//! | [`config`] | [`config::MarketConfig`] and storage keys |
//! | [`repository`] | CRUD over the listings collection |
//! | [`users`] | User list, login session, admin check |
//! | [`pins`] | Admin pinning, pin cap, featured ordering |
//! | [`permissions`] | Delete permission |
//! | [`query`] | Search text and category/price filters |
//! | [`view`] | Card, gallery and page view models |
//! | [`image`] | Inline `data:` URL encoding for uploads |
//! | [`intake`] | Sell form validation |
//! | [`marketplace`] | [`Marketplace`] facade tying it together |

pub mod config;
pub mod file_store;
pub mod image;
pub mod intake;
pub mod marketplace;
pub mod model;
pub mod permissions;
pub mod pins;
pub mod query;
pub mod repository;
pub mod store;
pub mod users;
pub mod view;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{MarketConfig, PinLimit, StorageKeys};
pub use marketplace::Marketplace;
pub use model::{Actor, Listing, Role, User};
pub use permissions::ViewContext;
pub use store::{KvStore, Notice, StoreError};
