//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render grids, the hero strip and modals while reading/writing
//! `UiState` and `SessionState` from Leptos context. Mutations go through
//! `util::listing_actions`.

pub mod auth_links;
pub mod confirm_modal;
pub mod filters_bar;
pub mod gallery_modal;
pub mod hero_pinned;
pub mod listing_card;
pub mod listing_grid;
pub mod notice_modal;
pub mod pin_replace_modal;
pub mod search_bar;
pub mod site_header;
