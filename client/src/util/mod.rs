//! Helpers shared across pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser glue (`storage`, `files`) is isolated here so page and component
//! code stays free of web-sys calls, and `listing_actions` keeps the UI
//! flows testable without a DOM.

pub mod files;
pub mod listing_actions;
pub mod storage;
