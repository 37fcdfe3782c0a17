//! Page modules for the top-level screens.
//!
//! ARCHITECTURE
//! ============
//! `App` renders exactly one page at a time, chosen by `UiState::page`. Each
//! page owns its form state and delegates rendering details to `components`.

pub mod home;
pub mod login;
pub mod products;
pub mod profile;
pub mod sell;
