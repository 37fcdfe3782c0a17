//! Browser front end for Nepali Bazar.
//!
//! ARCHITECTURE
//! ============
//! A client-side rendered Leptos app. All state lives in the browser's
//! `localStorage` through `util::storage::BrowserStore`; every read and
//! write goes through `market::Marketplace`, so this crate only owns view
//! state and DOM glue.
//!
//! | Module       | Role                                                  |
//! |--------------|-------------------------------------------------------|
//! | `app`        | Root component, context setup, page switch            |
//! | `components` | Cards, grids, header, modals                          |
//! | `pages`      | Home, products, profile, sell and login screens       |
//! | `state`      | `UiState` and `SessionState` signal payloads          |
//! | `util`       | Storage backend, file reading, testable UI flows      |

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
