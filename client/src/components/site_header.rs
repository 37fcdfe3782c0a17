//! Site header: brand, page navigation, search and auth controls.

use leptos::prelude::*;

use crate::components::auth_links::AuthLinks;
use crate::components::search_bar::SearchBar;
use crate::state::session::SessionState;
use crate::state::ui::{Page, UiState};

#[component]
pub fn SiteHeader() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let nav_button = move |page: Page| {
        view! {
            <button
                class=move || if ui.with(|u| u.page == page) { "nav-link nav-link--active" } else { "nav-link" }
                on:click=move |_| ui.update(|u| u.navigate(page))
            >
                {page.label()}
            </button>
        }
    };

    view! {
        <header class="site-header">
            <button class="brand" on:click=move |_| ui.update(|u| u.navigate(Page::Home))>
                "Nepali Bazar"
            </button>
            <nav class="site-nav">
                {nav_button(Page::Home)}
                {nav_button(Page::Products)}
                {nav_button(Page::Sell)}
                <Show when=move || session.with(SessionState::is_logged_in)>{nav_button(Page::Profile)}</Show>
            </nav>
            <SearchBar />
            <AuthLinks />
        </header>
    }
}
