//! Header search box.

use leptos::prelude::*;

use crate::state::ui::{Page, UiState};

/// Typing filters the visible grid; searching from a page without a grid
/// jumps to the products page.
#[component]
pub fn SearchBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        ui.update(|u| {
            if matches!(u.page, Page::Sell | Page::Login) {
                u.navigate(Page::Products);
            }
            u.set_search(text);
        });
    };

    view! {
        <input
            id="header-search"
            class="search-input"
            type="search"
            placeholder="Search listings..."
            prop:value=move || ui.with(|u| u.search.clone())
            on:input=on_input
        />
    }
}
