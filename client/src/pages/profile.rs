//! "My listings": the logged-in user's own active listings, the only view
//! where sellers may delete their ads.

use leptos::prelude::*;
use market::ViewContext;

use crate::components::listing_grid::ListingGrid;
use crate::state::session::SessionState;
use crate::state::ui::{Page, UiState};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <div class="page page--profile">
            <Show
                when=move || session.with(SessionState::is_logged_in)
                fallback=move || {
                    view! {
                        <p class="page-hint">
                            "Log in to see your listings. "
                            <button class="btn btn-primary" on:click=move |_| ui.update(|u| u.navigate(Page::Login))>
                                "Login"
                            </button>
                        </p>
                    }
                }
            >
                <h2 class="section-title">
                    {move || session.with(|s| format!("Listings by {}", s.username().unwrap_or_default()))}
                </h2>
                <ListingGrid view=ViewContext::MyListings empty_text="You have no active listings." />
            </Show>
        </div>
    }
}
