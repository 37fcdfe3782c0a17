//! Header login/logout controls.

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::state::ui::{Page, UiState};
use crate::util::listing_actions;
use crate::util::storage::marketplace;

#[component]
pub fn AuthLinks() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let on_logout = move |_| {
        let mut next = session.get_untracked();
        ui.update(|u| listing_actions::logout(&marketplace(), &mut next, u));
        session.set(next);
    };
    let greeting = move || {
        session.with(|s| match (s.username(), s.is_admin()) {
            (Some(name), true) => format!("Hi, {name} (admin)"),
            (Some(name), false) => format!("Hi, {name}"),
            (None, _) => String::new(),
        })
    };

    view! {
        <div class="auth-links">
            <Show
                when=move || session.with(SessionState::is_logged_in)
                fallback=move || {
                    view! {
                        <button class="btn btn-ghost" on:click=move |_| ui.update(|u| u.navigate(Page::Login))>
                            "Login"
                        </button>
                    }
                }
            >
                <span class="auth-links__user">{greeting}</span>
                <button class="btn btn-ghost" on:click=on_logout>
                    "Logout"
                </button>
            </Show>
        </div>
    }
}
