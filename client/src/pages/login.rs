//! Username + password login against the stored user list.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::state::ui::UiState;
use crate::util::listing_actions;
use crate::util::storage::marketplace;

/// Inline message for an incomplete form, if any.
fn missing_field_message(username: &str, password: &str) -> Option<&'static str> {
    if username.trim().is_empty() || password.is_empty() {
        Some("Enter both username and password.")
    } else {
        None
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = username.get_untracked();
        let pass = password.get_untracked();
        if let Some(message) = missing_field_message(&name, &pass) {
            info.set(message.to_owned());
            return;
        }
        let mut next = session.get_untracked();
        let mut result = Ok(());
        ui.update(|u| result = listing_actions::login(&marketplace(), &mut next, u, &name, &pass));
        match result {
            Ok(()) => {
                session.set(next);
                info.set(String::new());
                password.set(String::new());
            }
            Err(message) => info.set(message),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Login"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "Login"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
