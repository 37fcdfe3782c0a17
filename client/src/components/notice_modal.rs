//! Non-blocking notice box for confirmations, warnings and refusals.
//!
//! Dismissed by OK, a backdrop click, or Escape/Enter anywhere on the page.

#[cfg(test)]
#[path = "notice_modal_test.rs"]
mod notice_modal_test;

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Keys that dismiss an open notice from anywhere on the page.
fn is_dismiss_key(key: &str) -> bool {
    matches!(key, "Escape" | "Enter")
}

#[component]
pub fn NoticeModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let on_dismiss = move |_| ui.update(UiState::dismiss_notice);
    let keys = window_event_listener(leptos::ev::keydown, move |ev| {
        if ui.with_untracked(|u| u.notice.is_none()) {
            return;
        }
        if is_dismiss_key(&ev.key()) {
            ev.prevent_default();
            ui.update(UiState::dismiss_notice);
        }
    });
    on_cleanup(move || keys.remove());

    view! {
        <Show when=move || ui.with(|u| u.notice.is_some())>
            <div class="nb-modal" on:click=on_dismiss>
                <div class="nb-modal-content" on:click=move |ev| ev.stop_propagation()>
                    {move || {
                        ui.with(|u| u.notice.clone().unwrap_or_default())
                            .lines()
                            .map(|line| view! { <p class="nb-modal-message">{line.to_owned()}</p> })
                            .collect_view()
                    }}
                    <div class="form-actions">
                        <button class="btn btn-primary" on:click=on_dismiss>
                            "OK"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
