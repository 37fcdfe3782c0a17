//! Chooser shown when an admin pins past the cap: pick a current pin to
//! replace, or cancel.

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::state::ui::UiState;
use crate::util::listing_actions;
use crate::util::storage::marketplace;

#[component]
pub fn PinReplaceModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let on_cancel = move |_| ui.update(listing_actions::cancel_pin_replace);
    let heading = move || {
        ui.with(|u| {
            u.pin_replace
                .as_ref()
                .map(|p| format!("You can only pin up to {} listings. Unpin one to make room:", p.limit))
                .unwrap_or_default()
        })
    };

    view! {
        <Show when=move || ui.with(|u| u.pin_replace.is_some())>
            <div class="nb-modal">
                <div class="nb-modal-content pin-replace">
                    <p>{heading}</p>
                    <ul class="pin-replace__list">
                        {move || {
                            ui.with(|u| u.pin_replace.as_ref().map(|p| p.pinned.clone()).unwrap_or_default())
                                .into_iter()
                                .map(|option| {
                                    let id = option.id.clone();
                                    let on_replace = move |_| {
                                        let session = session.get_untracked();
                                        ui.update(|u| listing_actions::replace_pin(&marketplace(), &session, u, &id));
                                    };
                                    view! {
                                        <li>
                                            <span class="pin-replace__title">{option.title}</span>
                                            <button class="btn unpin" on:click=on_replace>
                                                "Replace"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <div class="form-actions">
                        <button class="btn btn-ghost" on:click=on_cancel>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
