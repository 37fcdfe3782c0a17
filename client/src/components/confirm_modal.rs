//! Yes/No confirmation for destructive actions.

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::state::ui::UiState;
use crate::util::listing_actions;
use crate::util::storage::marketplace;

#[component]
pub fn ConfirmModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let on_yes = move |_| {
        let session = session.get_untracked();
        ui.update(|u| listing_actions::confirm(&marketplace(), &session, u));
    };
    let on_no = move |_| ui.update(listing_actions::cancel_confirm);
    let message = move || ui.with(|u| u.confirm.as_ref().map(|c| c.message()).unwrap_or_default());

    view! {
        <Show when=move || ui.with(|u| u.confirm.is_some())>
            <div id="confirm-box" class="nb-modal">
                <div class="nb-modal-content">
                    <p id="confirm-msg">{message}</p>
                    <div class="form-actions">
                        <button id="c-yes" class="btn btn-primary" on:click=on_yes>
                            "Yes"
                        </button>
                        <button id="c-no" class="btn btn-ghost" on:click=on_no>
                            "No"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
