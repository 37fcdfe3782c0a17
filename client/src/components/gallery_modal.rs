//! Listing details modal with a cyclic image gallery.
//!
//! Closes on the close button, a backdrop click or Escape; ArrowLeft and
//! ArrowRight step through the images while it is open.

use leptos::prelude::*;
use market::view::GalleryView;

use crate::state::ui::UiState;

#[component]
pub fn GalleryModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let keys = window_event_listener(leptos::ev::keydown, move |ev| {
        if ui.with_untracked(|u| u.gallery.is_none()) {
            return;
        }
        match ev.key().as_str() {
            "Escape" => {
                ev.prevent_default();
                ui.update(UiState::close_gallery);
            }
            "ArrowLeft" => ui.update(UiState::gallery_prev),
            "ArrowRight" => ui.update(UiState::gallery_next),
            _ => {}
        }
    });
    on_cleanup(move || keys.remove());

    let field = move |read: fn(&GalleryView) -> String| ui.with(|u| u.gallery.as_ref().map(read).unwrap_or_default());
    let on_close = move |_| ui.update(UiState::close_gallery);

    view! {
        <Show when=move || ui.with(|u| u.gallery.is_some())>
            <div class="nb-modal-overlay" on:click=on_close>
                <div class="gallery-box" on:click=move |ev| ev.stop_propagation()>
                    <button class="close" on:click=on_close title="Close">
                        "×"
                    </button>
                    <div class="gallery-content">
                        <button class="arrow left" on:click=move |_| ui.update(UiState::gallery_prev)>
                            "◀"
                        </button>
                        <img class="gallery-img" src=move || field(|g| g.current().to_owned()) />
                        <button class="arrow right" on:click=move |_| ui.update(UiState::gallery_next)>
                            "▶"
                        </button>
                    </div>
                    <p class="gallery-counter">{move || field(|g| format!("{} / {}", g.index() + 1, g.len()))}</p>
                    <div class="gallery-info">
                        <h2>{move || field(|g| g.title.clone())}</h2>
                        <p>{move || field(|g| g.description.clone())}</p>
                        <p>
                            <b>"Contact: "</b>
                            {move || field(|g| g.contact.clone())}
                        </p>
                        <p>
                            <b>"Price: "</b>
                            {move || field(|g| g.price.clone())}
                        </p>
                        <Show when=move || ui.with(|u| u.gallery.as_ref().is_some_and(|g| g.location.is_some()))>
                            <p>
                                <b>"Location: "</b>
                                {move || field(|g| g.location.clone().unwrap_or_default())}
                            </p>
                        </Show>
                        <p class="gallery-seller">{move || field(|g| format!("Posted by {}", g.seller))}</p>
                    </div>
                </div>
            </div>
        </Show>
    }
}
