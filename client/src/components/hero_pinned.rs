//! Featured strip of pinned listings on the home page.

use leptos::prelude::*;
use market::ViewContext;

use crate::components::listing_card::ListingCard;
use crate::state::ui::UiState;
use crate::util::storage::marketplace;

/// Compact cards for active pins, newest pin first, capped at the pin
/// limit. Hidden when nothing is pinned.
#[component]
pub fn HeroPinned() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let cards = Memo::new(move |_| {
        let _revision = ui.with(|u| u.revision);
        marketplace().hero_cards()
    });

    view! {
        <Show when=move || cards.with(|c| !c.is_empty())>
            <section class="hero-pinned">
                <h2 class="hero-pinned__title">"📌 Featured"</h2>
                <div id="pinned-ads" class="grid grid--compact">
                    {move || {
                        cards
                            .get()
                            .into_iter()
                            .map(|card| view! { <ListingCard card=card view=ViewContext::Browse /> })
                            .collect_view()
                    }}
                </div>
            </section>
        </Show>
    }
}
