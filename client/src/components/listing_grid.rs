//! Paged grid of listing cards for one view context.
//!
//! SYSTEM CONTEXT
//! ==============
//! The grid recomputes from storage whenever the UI revision, the search and
//! filter inputs, the grid page or the session change, and replaces its
//! contents wholesale.

use leptos::prelude::*;
use market::ViewContext;
use market::view::{CardView, Page as GridPage};

use crate::components::listing_card::ListingCard;
use crate::state::session::SessionState;
use crate::state::ui::UiState;
use crate::util::storage::marketplace;

#[component]
pub fn ListingGrid(view: ViewContext, #[prop(optional)] empty_text: Option<&'static str>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let page = Memo::new(move |_| -> GridPage<CardView> {
        let (query, grid_page, _revision) = ui.with(|u| (u.query(), u.grid_page, u.revision));
        let actor = session.with(|s| s.actor.clone());
        marketplace().grid(view, &query, actor.as_ref(), grid_page)
    });

    let empty_text = empty_text.unwrap_or("No listings found.");
    let goto = move |delta: isize| {
        let current = page.with_untracked(|p| p.page);
        ui.update(|u| u.goto_page(current.saturating_add_signed(delta)));
    };

    view! {
        <div class="grid">
            {move || {
                page.get()
                    .items
                    .into_iter()
                    .map(|card| view! { <ListingCard card=card view=view /> })
                    .collect_view()
            }}
        </div>
        <Show when=move || page.with(|p| p.total == 0)>
            <p class="grid-empty">{empty_text}</p>
        </Show>
        <Show when=move || page.with(|p| p.page_count > 1)>
            <div class="pager">
                <button class="btn" disabled=move || !page.with(|p| p.has_prev()) on:click=move |_| goto(-1)>
                    "‹ Prev"
                </button>
                <span class="pager__label">
                    {move || page.with(|p| format!("Page {} of {}", p.page, p.page_count))}
                </span>
                <button class="btn" disabled=move || !page.with(|p| p.has_next()) on:click=move |_| goto(1)>
                    "Next ›"
                </button>
            </div>
        </Show>
    }
}
