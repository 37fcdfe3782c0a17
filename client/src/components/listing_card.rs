//! One listing card: thumbnail, title, price and the viewer's actions.

use leptos::prelude::*;
use market::ViewContext;
use market::view::{CardAction, CardView};

use crate::state::session::SessionState;
use crate::state::ui::UiState;
use crate::util::listing_actions;
use crate::util::storage::marketplace;

fn action_class(action: CardAction) -> &'static str {
    match action {
        CardAction::View => "btn view-btn",
        CardAction::Delete => "btn delete",
        CardAction::Pin => "btn pin",
        CardAction::Unpin => "btn unpin",
    }
}

#[component]
pub fn ListingCard(card: CardView, view: ViewContext) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let buttons = card
        .actions
        .iter()
        .copied()
        .map(|action| {
            let id = card.id.clone();
            let on_click = move |_| match action {
                CardAction::View => ui.update(|u| listing_actions::open_gallery(&marketplace(), u, &id)),
                CardAction::Delete => ui.update(|u| listing_actions::request_delete(u, &id, view)),
                CardAction::Pin | CardAction::Unpin => {
                    let session = session.get_untracked();
                    ui.update(|u| listing_actions::toggle_pin(&marketplace(), &session, u, &id));
                }
            };
            view! {
                <button class=action_class(action) on:click=on_click>
                    {action.label()}
                </button>
            }
        })
        .collect_view();

    let class = if card.compact { "card compact" } else { "card" };
    let title = card.display_title();

    view! {
        <div class=class data-id=card.id.clone()>
            <div class="thumb">
                <img src=card.thumbnail.clone() alt=card.title.clone() />
            </div>
            <div class="title">{title}</div>
            <div class="price">{card.price.clone()}</div>
            <div class="actions">{buttons}</div>
        </div>
    }
}
