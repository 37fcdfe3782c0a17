//! Home page: featured strip plus the latest active listings.

use leptos::prelude::*;
use market::ViewContext;

use crate::components::hero_pinned::HeroPinned;
use crate::components::listing_grid::ListingGrid;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page page--home">
            <HeroPinned />
            <h2 class="section-title">"Latest listings"</h2>
            <ListingGrid view=ViewContext::Browse />
        </div>
    }
}
