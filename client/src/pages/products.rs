//! Products page: every active listing with category and price filters.

use leptos::prelude::*;
use market::ViewContext;

use crate::components::filters_bar::FiltersBar;
use crate::components::listing_grid::ListingGrid;

#[component]
pub fn ProductsPage() -> impl IntoView {
    view! {
        <div class="page page--products">
            <h2 class="section-title">"All products"</h2>
            <FiltersBar />
            <ListingGrid view=ViewContext::Browse empty_text="No listings match your search." />
        </div>
    }
}
