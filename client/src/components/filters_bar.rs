//! Category and price filters for the products page.

use leptos::prelude::*;

use crate::state::ui::UiState;

pub const CATEGORIES: &[&str] = &["Electronics", "Vehicles", "Furniture", "Fashion", "Books", "Real Estate", "Other"];

/// `(value, label)`; values are `"min-max"` ranges in rupees.
const PRICE_RANGES: &[(&str, &str)] = &[
    ("", "Any price"),
    ("-1000", "Under Rs. 1,000"),
    ("1000-10000", "Rs. 1,000 to 10,000"),
    ("10000-100000", "Rs. 10,000 to 1,00,000"),
    ("100000-", "Above Rs. 1,00,000"),
];

#[component]
pub fn FiltersBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="filters-bar">
            <select
                name="category"
                prop:value=move || ui.with(|u| u.filters.category.clone())
                on:change=move |ev| {
                    let category = event_target_value(&ev);
                    ui.update(|u| u.set_category(category));
                }
            >
                <option value="">"All categories"</option>
                {CATEGORIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
            </select>
            <select
                name="price"
                prop:value=move || ui.with(|u| u.filters.price_range.clone())
                on:change=move |ev| {
                    let range = event_target_value(&ev);
                    ui.update(|u| u.set_price_range(range));
                }
            >
                {PRICE_RANGES
                    .iter()
                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
