//! Sell form: post a new listing.
//!
//! SYSTEM CONTEXT
//! ==============
//! Picked image files are read asynchronously; the submit handler waits for
//! every read, then validates and stores the listing in one synchronous
//! step. Validation failures stay inline on this page; success moves to the
//! products page with a notice.

use leptos::prelude::*;
use market::image::ImageUpload;
use market::intake::{SellForm, expiry_bounds};

use crate::components::filters_bar::CATEGORIES;
use crate::state::session::SessionState;
use crate::state::ui::UiState;
use crate::util::listing_actions;
use crate::util::storage::marketplace;

#[component]
pub fn SellPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let session = expect_context::<RwSignal<SessionState>>();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let contact = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let expiry = RwSignal::new(String::new());
    let image_urls = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let market = marketplace();
    let (earliest, latest) = expiry_bounds(market.today(), market.config().expiry_window_days);

    let reset = move || {
        for field in [title, description, category, contact, location, price, expiry, image_urls, error] {
            field.set(String::new());
        }
        #[cfg(feature = "csr")]
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
        }
    };

    let finish = move |form: SellForm, uploads: Vec<ImageUpload>| {
        let session = session.get_untracked();
        let mut result = Ok(());
        ui.update(|u| result = listing_actions::submit_listing(&marketplace(), &session, u, &form, &uploads));
        match result {
            Ok(()) => reset(),
            Err(message) => error.set(message),
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = SellForm {
            title: title.get_untracked(),
            description: description.get_untracked(),
            category: category.get_untracked(),
            contact: contact.get_untracked(),
            location: location.get_untracked(),
            price: price.get_untracked(),
            expiry: expiry.get_untracked(),
            image_urls: image_urls.get_untracked(),
        };

        #[cfg(feature = "csr")]
        {
            busy.set(true);
            let input = file_input.get_untracked();
            leptos::task::spawn_local(async move {
                let uploads = match input {
                    Some(input) => crate::util::files::read_uploads(&input).await,
                    None => Vec::new(),
                };
                finish(form, uploads);
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        finish(form, Vec::new());
    };

    view! {
        <div class="page page--sell">
            <h2 class="section-title">"Post an ad"</h2>
            <form id="sell-form" class="sell-form" on:submit=on_submit>
                <label>
                    "Title"
                    <input
                        type="text"
                        name="title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Description"
                    <textarea
                        name="description"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label>
                    "Category"
                    <select
                        name="category"
                        prop:value=move || category.get()
                        on:change=move |ev| category.set(event_target_value(&ev))
                    >
                        <option value="">"Choose a category"</option>
                        {CATEGORIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                    </select>
                </label>
                <label>
                    "Price (Rs.)"
                    <input
                        type="text"
                        inputmode="numeric"
                        name="price"
                        placeholder="0 for free"
                        prop:value=move || price.get()
                        on:input=move |ev| price.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Contact (phone or email)"
                    <input
                        type="text"
                        name="contact"
                        prop:value=move || contact.get()
                        on:input=move |ev| contact.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Location"
                    <input
                        type="text"
                        name="location"
                        prop:value=move || location.get()
                        on:input=move |ev| location.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Expires on"
                    <input
                        type="date"
                        name="expiryDate"
                        min=earliest.to_string()
                        max=latest.to_string()
                        prop:value=move || expiry.get()
                        on:input=move |ev| expiry.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Photos"
                    <input type="file" name="files" accept="image/*" multiple node_ref=file_input />
                </label>
                <label>
                    "Image URLs (comma separated)"
                    <input
                        type="text"
                        name="images"
                        prop:value=move || image_urls.get()
                        on:input=move |ev| image_urls.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="form-error">{move || error.get()}</p>
                </Show>
                <div class="form-actions">
                    <button class="btn btn-primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Posting..." } else { "Post ad" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
