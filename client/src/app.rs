//! Root component: bootstraps the marketplace and lays out the shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` seeds the default users, restores the session from storage and
//! provides `UiState` and `SessionState` as context before any child
//! renders. The modals sit outside the page switch so they survive
//! navigation until closed.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::confirm_modal::ConfirmModal;
use crate::components::gallery_modal::GalleryModal;
use crate::components::notice_modal::NoticeModal;
use crate::components::pin_replace_modal::PinReplaceModal;
use crate::components::site_header::SiteHeader;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::products::ProductsPage;
use crate::pages::profile::ProfilePage;
use crate::pages::sell::SellPage;
use crate::state::ui::{Page, UiState};
use crate::util::listing_actions;
use crate::util::storage::marketplace;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(listing_actions::bootstrap(&marketplace()));
    let ui = RwSignal::new(UiState::default());
    provide_context(session);
    provide_context(ui);

    let current_page = Memo::new(move |_| ui.with(|u| u.page));

    view! {
        <Title text="Nepali Bazar" />
        <SiteHeader />
        <main class="site-main">
            {move || match current_page.get() {
                Page::Home => view! { <HomePage /> }.into_any(),
                Page::Products => view! { <ProductsPage /> }.into_any(),
                Page::Profile => view! { <ProfilePage /> }.into_any(),
                Page::Sell => view! { <SellPage /> }.into_any(),
                Page::Login => view! { <LoginPage /> }.into_any(),
            }}
        </main>
        <footer class="site-footer">"Nepali Bazar: buy and sell locally."</footer>
        <NoticeModal />
        <ConfirmModal />
        <PinReplaceModal />
        <GalleryModal />
    }
}
