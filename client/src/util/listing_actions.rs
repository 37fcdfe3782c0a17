//! UI flows that mutate listings or the session.
//!
//! Each flow runs one `Marketplace` operation and folds the outcome into
//! [`UiState`] / [`SessionState`]: success bumps the render revision,
//! failures become a notice, a pin rejected by the cap opens the replace
//! chooser. Components call these from event handlers inside
//! `RwSignal::update`; keeping them free of Leptos types lets them run
//! against an in-memory store in unit tests.

#[cfg(test)]
#[path = "listing_actions_test.rs"]
mod listing_actions_test;

use market::image::ImageUpload;
use market::intake::{IntakeError, POSTED_NOTICE, SellForm};
use market::pins::PinError;
use market::{KvStore, Marketplace, Notice, ViewContext};
use mockable::Clock;

use crate::state::session::SessionState;
use crate::state::ui::{Page, PendingConfirm, PinReplace, PinnedOption, UiState};

/// Ask for confirmation before deleting `id`.
pub fn request_delete(ui: &mut UiState, id: &str, view: ViewContext) {
    ui.confirm = Some(PendingConfirm::DeleteListing { id: id.to_owned(), view });
}

pub fn cancel_confirm(ui: &mut UiState) {
    ui.confirm = None;
}

/// Run the pending confirmation, if any.
pub fn confirm<S: KvStore, C: Clock>(market: &Marketplace<S, C>, session: &SessionState, ui: &mut UiState) {
    let Some(pending) = ui.confirm.take() else {
        return;
    };
    match pending {
        PendingConfirm::DeleteListing { id, view } => match market.delete(&id, session.actor.as_ref(), view) {
            Ok(removed) => {
                if removed && ui.gallery.as_ref().is_some_and(|g| g.id == id) {
                    ui.close_gallery();
                }
                ui.mutated();
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "delete refused");
                ui.notify(err.notice());
            }
        },
    }
}

/// Pin or unpin `id`; a full cap opens the replace chooser.
pub fn toggle_pin<S: KvStore, C: Clock>(market: &Marketplace<S, C>, session: &SessionState, ui: &mut UiState, id: &str) {
    match market.toggle_pin(id, session.actor.as_ref()) {
        Ok(outcome) => {
            tracing::debug!(id, ?outcome, "pin toggled");
            ui.mutated();
        }
        Err(PinError::LimitReached { limit, pinned }) => {
            ui.pin_replace = Some(PinReplace {
                target: id.to_owned(),
                limit,
                pinned: pinned.into_iter().map(|l| PinnedOption { id: l.id, title: l.title }).collect(),
            });
        }
        Err(err) => ui.notify(err.notice()),
    }
}

/// Complete the replace flow by unpinning `replaced` in favor of the
/// pending target.
pub fn replace_pin<S: KvStore, C: Clock>(market: &Marketplace<S, C>, session: &SessionState, ui: &mut UiState, replaced: &str) {
    let Some(pending) = ui.pin_replace.take() else {
        return;
    };
    match market.pin_replacing(&pending.target, replaced, session.actor.as_ref()) {
        Ok(_) => ui.mutated(),
        Err(err) => ui.notify(err.notice()),
    }
}

pub fn cancel_pin_replace(ui: &mut UiState) {
    ui.pin_replace = None;
}

/// Open the gallery for `id`. A listing deleted meanwhile just refreshes
/// the grid.
pub fn open_gallery<S: KvStore, C: Clock>(market: &Marketplace<S, C>, ui: &mut UiState, id: &str) {
    match market.gallery(id) {
        Some(gallery) => ui.open_gallery(gallery),
        None => ui.mutated(),
    }
}

/// Submit the sell form.
///
/// On success the user lands on the products page with a notice (plus any
/// image warnings). Validation failures are returned for inline display and
/// change nothing; storage failures become the storage notice.
///
/// # Errors
///
/// Returns the user-facing message of a validation failure.
pub fn submit_listing<S: KvStore, C: Clock>(
    market: &Marketplace<S, C>,
    session: &SessionState,
    ui: &mut UiState,
    form: &SellForm,
    uploads: &[ImageUpload],
) -> Result<(), String> {
    match market.submit(form, uploads, session.actor.as_ref()) {
        Ok(submission) => {
            let mut notice = POSTED_NOTICE.to_owned();
            for warning in &submission.warnings {
                notice.push('\n');
                notice.push_str(&warning.to_string());
            }
            ui.navigate(Page::Products);
            ui.notify(notice);
            ui.mutated();
            Ok(())
        }
        Err(err @ IntakeError::Store(_)) => {
            ui.notify(err.notice());
            Ok(())
        }
        Err(err) => Err(err.notice()),
    }
}

/// Log in and go to the home page.
///
/// # Errors
///
/// Returns the user-facing message when credentials are rejected.
pub fn login<S: KvStore, C: Clock>(
    market: &Marketplace<S, C>,
    session: &mut SessionState,
    ui: &mut UiState,
    username: &str,
    password: &str,
) -> Result<(), String> {
    let actor = market.login(username, password).map_err(|e| e.notice())?;
    session.actor = Some(actor);
    ui.navigate(Page::Home);
    ui.mutated();
    Ok(())
}

pub fn logout<S: KvStore, C: Clock>(market: &Marketplace<S, C>, session: &mut SessionState, ui: &mut UiState) {
    if let Err(err) = market.logout() {
        ui.notify(err.notice());
    }
    session.actor = None;
    ui.navigate(Page::Home);
    ui.mutated();
}

/// Seed default accounts and pick up an existing session on startup.
pub fn bootstrap<S: KvStore, C: Clock>(market: &Marketplace<S, C>) -> SessionState {
    if let Err(err) = market.ensure_default_users() {
        tracing::error!(error = %err, "could not seed default users");
    }
    SessionState::new(market.current_actor())
}
