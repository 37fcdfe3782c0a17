//! Login session as seen by the UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors the `currentUser` storage entry so components can render
//! identity-dependent controls (pin buttons, the profile page, auth links)
//! without re-reading storage on every render. Refreshed from storage on
//! startup and after login/logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use market::Actor;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub actor: Option<Actor>,
}

impl SessionState {
    #[must_use]
    pub fn new(actor: Option<Actor>) -> Self {
        Self { actor }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.actor.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.actor.as_ref().is_some_and(Actor::is_admin)
    }

    /// Display name for the header, if logged in.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.actor.as_ref().map(|a| a.username.as_str())
    }
}
