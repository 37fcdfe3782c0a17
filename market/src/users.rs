//! User list and login session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The user list is a JSON array under its own key; the session is the bare
//! username string under a separate key. "Logging in" only compares the
//! stored plain-text password and records the name, so anything that can
//! write storage can impersonate anyone. The session does not expire.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use crate::config::StorageKeys;
use crate::model::{Actor, Role, User, default_users};
use crate::store::{KvStore, Notice, StoreError, read_json, write_json};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Notice for AuthError {
    fn notice(&self) -> String {
        match self {
            Self::Store(e) => e.notice(),
            other => other.to_string(),
        }
    }
}

pub struct UserStore<'a, S: ?Sized> {
    store: &'a S,
    keys: &'a StorageKeys,
}

impl<'a, S: KvStore + ?Sized> UserStore<'a, S> {
    pub fn new(store: &'a S, keys: &'a StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn all(&self) -> Vec<User> {
        read_json(self.store, &self.keys.users, Vec::new())
    }

    /// Seed the default admin and user accounts if no users exist.
    /// Returns whether seeding happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed accounts cannot be written.
    pub fn ensure_defaults(&self) -> Result<bool, StoreError> {
        if !self.all().is_empty() {
            return Ok(false);
        }
        write_json(self.store, &self.keys.users, &default_users())?;
        tracing::info!("seeded default user accounts");
        Ok(true)
    }

    /// Check credentials and record `username` as the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on an unknown user or wrong
    /// password, or a storage error if the session cannot be written.
    pub fn login(&self, username: &str, password: &str) -> Result<Actor, AuthError> {
        let username = username.trim();
        let user = self
            .all()
            .into_iter()
            .find(|u| u.username == username && u.password == password)
            .ok_or(AuthError::InvalidCredentials)?;
        self.store.set_item(&self.keys.current_user, &user.username)?;
        tracing::info!(username = %user.username, "logged in");
        Ok(Actor::new(&user.username, user.role))
    }

    /// Clear the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session key cannot be removed.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove_item(&self.keys.current_user)
    }

    /// Username recorded in the session, if any.
    pub fn current_username(&self) -> Option<String> {
        match self.store.get_item(&self.keys.current_user) {
            Ok(name) => name.filter(|n| !n.is_empty()),
            Err(e) => {
                tracing::error!(error = %e, "current_username: session read failed");
                None
            }
        }
    }

    /// The session user with their role resolved against the user list.
    ///
    /// A session naming an unknown account resolves to an ordinary user.
    pub fn current_actor(&self) -> Option<Actor> {
        let username = self.current_username()?;
        let role = self.role_of(&username);
        Some(Actor::new(&username, role))
    }

    pub fn is_admin(&self) -> bool {
        self.current_actor().is_some_and(|a| a.is_admin())
    }

    fn role_of(&self, username: &str) -> Role {
        self.all().into_iter().find(|u| u.username == username).map_or(Role::User, |u| u.role)
    }
}
