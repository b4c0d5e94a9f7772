// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Current-user state and the credential checks behind it.
//!
//! Credentials live in the store as a plain list. Emails are compared exactly
//! (case-sensitive). Password handling goes through [`PasswordCheck`]; the
//! default [`Plaintext`] keeps passwords as entered.

use crate::error::{AuthError, StoreError};
use crate::models::{Credential, User};
use crate::store::{load_json, save_json, Store, SESSION_KEY, USERS_KEY};
use crate::utils::fresh_id;
use std::time::Duration;

/// How passwords are written to and checked against the user list.
pub trait PasswordCheck {
    fn seal(&self, plain: &str) -> String;
    fn verify(&self, plain: &str, stored: &str) -> bool;
}

/// Stores passwords verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct Plaintext;

impl PasswordCheck for Plaintext {
    fn seal(&self, plain: &str) -> String {
        plain.to_string()
    }

    fn verify(&self, plain: &str, stored: &str) -> bool {
        plain == stored
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated(User),
}

pub struct Session<'a> {
    store: &'a dyn Store,
    passwords: Box<dyn PasswordCheck>,
    latency: Duration,
    state: SessionState,
}

impl<'a> Session<'a> {
    /// Picks up a persisted session if one exists.
    pub fn restore(store: &'a dyn Store) -> Result<Self, StoreError> {
        let state = match load_json::<User>(store, SESSION_KEY)? {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Anonymous,
        };
        Ok(Self {
            store,
            passwords: Box::new(Plaintext),
            latency: Duration::ZERO,
            state,
        })
    }

    pub fn with_passwords(mut self, passwords: Box<dyn PasswordCheck>) -> Self {
        self.passwords = passwords;
        self
    }

    /// Fixed pause taken by login and signup before they look at the user list.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(u) => Some(u),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let prior = self.begin();
        let users = match self.users() {
            Ok(u) => u,
            Err(e) => {
                self.state = prior;
                return Err(e.into());
            }
        };
        let found = users
            .iter()
            .find(|c| c.email == email && self.passwords.verify(password, &c.password));
        let Some(found) = found else {
            tracing::warn!(email, "login rejected");
            self.state = prior;
            return Err(AuthError::InvalidCredentials);
        };
        let user = found.user();
        if let Err(e) = save_json(self.store, SESSION_KEY, &user) {
            self.state = prior;
            return Err(e.into());
        }
        tracing::info!(id = %user.id, "logged in");
        Ok(self.enter(user))
    }

    pub fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let prior = self.begin();
        let result = self.register(name, email, password);
        match result {
            Ok(user) => {
                tracing::info!(id = %user.id, "account created");
                Ok(self.enter(user))
            }
            Err(e) => {
                if matches!(e, AuthError::DuplicateEmail) {
                    tracing::warn!(email, "signup rejected, email in use");
                }
                self.state = prior;
                Err(e)
            }
        }
    }

    /// Clears the in-memory and persisted session whatever the current state.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.store.remove(SESSION_KEY)?;
        self.state = SessionState::Anonymous;
        tracing::info!("logged out");
        Ok(())
    }

    /// Changes the signed-in user's name and/or email. The new email must not
    /// belong to another user.
    pub fn update_profile(
        &mut self,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, AuthError> {
        let current = self.user().cloned().ok_or(AuthError::NotLoggedIn)?;
        let previous = self.users()?;
        let mut users = previous.clone();
        if let Some(email) = email {
            if users.iter().any(|c| c.email == email && c.id != current.id) {
                return Err(AuthError::DuplicateEmail);
            }
        }
        let mut updated = current.clone();
        if let Some(name) = name {
            updated.name = name.to_string();
        }
        if let Some(email) = email {
            updated.email = email.to_string();
        }
        if let Some(c) = users.iter_mut().find(|c| c.id == current.id) {
            c.name = updated.name.clone();
            c.email = updated.email.clone();
        }
        self.persist(&previous, &users, &updated)?;
        tracing::info!(id = %updated.id, "profile updated");
        Ok(self.enter(updated))
    }

    pub fn change_password(&mut self, current: &str, new: &str) -> Result<(), AuthError> {
        let id = self.user().map(|u| u.id.clone()).ok_or(AuthError::NotLoggedIn)?;
        let mut users = self.users()?;
        let Some(cred) = users.iter_mut().find(|c| c.id == id) else {
            return Err(AuthError::InvalidCredentials);
        };
        if !self.passwords.verify(current, &cred.password) {
            return Err(AuthError::InvalidCredentials);
        }
        cred.password = self.passwords.seal(new);
        save_json(self.store, USERS_KEY, &users)?;
        tracing::info!(id = %id, "password changed");
        Ok(())
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let previous = self.users()?;
        if previous.iter().any(|c| c.email == email) {
            return Err(AuthError::DuplicateEmail);
        }
        let cred = Credential {
            id: fresh_id(previous.iter().map(|c| c.id.as_str())),
            name: name.to_string(),
            email: email.to_string(),
            password: self.passwords.seal(password),
        };
        let user = cred.user();
        let mut users = previous.clone();
        users.push(cred);
        self.persist(&previous, &users, &user)?;
        Ok(user)
    }

    /// Writes the user list, then the session record. When the session write
    /// fails the stored list is put back to `previous`.
    fn persist(
        &self,
        previous: &[Credential],
        users: &[Credential],
        user: &User,
    ) -> Result<(), StoreError> {
        save_json(self.store, USERS_KEY, users)?;
        if let Err(e) = save_json(self.store, SESSION_KEY, user) {
            if let Err(undo) = save_json(self.store, USERS_KEY, previous) {
                tracing::warn!(error = %undo, "could not restore user list");
            }
            return Err(e);
        }
        Ok(())
    }

    fn users(&self) -> Result<Vec<Credential>, StoreError> {
        Ok(load_json(self.store, USERS_KEY)?.unwrap_or_default())
    }

    fn begin(&mut self) -> SessionState {
        let prior = std::mem::replace(&mut self.state, SessionState::Authenticating);
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        prior
    }

    fn enter(&mut self, user: User) -> User {
        self.state = SessionState::Authenticated(user.clone());
        user
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Dashboard,
    Transactions,
    Budget,
    Analytics,
    Profile,
}

impl Route {
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::Transactions
                | Route::Budget
                | Route::Analytics
                | Route::Profile
        )
    }

    pub fn is_auth_page(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// A login or signup is in flight; the caller should wait.
    Pending,
    Redirect(Route),
}

/// Anonymous users are sent to login from protected routes; signed-in users are
/// sent to the dashboard from login and signup.
pub fn guard(route: Route, state: &SessionState) -> Access {
    match state {
        SessionState::Authenticating if route.is_protected() => Access::Pending,
        SessionState::Anonymous if route.is_protected() => Access::Redirect(Route::Login),
        SessionState::Authenticated(_) if route.is_auth_page() => {
            Access::Redirect(Route::Dashboard)
        }
        _ => Access::Allow,
    }
}
