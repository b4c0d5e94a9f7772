// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::auth::{guard, Access, PasswordCheck, Route, Session, SessionState};
use fintrack::error::{AuthError, StoreError};
use fintrack::models::{Credential, User};
use fintrack::store::{load_json, MemoryStore, Store, SESSION_KEY, USERS_KEY};
use std::cell::Cell;

fn users(store: &dyn Store) -> Vec<Credential> {
    load_json(store, USERS_KEY).unwrap().unwrap_or_default()
}

/// Fails writes and removals of one key while `failing` holds it.
struct KeyFailStore {
    inner: MemoryStore,
    failing: Cell<Option<&'static str>>,
}

impl KeyFailStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            failing: Cell::new(None),
        }
    }

    fn check(&self, key: &str) -> Result<(), StoreError> {
        if self.failing.get() == Some(key) {
            return Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        Ok(())
    }
}

impl Store for KeyFailStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

#[test]
fn signup_authenticates_and_persists_session() {
    let store = MemoryStore::new();
    let mut session = Session::restore(&store).unwrap();
    assert_eq!(session.state(), &SessionState::Anonymous);

    let user = session.signup("A", "a@x.com", "pw1").unwrap();
    assert_eq!(user.email, "a@x.com");
    assert!(session.is_authenticated());

    let stored: User = load_json(&store, SESSION_KEY).unwrap().unwrap();
    assert_eq!(stored, user);
    let raw = store.load(SESSION_KEY).unwrap().unwrap();
    assert!(!raw.contains("pw1"));
}

#[test]
fn duplicate_email_is_rejected_and_list_unchanged() {
    let store = MemoryStore::new();
    let mut session = Session::restore(&store).unwrap();
    session.signup("A", "a@x.com", "pw1").unwrap();
    session.logout().unwrap();
    let before = users(&store);

    let err = session.signup("B", "a@x.com", "pw2").unwrap_err();
    assert!(matches!(err, AuthError::DuplicateEmail));
    assert_eq!(err.to_string(), "Email already exists");
    assert_eq!(users(&store), before);
    assert_eq!(session.state(), &SessionState::Anonymous);
}

#[test]
fn email_match_is_case_sensitive() {
    let store = MemoryStore::new();
    let mut session = Session::restore(&store).unwrap();
    session.signup("A", "a@x.com", "pw1").unwrap();
    session.logout().unwrap();

    session.signup("Big A", "A@x.com", "pw2").unwrap();
    assert_eq!(users(&store).len(), 2);
}

#[test]
fn login_checks_email_and_password() {
    let store = MemoryStore::new();
    let mut session = Session::restore(&store).unwrap();
    session.signup("A", "a@x.com", "pw1").unwrap();
    session.logout().unwrap();
    assert!(store.load(SESSION_KEY).unwrap().is_none());

    let err = session.login("a@x.com", "wrong").unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(session.state(), &SessionState::Anonymous);
    assert!(store.load(SESSION_KEY).unwrap().is_none());

    let user = session.login("a@x.com", "pw1").unwrap();
    assert_eq!(user.name, "A");
    assert!(session.is_authenticated());
}

#[test]
fn session_survives_restore_and_logout_clears_it() {
    let store = MemoryStore::new();
    {
        let mut session = Session::restore(&store).unwrap();
        session.signup("A", "a@x.com", "pw1").unwrap();
    }
    let mut session = Session::restore(&store).unwrap();
    assert_eq!(session.user().unwrap().email, "a@x.com");

    session.logout().unwrap();
    session.logout().unwrap();
    assert_eq!(session.state(), &SessionState::Anonymous);
    assert!(Session::restore(&store).unwrap().user().is_none());
}

#[test]
fn profile_update_rewrites_user_and_session() {
    let store = MemoryStore::new();
    let mut session = Session::restore(&store).unwrap();
    session.signup("B", "b@x.com", "pw").unwrap();
    session.logout().unwrap();
    session.signup("A", "a@x.com", "pw1").unwrap();

    let err = session.update_profile(None, Some("b@x.com")).unwrap_err();
    assert!(matches!(err, AuthError::DuplicateEmail));

    let updated = session.update_profile(Some("Alice"), Some("alice@x.com")).unwrap();
    assert_eq!(updated.name, "Alice");
    let stored: User = load_json(&store, SESSION_KEY).unwrap().unwrap();
    assert_eq!(stored.email, "alice@x.com");

    session.logout().unwrap();
    assert!(session.login("alice@x.com", "pw1").is_ok());
}

#[test]
fn change_password_requires_current() {
    let store = MemoryStore::new();
    let mut session = Session::restore(&store).unwrap();
    assert!(matches!(
        session.change_password("x", "y").unwrap_err(),
        AuthError::NotLoggedIn
    ));

    session.signup("A", "a@x.com", "pw1").unwrap();
    assert!(matches!(
        session.change_password("nope", "pw2").unwrap_err(),
        AuthError::InvalidCredentials
    ));
    session.change_password("pw1", "pw2").unwrap();
    session.logout().unwrap();
    assert!(session.login("a@x.com", "pw1").is_err());
    assert!(session.login("a@x.com", "pw2").is_ok());
}

struct Reversed;

impl PasswordCheck for Reversed {
    fn seal(&self, plain: &str) -> String {
        plain.chars().rev().collect()
    }

    fn verify(&self, plain: &str, stored: &str) -> bool {
        self.seal(plain) == stored
    }
}

#[test]
fn password_check_is_pluggable() {
    let store = MemoryStore::new();
    let mut session = Session::restore(&store)
        .unwrap()
        .with_passwords(Box::new(Reversed));
    session.signup("A", "a@x.com", "abc").unwrap();
    assert_eq!(users(&store)[0].password, "cba");

    session.logout().unwrap();
    assert!(session.login("a@x.com", "abc").is_ok());
}

#[test]
fn guard_redirects_by_state() {
    let anon = SessionState::Anonymous;
    let busy = SessionState::Authenticating;
    let signed_in = SessionState::Authenticated(User {
        id: "1".into(),
        name: "A".into(),
        email: "a@x.com".into(),
    });

    assert_eq!(guard(Route::Dashboard, &anon), Access::Redirect(Route::Login));
    assert_eq!(guard(Route::Login, &anon), Access::Allow);
    assert_eq!(guard(Route::Landing, &anon), Access::Allow);
    assert_eq!(guard(Route::Budget, &busy), Access::Pending);
    assert_eq!(guard(Route::Analytics, &signed_in), Access::Allow);
    assert_eq!(guard(Route::Signup, &signed_in), Access::Redirect(Route::Dashboard));
    assert_eq!(guard(Route::Landing, &signed_in), Access::Allow);
}

#[test]
fn failed_session_write_leaves_no_account_behind() {
    let store = KeyFailStore::new();
    let mut session = Session::restore(&store).unwrap();

    store.failing.set(Some(SESSION_KEY));
    assert!(session.signup("A", "a@x.com", "pw1").is_err());
    assert_eq!(session.state(), &SessionState::Anonymous);
    assert!(users(&store).is_empty());

    store.failing.set(None);
    let user = session.signup("A", "a@x.com", "pw1").unwrap();
    assert_eq!(users(&store).len(), 1);
    assert_eq!(session.user(), Some(&user));
}

#[test]
fn failed_profile_write_keeps_old_details() {
    let store = KeyFailStore::new();
    let mut session = Session::restore(&store).unwrap();
    let user = session.signup("A", "a@x.com", "pw1").unwrap();

    store.failing.set(Some(SESSION_KEY));
    assert!(session.update_profile(Some("Alice"), Some("alice@x.com")).is_err());
    assert_eq!(session.user(), Some(&user));
    let stored = users(&store);
    assert_eq!(stored[0].name, "A");
    assert_eq!(stored[0].email, "a@x.com");

    store.failing.set(None);
    let persisted: User = load_json(&store, SESSION_KEY).unwrap().unwrap();
    assert_eq!(persisted, user);
}

#[test]
fn failed_logout_stays_signed_in() {
    let store = KeyFailStore::new();
    let mut session = Session::restore(&store).unwrap();
    session.signup("A", "a@x.com", "pw1").unwrap();

    store.failing.set(Some(SESSION_KEY));
    assert!(session.logout().is_err());
    assert!(session.is_authenticated());
    assert!(Session::restore(&store).unwrap().is_authenticated());

    store.failing.set(None);
    session.logout().unwrap();
    assert!(!session.is_authenticated());
}
