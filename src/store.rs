// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! String-keyed storage of whole collections.
//!
//! Every value is a complete JSON document. There are no partial updates: a
//! mutation re-serializes the entire collection and replaces the stored value.

use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

pub const TRANSACTIONS_KEY: &str = "finance_transactions";
pub const BUDGETS_KEY: &str = "finance_budgets";
pub const USERS_KEY: &str = "finance_users";
pub const SESSION_KEY: &str = "finance_user";

/// Synchronous key-value medium. Writes replace the whole value under a key.
pub trait Store {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub fn load_json<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.load(key)? {
        Some(raw) => {
            let v = serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                key: key.to_string(),
                source,
            })?;
            Ok(Some(v))
        }
        None => Ok(None),
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn Store,
    key: &str,
    v: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(v).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &raw)
}

/// SQLite-backed store: a single `kv` table, one row per key.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self, StoreError> {
        crate::db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = crate::db::open_or_init(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Store for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| r.get(0))
            .optional()?;
        tracing::debug!(key, found = v.is_some(), "store load");
        Ok(v)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        tracing::debug!(key, bytes = value.len(), "store save");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM kv WHERE key=?1", params![key])?;
        tracing::debug!(key, "store remove");
        Ok(())
    }
}

/// Volatile store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
