// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Persistence collaborators.
//!
//! Two external stores back a session: a key-value store for opaque local
//! state (config blob, draft text — the autosave target) and a remote
//! prompt store for named, shareable documents. Both are traits so hosts
//! supply transport; in-memory implementations here back the tests.
//! Failures are surfaced verbatim with no retry.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value persistence for session-local state.
pub trait KvStore {
    /// Read a value, `None` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Listing entry returned by [`PromptStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// User-chosen name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Full document returned by [`PromptStore::get_by_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPrompt {
    /// User-chosen name.
    pub name: String,
    /// Document text.
    pub content: String,
}

/// Remote store of named prompt documents.
pub trait PromptStore {
    /// Save a document under a name, returning its assigned id.
    fn save(&mut self, name: &str, text: &str) -> Result<i64>;

    /// List saved documents, newest first.
    fn list(&self) -> Result<Vec<PromptRecord>>;

    /// Fetch a document by id.
    fn get_by_id(&self, id: i64) -> Result<SavedPrompt>;
}

/// In-memory prompt store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<(PromptRecord, String)>>,
    next_id: Mutex<i64>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PromptStore for MemoryStore {
    fn save(&mut self, name: &str, text: &str) -> Result<i64> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;
        let record = PromptRecord {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push((record, text.to_string()));
        Ok(id)
    }

    fn list(&self) -> Result<Vec<PromptRecord>> {
        let mut records: Vec<PromptRecord> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .map(|(record, _)| record.clone())
            .collect();
        records.reverse();
        Ok(records)
    }

    fn get_by_id(&self, id: i64) -> Result<SavedPrompt> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|(record, _)| record.id == id)
            .map(|(record, content)| SavedPrompt {
                name: record.name.clone(),
                content: content.clone(),
            })
            .ok_or_else(|| Error::store(format!("no prompt with id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_kv_round_trip() {
        let mut kv = MemoryKv::new();
        assert_eq!(kv.get("missing").unwrap(), None);

        kv.put("key", "value").unwrap();
        assert_eq!(kv.get("key").unwrap().as_deref(), Some("value"));

        kv.put("key", "newer").unwrap();
        assert_eq!(kv.get("key").unwrap().as_deref(), Some("newer"));
    }

    #[test]
    fn test_memory_store_save_and_fetch() {
        let mut store = MemoryStore::new();
        let id = store.save("checkout flow", "## Checkout").unwrap();

        let full = store.get_by_id(id).unwrap();
        assert_eq!(full.name, "checkout flow");
        assert_eq!(full.content, "## Checkout");
    }

    #[test]
    fn test_memory_store_list_newest_first() {
        let mut store = MemoryStore::new();
        let first = store.save("first", "a").unwrap();
        let second = store.save("second", "b").unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second);
        assert_eq!(records[1].id, first);
    }

    #[test]
    fn test_missing_id_is_store_error() {
        let store = MemoryStore::new();
        let err = store.get_by_id(99).unwrap_err();
        assert!(err.is_store_error());
    }
}
