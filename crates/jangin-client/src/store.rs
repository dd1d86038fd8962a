// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Remote prompt store over a PostgREST-style API (Supabase).
//!
//! Implements the engine's [`PromptStore`] contract against a `prompts`
//! table: insert with `Prefer: return=representation` to get the assigned
//! id back, select with column projection and `id=eq.` filters. Failures
//! map to store errors and are surfaced verbatim — retry is the caller's
//! decision.

use chrono::{DateTime, Utc};
use jangin::error::{Error, Result};
use jangin::storage::{PromptRecord, PromptStore, SavedPrompt};
use reqwest::blocking::Client;
use serde::Deserialize;

const DEFAULT_TABLE: &str = "prompts";

/// PostgREST-backed prompt store.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl SupabaseStore {
    /// Create a store client for a project URL and anon key.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Override the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    fn request(&self, builder: reqwest::blocking::RequestBuilder) -> Result<String> {
        let response = builder
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .send()
            .map_err(|e| Error::store(format!("store request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::store(format!("failed to read store response: {e}")))?;

        if !status.is_success() {
            return Err(Error::store(format!("store error ({status}): {body}")));
        }
        Ok(body)
    }
}

#[derive(Deserialize)]
struct InsertedRow {
    id: i64,
}

#[derive(Deserialize)]
struct ListedRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct FetchedRow {
    name: String,
    content: String,
}

impl PromptStore for SupabaseStore {
    fn save(&mut self, name: &str, text: &str) -> Result<i64> {
        tracing::debug!(name, table = %self.table, "store save");
        let body = self.request(
            self.client
                .post(self.table_url())
                .header("Prefer", "return=representation")
                .header("content-type", "application/json")
                .json(&serde_json::json!([{"name": name, "content": text}])),
        )?;

        let rows: Vec<InsertedRow> = serde_json::from_str(&body)
            .map_err(|e| Error::store(format!("unexpected insert response: {e}")))?;
        rows.first()
            .map(|row| row.id)
            .ok_or_else(|| Error::store("insert returned no rows"))
    }

    fn list(&self) -> Result<Vec<PromptRecord>> {
        let url = format!(
            "{}?select=id,name,created_at&order=created_at.desc",
            self.table_url()
        );
        let body = self.request(self.client.get(url))?;

        let rows: Vec<ListedRow> = serde_json::from_str(&body)
            .map_err(|e| Error::store(format!("unexpected list response: {e}")))?;
        Ok(rows
            .into_iter()
            .map(|row| PromptRecord {
                id: row.id,
                name: row.name,
                created_at: row.created_at,
            })
            .collect())
    }

    fn get_by_id(&self, id: i64) -> Result<SavedPrompt> {
        let url = format!("{}?select=name,content&id=eq.{id}", self.table_url());
        let body = self.request(self.client.get(url))?;

        let rows: Vec<FetchedRow> = serde_json::from_str(&body)
            .map_err(|e| Error::store(format!("unexpected fetch response: {e}")))?;
        rows.into_iter()
            .next()
            .map(|row| SavedPrompt {
                name: row.name,
                content: row.content,
            })
            .ok_or_else(|| Error::store(format!("no prompt with id {id}")))
    }
}
