// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Structured prompt configuration.
//!
//! [`PromptConfig`] is the single source of truth for the structural content
//! of a prompt document. It is mutated only through the editing operations
//! here (and the session wrappers around them); the compiler derives the
//! canonical document from a config snapshot.

use serde::{Deserialize, Serialize};

/// Kind of a user-authored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A feature-module block (same four-line shape as catalog modules).
    Module,
    /// A numbered execution step.
    Step,
}

/// A user-authored module or step.
///
/// Entries are never mutated in place; edit by removing and re-adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntry {
    /// Unique id, generated by the owning session at creation time.
    pub id: String,
    /// Whether this renders as a module block or a numbered step.
    pub kind: EntryKind,
    /// Title; empty titles are defaulted at creation.
    pub title: String,
    /// Body text.
    pub content: String,
}

impl CustomEntry {
    /// Create an entry, defaulting an empty title by kind.
    pub fn new(
        id: impl Into<String>,
        kind: EntryKind,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            match kind {
                EntryKind::Module => "Untitled module".to_string(),
                EntryKind::Step => "Step".to_string(),
            }
        } else {
            title
        };
        Self {
            id: id.into(),
            kind,
            title,
            content: content.into(),
        }
    }
}

/// The structural configuration a prompt document is compiled from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Free-text project definition.
    pub project_definition: String,
    /// Free-text information-architecture / layout description.
    pub ia_prompt: String,
    /// Ids of selected catalog modules. Selection order is irrelevant;
    /// stale ids are tolerated and filtered at compile time.
    pub selected_modules: Vec<String>,
    /// User-authored entries, in insertion (= render) order.
    pub custom_entries: Vec<CustomEntry>,
}

impl PromptConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given catalog module is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_modules.iter().any(|m| m == id)
    }

    /// Toggle a catalog module selection. Returns true if now selected.
    pub fn toggle_module(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected_modules.iter().position(|m| m == id) {
            self.selected_modules.remove(pos);
            false
        } else {
            self.selected_modules.push(id.to_string());
            true
        }
    }

    /// Append a user-authored entry.
    pub fn push_entry(&mut self, entry: CustomEntry) {
        self.custom_entries.push(entry);
    }

    /// Remove an entry by id. Returns true if something was removed.
    pub fn remove_entry(&mut self, id: &str) -> bool {
        let before = self.custom_entries.len();
        self.custom_entries.retain(|e| e.id != id);
        self.custom_entries.len() != before
    }

    /// Entries of the given kind, in insertion order.
    pub fn entries_of(&self, kind: EntryKind) -> impl Iterator<Item = &CustomEntry> {
        self.custom_entries.iter().filter(move |e| e.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_module() {
        let mut config = PromptConfig::new();
        assert!(config.toggle_module("md_io"));
        assert!(config.is_selected("md_io"));
        assert!(!config.toggle_module("md_io"));
        assert!(!config.is_selected("md_io"));
    }

    #[test]
    fn test_entry_title_defaults() {
        let module = CustomEntry::new("e1", EntryKind::Module, "  ", "body");
        assert_eq!(module.title, "Untitled module");

        let step = CustomEntry::new("e2", EntryKind::Step, "", "body");
        assert_eq!(step.title, "Step");

        let named = CustomEntry::new("e3", EntryKind::Step, "Deploy", "body");
        assert_eq!(named.title, "Deploy");
    }

    #[test]
    fn test_remove_entry() {
        let mut config = PromptConfig::new();
        config.push_entry(CustomEntry::new("e1", EntryKind::Step, "A", "first"));
        config.push_entry(CustomEntry::new("e2", EntryKind::Module, "B", "second"));

        assert!(config.remove_entry("e1"));
        assert!(!config.remove_entry("e1"));
        assert_eq!(config.custom_entries.len(), 1);
        assert_eq!(config.custom_entries[0].id, "e2");
    }

    #[test]
    fn test_entries_of_preserves_order() {
        let mut config = PromptConfig::new();
        config.push_entry(CustomEntry::new("e1", EntryKind::Step, "A", "1"));
        config.push_entry(CustomEntry::new("e2", EntryKind::Module, "X", "2"));
        config.push_entry(CustomEntry::new("e3", EntryKind::Step, "B", "3"));

        let steps: Vec<&str> = config
            .entries_of(EntryKind::Step)
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(steps, ["A", "B"]);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = PromptConfig::new();
        config.project_definition = "A todo app".to_string();
        config.toggle_module("preview");
        config.push_entry(CustomEntry::new("e1", EntryKind::Module, "Auth", "OAuth login"));

        let json = serde_json::to_string(&config).unwrap();
        let back: PromptConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_tolerates_missing_fields() {
        // Persisted blobs from older sessions may omit fields entirely.
        let back: PromptConfig = serde_json::from_str(r#"{"project_definition":"x"}"#).unwrap();
        assert_eq!(back.project_definition, "x");
        assert!(back.custom_entries.is_empty());
    }
}
