// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Editing session.
//!
//! A [`Session`] owns everything one editing context needs: the module
//! catalog, the structural config, the draft document, the suggestion set,
//! the refinement flow, and the autosave schedule. Sessions are created on
//! session start and dropped on session end; there is no ambient global
//! state. All mutation goes through the operations here, so the draft's
//! dirty guard and the refiner's staleness guard always see every edit.
//!
//! # Examples
//!
//! ```
//! use jangin::backend::MockBackend;
//! use jangin::catalog::Catalog;
//! use jangin::session::Session;
//!
//! let mut session = Session::new(Catalog::builtin());
//! session.set_project_definition("A kanban board for small teams");
//! session.toggle_module("preview");
//!
//! let backend = MockBackend::new(|text, _| format!("# Refined\n\n{text}"));
//! session.optimize(&backend).unwrap();
//! assert!(session.current_text().starts_with("# Refined"));
//!
//! session.restore_original();
//! assert!(session.current_text().starts_with("# System role"));
//! ```

use crate::backend::Backend;
use crate::catalog::{Catalog, LayoutKind};
use crate::clock::{Clock, SystemClock};
use crate::compile::compile;
use crate::config::{CustomEntry, EntryKind, PromptConfig};
use crate::draft::Draft;
use crate::error::{Error, Result};
use crate::profile::InstructionProfile;
use crate::refine::{Completion, CritiqueOutcome, OptimizeReport, Phase, Refiner, Ticket};
use crate::render::{preview_or_notice, MarkdownRenderer};
use crate::storage::{KvStore, PromptStore};
use crate::suggestion::{Suggestion, SuggestionSet};
use std::time::{Duration, Instant};

/// Key-value key for the persisted configuration blob.
pub const CONFIG_KEY: &str = "prompt_config";

/// Key-value key for the persisted draft text.
pub const DRAFT_KEY: &str = "generated_prompt_draft";

/// Default autosave interval.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// One editing context: config, draft, suggestions, and refinement flow.
pub struct Session<C: Clock = SystemClock> {
    catalog: Catalog,
    config: PromptConfig,
    draft: Draft,
    suggestions: SuggestionSet,
    refiner: Refiner,
    profile: InstructionProfile,
    next_entry_id: u64,
    clock: C,
    autosave_interval: Duration,
    last_saved: Instant,
}

impl Session<SystemClock> {
    /// Create a session over the given catalog with the system clock.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_clock(catalog, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    /// Create a session with an explicit time source.
    pub fn with_clock(catalog: Catalog, clock: C) -> Self {
        let config = PromptConfig::new();
        let draft = Draft::from_compiled(compile(&catalog, &config));
        let last_saved = clock.now();
        Self {
            catalog,
            config,
            draft,
            suggestions: SuggestionSet::new(),
            refiner: Refiner::new(),
            profile: InstructionProfile::new(),
            next_entry_id: 0,
            clock,
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            last_saved,
        }
    }

    /// Replace the instruction profile.
    pub fn with_profile(mut self, profile: InstructionProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Override the autosave interval.
    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The module catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The structural configuration.
    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// The live document text.
    pub fn current_text(&self) -> &str {
        self.draft.current_text()
    }

    /// Whether the document has diverged from structural recompilation.
    pub fn is_dirty(&self) -> bool {
        self.draft.is_dirty()
    }

    /// The active suggestion set.
    pub fn suggestions(&self) -> &[Suggestion] {
        self.suggestions.as_slice()
    }

    /// Current refinement phase.
    pub fn phase(&self) -> Phase {
        self.refiner.phase()
    }

    /// The instruction profile backends are called with.
    pub fn profile(&self) -> &InstructionProfile {
        &self.profile
    }

    // ========================================================================
    // Structural editing
    // ========================================================================

    /// Set the free-text project definition.
    pub fn set_project_definition(&mut self, text: impl Into<String>) {
        self.config.project_definition = text.into();
        self.resync();
    }

    /// Set the free-text layout description.
    pub fn set_ia_prompt(&mut self, text: impl Into<String>) {
        self.config.ia_prompt = text.into();
        self.resync();
    }

    /// Seed the layout description from a preset template.
    pub fn apply_layout(&mut self, kind: LayoutKind) {
        self.set_ia_prompt(kind.template());
    }

    /// Toggle a catalog module. Returns true if now selected.
    pub fn toggle_module(&mut self, id: &str) -> bool {
        let selected = self.config.toggle_module(id);
        self.resync();
        selected
    }

    /// Add a user-authored entry, returning its generated id.
    ///
    /// Entries with blank content are refused (returns `None`), matching
    /// the editing surface this engine backs.
    pub fn add_entry(
        &mut self,
        kind: EntryKind,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<String> {
        let content = content.into();
        if content.trim().is_empty() {
            return None;
        }
        self.next_entry_id += 1;
        let id = format!("entry-{}", self.next_entry_id);
        self.config
            .push_entry(CustomEntry::new(id.clone(), kind, title, content));
        self.resync();
        Some(id)
    }

    /// Remove an entry by id. Returns true if something was removed.
    pub fn remove_entry(&mut self, id: &str) -> bool {
        let removed = self.config.remove_entry(id);
        if removed {
            self.resync();
        }
        removed
    }

    /// Recompile and apply under the dirty guard.
    fn resync(&mut self) {
        let compiled = compile(&self.catalog, &self.config);
        let replaced = self.draft.sync(compiled);
        tracing::debug!(replaced, "structural sync");
    }

    // ========================================================================
    // Document editing and refinement
    // ========================================================================

    /// Apply a direct text edit. Sets the dirty flag and makes any
    /// in-flight refinement pass stale: the edit wins.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.draft.edit(text.into());
        self.refiner.note_edit();
    }

    /// Reset the document to the compiled template: unconditional
    /// recompile, dirty cleared, baseline discarded, flow back to idle.
    pub fn reset_to_template(&mut self) {
        let compiled = compile(&self.catalog, &self.config);
        self.draft.force_reset(compiled);
        self.refiner.reset();
    }

    /// Run a full refinement pass against a backend, blocking.
    ///
    /// See [`Refiner::optimize`] for failure semantics.
    pub fn optimize<B: Backend>(&mut self, backend: &B) -> Result<OptimizeReport> {
        self.refiner.optimize(
            backend,
            &mut self.draft,
            &mut self.suggestions,
            &self.profile,
        )
    }

    /// Return the document to its pre-refinement baseline.
    pub fn restore_original(&mut self) {
        self.refiner.restore(&mut self.draft, &mut self.suggestions);
    }

    /// Start a refinement pass without blocking on a backend.
    ///
    /// For event-driven hosts that make the backend calls themselves and
    /// deliver outcomes with [`Session::deliver_refined`] and
    /// [`Session::deliver_critique`].
    pub fn begin_optimize(&mut self) -> Result<Ticket> {
        self.refiner.begin(&mut self.draft)
    }

    /// Deliver a refine outcome for a pass started with
    /// [`Session::begin_optimize`]. Stale outcomes are discarded.
    pub fn deliver_refined(
        &mut self,
        ticket: Ticket,
        outcome: Result<String>,
    ) -> Result<Completion> {
        self.refiner
            .complete_refine(ticket, &mut self.draft, &mut self.suggestions, outcome)
    }

    /// Deliver a critique outcome for a pass whose refine was applied.
    pub fn deliver_critique(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Suggestion>>,
    ) -> CritiqueOutcome {
        self.refiner
            .complete_critique(ticket, &mut self.suggestions, outcome)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Restore persisted state written by an earlier session.
    ///
    /// The config blob is recompiled into a clean draft; a stored draft
    /// text that differs from that recompilation is restored as a dirty
    /// edit — the user's last visible text wins.
    pub fn hydrate(&mut self, kv: &impl KvStore) -> Result<()> {
        if let Some(blob) = kv.get(CONFIG_KEY)? {
            self.config = serde_json::from_str(&blob)
                .map_err(|e| Error::persistence(format!("stored config is invalid: {e}")))?;
            self.next_entry_id = highest_entry_id(&self.config);
            self.draft = Draft::from_compiled(compile(&self.catalog, &self.config));
        }
        if let Some(text) = kv.get(DRAFT_KEY)? {
            if text != self.draft.current_text() {
                self.draft.edit(text);
                self.refiner.note_edit();
            }
        }
        Ok(())
    }

    /// Persist the config and draft text now.
    pub fn persist(&mut self, kv: &mut impl KvStore) -> Result<()> {
        let blob = serde_json::to_string(&self.config)
            .map_err(|e| Error::persistence(format!("config cannot be serialized: {e}")))?;
        kv.put(CONFIG_KEY, &blob)?;
        kv.put(DRAFT_KEY, self.draft.current_text())?;
        self.last_saved = self.clock.now();
        tracing::debug!("session persisted");
        Ok(())
    }

    /// Persist if the autosave interval has elapsed since the last save.
    ///
    /// Returns true when a save happened. This only writes; it never
    /// recompiles or touches the document, so it cannot race a refinement.
    pub fn autosave(&mut self, kv: &mut impl KvStore) -> Result<bool> {
        let elapsed = self.clock.now().duration_since(self.last_saved);
        if elapsed < self.autosave_interval {
            return Ok(false);
        }
        self.persist(kv)?;
        Ok(true)
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    /// Save the current document to a remote store under a name.
    pub fn save_to_store<S: PromptStore>(&self, store: &mut S, name: &str) -> Result<i64> {
        let id = store.save(name, self.draft.current_text())?;
        tracing::info!(id, name, "prompt saved to store");
        Ok(id)
    }

    /// Load a stored document into the session as a dirty edit.
    ///
    /// Returns the stored name.
    pub fn load_from_store<S: PromptStore>(&mut self, store: &S, id: i64) -> Result<String> {
        let saved = store.get_by_id(id)?;
        self.edit_text(saved.content);
        Ok(saved.name)
    }

    /// Render the document through a host renderer, degrading failures to
    /// an inline notice.
    pub fn preview<R: MarkdownRenderer>(&self, renderer: &R) -> String {
        preview_or_notice(renderer, self.draft.current_text())
    }
}

/// Highest numeric suffix among session-generated entry ids, so a hydrated
/// session keeps generating collision-free ids.
fn highest_entry_id(config: &PromptConfig) -> u64 {
    config
        .custom_entries
        .iter()
        .filter_map(|e| e.id.strip_prefix("entry-"))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}
