// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Draft document lifecycle.
//!
//! A [`Draft`] holds the live prompt text, the baseline captured before the
//! first refinement pass, and a dirty flag. The flag gates structural
//! recompilation: once the user (or a refinement) has diverged the text,
//! [`Draft::sync`] becomes a no-op until an explicit [`Draft::force_reset`].
//! That guard is what keeps background recompilation from clobbering
//! in-flight manual or AI edits.

/// Live prompt text plus its pre-refinement baseline and dirty flag.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    current: String,
    /// Pre-refinement baseline; empty means none captured yet.
    baseline: String,
    dirty: bool,
}

impl Draft {
    /// Create a draft from freshly compiled text. Clean, no baseline.
    pub fn from_compiled(text: String) -> Self {
        Self {
            current: text,
            baseline: String::new(),
            dirty: false,
        }
    }

    /// The live document text.
    pub fn current_text(&self) -> &str {
        &self.current
    }

    /// Whether the text has diverged from pure structural recompilation.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The pre-refinement baseline, if one has been captured.
    pub fn baseline(&self) -> Option<&str> {
        if self.baseline.is_empty() {
            None
        } else {
            Some(&self.baseline)
        }
    }

    /// Replace the text with a recompilation, unless dirty.
    ///
    /// Returns true if the text was replaced. Always a no-op while dirty:
    /// edits win over structural recompilation.
    pub fn sync(&mut self, compiled: String) -> bool {
        if self.dirty {
            return false;
        }
        self.current = compiled;
        true
    }

    /// Unconditionally replace the text with a recompilation.
    ///
    /// Clears the dirty flag and discards the baseline: a reset starts a
    /// new editing episode.
    pub fn force_reset(&mut self, compiled: String) {
        self.current = compiled;
        self.baseline.clear();
        self.dirty = false;
    }

    /// Apply a direct user edit. Sets the dirty flag.
    pub fn edit(&mut self, text: String) {
        self.current = text;
        self.dirty = true;
    }

    /// Mark the text as diverged without changing it.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Capture the current text as the restore baseline.
    ///
    /// First capture wins: later refinement passes in the same episode do
    /// not overwrite it, so restore always returns to the pre-AI text.
    pub fn begin_refinement(&mut self) {
        if self.baseline.is_empty() {
            self.baseline = self.current.clone();
        }
    }

    /// Install refined text from a backend. Sets the dirty flag.
    pub fn apply_refined(&mut self, text: String) {
        self.current = text;
        self.dirty = true;
    }

    /// Re-apply the baseline, if one exists. Returns true if applied.
    ///
    /// The baseline is retained, so repeated restores are idempotent; only
    /// [`Draft::force_reset`] discards it. The dirty flag is left as-is:
    /// restored text is still not something recompilation would produce.
    pub fn restore(&mut self) -> bool {
        if self.baseline.is_empty() {
            return false;
        }
        self.current = self.baseline.clone();
        true
    }
}
