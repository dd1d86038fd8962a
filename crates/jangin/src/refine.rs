// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Refinement flow coordination.
//!
//! [`Refiner`] drives a draft through the `Idle → Refining → (Refined |
//! Failed)` lifecycle. One pass may be in flight at a time; a second start
//! is rejected with a busy error. Every pass carries a [`Ticket`], and a
//! generation counter invalidates tickets when the user edits, restores,
//! or resets mid-flight: a late backend response with a stale ticket is
//! discarded instead of clobbering newer text.
//!
//! Event-driven hosts use the split API ([`Refiner::begin`],
//! [`Refiner::complete_refine`], [`Refiner::complete_critique`]); the
//! blocking [`Refiner::optimize`] composes all three around a [`Backend`].

use crate::backend::Backend;
use crate::draft::Draft;
use crate::error::{Error, Result};
use crate::profile::InstructionProfile;
use crate::suggestion::{Suggestion, SuggestionSet};

/// Lifecycle phase of the refinement flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pass has run since the last restore or reset.
    Idle,
    /// A pass is in flight (awaiting refine or critique delivery).
    Refining,
    /// The last pass applied refined text (critique may have degraded).
    Refined,
    /// The last pass failed before any text was applied.
    Failed,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

/// Handle identifying one refinement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Whether a delivered outcome was applied or discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome was applied to the session state.
    Applied,
    /// The outcome arrived after an edit, restore, or reset and was dropped.
    Discarded,
}

/// Result of delivering a critique outcome.
#[derive(Debug)]
pub enum CritiqueOutcome {
    /// Suggestions were stored; carries the count.
    Stored(usize),
    /// Critique failed; the suggestion set stays empty and the refined
    /// text is kept. Carries the backend error for reporting.
    Degraded(Error),
    /// The delivery was stale and dropped.
    Discarded,
}

/// Report returned by a completed (non-failed) optimize call.
#[derive(Debug, Default)]
pub struct OptimizeReport {
    /// Number of suggestions stored by the critique step.
    pub stored_suggestions: usize,
    /// Present when critique failed and the pass degraded to an empty set.
    pub critique_error: Option<Error>,
}

/// Coordinates the draft, a backend, and the suggestion set across a
/// refinement pass.
#[derive(Debug, Default)]
pub struct Refiner {
    phase: Phase,
    generation: u64,
    /// Generation of the in-flight pass, if any.
    active: Option<u64>,
}

impl Refiner {
    /// Create an idle refiner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a pass is currently in flight.
    pub fn is_refining(&self) -> bool {
        self.active.is_some()
    }

    /// Start a refinement pass.
    ///
    /// Captures the draft baseline (first capture wins) and enters
    /// `Refining`. Fails with [`Error::Busy`] while another pass is in
    /// flight.
    pub fn begin(&mut self, draft: &mut Draft) -> Result<Ticket> {
        if self.active.is_some() {
            return Err(Error::Busy);
        }
        self.generation += 1;
        self.active = Some(self.generation);
        draft.begin_refinement();
        self.phase = Phase::Refining;
        tracing::debug!(generation = self.generation, "refinement pass started");
        Ok(Ticket {
            generation: self.generation,
        })
    }

    /// Note a direct user edit. Any in-flight pass becomes stale; the
    /// edit wins over its late response.
    pub fn note_edit(&mut self) {
        self.generation += 1;
    }

    /// Abandon any pass and return to `Idle` (used by template resets).
    pub fn reset(&mut self) {
        self.generation += 1;
        self.active = None;
        self.phase = Phase::Idle;
    }

    fn ticket_is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    fn ticket_is_active(&self, ticket: Ticket) -> bool {
        self.active == Some(ticket.generation)
    }

    /// Deliver the refine outcome for a pass.
    ///
    /// On success the refined text is applied (dirty set) and the
    /// suggestion set is cleared for the critique step; the pass stays in
    /// flight. On failure the flow transitions to `Failed` with the draft
    /// untouched, and the error is surfaced once. A stale ticket discards
    /// the outcome entirely.
    pub fn complete_refine(
        &mut self,
        ticket: Ticket,
        draft: &mut Draft,
        suggestions: &mut SuggestionSet,
        outcome: Result<String>,
    ) -> Result<Completion> {
        if !self.ticket_is_active(ticket) {
            return Ok(Completion::Discarded);
        }
        if !self.ticket_is_current(ticket) {
            // The user edited, restored, or reset since this pass began.
            self.active = None;
            if self.phase == Phase::Refining {
                self.phase = Phase::Idle;
            }
            tracing::debug!(generation = ticket.generation, "stale refine outcome discarded");
            return Ok(Completion::Discarded);
        }
        match outcome {
            Ok(text) => {
                draft.apply_refined(text);
                suggestions.clear();
                Ok(Completion::Applied)
            }
            Err(e) => {
                self.active = None;
                self.phase = Phase::Failed;
                tracing::debug!(error = %e, "refine failed");
                Err(e)
            }
        }
    }

    /// Deliver the critique outcome for a pass whose refine was applied.
    ///
    /// The pass ends here either way: the phase becomes `Refined` because
    /// the refined text is already in place. Suggestions are stored only
    /// for a current ticket with a valid outcome; a failure degrades to an
    /// empty set without rolling anything back.
    pub fn complete_critique(
        &mut self,
        ticket: Ticket,
        suggestions: &mut SuggestionSet,
        outcome: Result<Vec<Suggestion>>,
    ) -> CritiqueOutcome {
        if !self.ticket_is_active(ticket) {
            return CritiqueOutcome::Discarded;
        }
        self.active = None;
        self.phase = Phase::Refined;
        if !self.ticket_is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "stale critique outcome discarded");
            return CritiqueOutcome::Discarded;
        }
        match outcome {
            Ok(items) => {
                let count = items.len();
                suggestions.replace(items);
                tracing::debug!(count, "critique stored");
                CritiqueOutcome::Stored(count)
            }
            Err(e) => {
                tracing::debug!(error = %e, "critique degraded to empty set");
                CritiqueOutcome::Degraded(e)
            }
        }
    }

    /// Run a full pass against a backend, blocking until done.
    ///
    /// Refine failure is returned as the error with phase `Failed`;
    /// critique failure is reported in the [`OptimizeReport`] with phase
    /// `Refined`. No automatic retry: invoking again restarts from the
    /// current text (the baseline is only captured once per episode).
    pub fn optimize<B: Backend>(
        &mut self,
        backend: &B,
        draft: &mut Draft,
        suggestions: &mut SuggestionSet,
        profile: &InstructionProfile,
    ) -> Result<OptimizeReport> {
        let _span = tracing::info_span!("optimize", backend = backend.name()).entered();
        let ticket = self.begin(draft)?;

        let refined = backend.refine(draft.current_text(), profile);
        if self.complete_refine(ticket, draft, suggestions, refined)? == Completion::Discarded {
            return Ok(OptimizeReport::default());
        }

        let critique = backend.critique(draft.current_text(), profile);
        match self.complete_critique(ticket, suggestions, critique) {
            CritiqueOutcome::Stored(count) => {
                tracing::info!(suggestions = count, "optimize complete");
                Ok(OptimizeReport {
                    stored_suggestions: count,
                    critique_error: None,
                })
            }
            CritiqueOutcome::Degraded(e) => {
                tracing::info!(error = %e, "optimize complete without suggestions");
                Ok(OptimizeReport {
                    stored_suggestions: 0,
                    critique_error: Some(e),
                })
            }
            CritiqueOutcome::Discarded => Ok(OptimizeReport::default()),
        }
    }

    /// Restore the pre-refinement baseline.
    ///
    /// Valid from any phase. When a baseline exists the draft returns to
    /// it and the suggestion set is cleared; otherwise this is a no-op on
    /// the document. Either way the flow returns to `Idle` and any
    /// in-flight pass becomes stale.
    pub fn restore(&mut self, draft: &mut Draft, suggestions: &mut SuggestionSet) {
        if draft.restore() {
            suggestions.clear();
        }
        self.generation += 1;
        self.active = None;
        self.phase = Phase::Idle;
        tracing::debug!("restored pre-refinement baseline");
    }
}
