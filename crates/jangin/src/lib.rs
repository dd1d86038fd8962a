// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! # Jangin - Prompt Synthesis & Refinement Engine
//!
//! Embeddable engine for assembling structured system prompts and running
//! them through an AI refinement lifecycle. A session compiles a
//! structured configuration into a canonical markdown document, tracks
//! divergence between the compiled template and the user's (or the AI's)
//! edits, and coordinates refine/critique passes against interchangeable
//! provider backends — with restore semantics back to the pre-AI baseline.
//!
//! ## Architecture
//!
//! - **Compilation is pure**: `compile()` is total and deterministic;
//!   equal configs always produce byte-identical documents.
//! - **Edits win**: a dirty draft is never overwritten by structural
//!   recompilation, and a late backend response never overwrites a newer
//!   edit (generation-counted tickets).
//! - **Providers are interchangeable**: one `Backend` trait covers
//!   refine and critique; selection is a configuration value.
//! - **Collaborators are injected**: key-value persistence, the remote
//!   prompt store, the markdown renderer, and the clock are all traits.
//!
//! ## Quick Start
//!
//! ```
//! use jangin::backend::MockBackend;
//! use jangin::catalog::Catalog;
//! use jangin::session::Session;
//!
//! let mut session = Session::new(Catalog::builtin());
//! session.set_project_definition("A markdown note-taking app");
//! session.toggle_module("md_io");
//!
//! let backend = MockBackend::new(|text, _| format!("# Upgraded\n\n{text}"));
//! let report = session.optimize(&backend).unwrap();
//! assert_eq!(report.stored_suggestions, 0);
//! assert!(session.is_dirty());
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod catalog;
pub mod clock;
pub mod compile;
pub mod config;
pub mod draft;
pub mod error;
pub mod profile;
pub mod refine;
pub mod render;
pub mod session;
pub mod storage;
pub mod suggestion;

pub use backend::{Backend, FailingBackend, MockBackend};
pub use catalog::{Catalog, FunctionalModule, LayoutKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use compile::compile;
pub use config::{CustomEntry, EntryKind, PromptConfig};
pub use draft::Draft;
pub use error::{Error, Result};
pub use profile::InstructionProfile;
pub use refine::{
    Completion, CritiqueOutcome, OptimizeReport, Phase, Refiner, Ticket,
};
pub use render::MarkdownRenderer;
pub use session::Session;
pub use storage::{KvStore, MemoryKv, MemoryStore, PromptRecord, PromptStore, SavedPrompt};
pub use suggestion::{parse_suggestions, Suggestion, SuggestionSet};
