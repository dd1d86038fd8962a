// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! HTTP providers and remote store for the Jangin engine.
//!
//! Two provider variants — [`Gemini`] (primary) and [`Qwen`] (secondary)
//! — implement the engine's `Backend` trait over blocking HTTP, and the
//! closed [`Provider`] enum makes either selectable by a configuration
//! value without changing caller code. [`SupabaseStore`] implements the
//! engine's `PromptStore` contract over PostgREST.
//!
//! # Examples
//!
//! ```no_run
//! use jangin::catalog::Catalog;
//! use jangin::session::Session;
//! use jangin_client::{Provider, ProviderKind};
//!
//! let backend = Provider::new(ProviderKind::Qwen, "sk-...");
//! let mut session = Session::new(Catalog::builtin());
//! session.set_project_definition("A travel planner");
//! session.optimize(&backend).unwrap();
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod qwen;
pub mod store;

pub use gemini::{Gemini, DEFAULT_GEMINI_MODEL};
pub use qwen::{Qwen, DEFAULT_QWEN_MODEL};
pub use store::SupabaseStore;

use jangin::backend::Backend;
use jangin::error::Result;
use jangin::profile::InstructionProfile;
use jangin::suggestion::Suggestion;
use serde::{Deserialize, Serialize};

/// Selection value naming a provider variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Gemini generateContent API.
    Gemini,
    /// Qwen OpenAI-compatible chat completions.
    Qwen,
}

/// The closed set of provider variants behind one backend interface.
pub enum Provider {
    /// Gemini variant.
    Gemini(Gemini),
    /// Qwen variant.
    Qwen(Qwen),
}

impl Provider {
    /// Construct the variant named by a configuration value.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        match kind {
            ProviderKind::Gemini => Self::Gemini(Gemini::new(api_key)),
            ProviderKind::Qwen => Self::Qwen(Qwen::new(api_key)),
        }
    }

    /// Which variant this is.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Gemini(_) => ProviderKind::Gemini,
            Self::Qwen(_) => ProviderKind::Qwen,
        }
    }
}

impl From<Gemini> for Provider {
    fn from(backend: Gemini) -> Self {
        Self::Gemini(backend)
    }
}

impl From<Qwen> for Provider {
    fn from(backend: Qwen) -> Self {
        Self::Qwen(backend)
    }
}

impl Backend for Provider {
    fn refine(&self, text: &str, profile: &InstructionProfile) -> Result<String> {
        match self {
            Self::Gemini(backend) => backend.refine(text, profile),
            Self::Qwen(backend) => backend.refine(text, profile),
        }
    }

    fn critique(&self, text: &str, profile: &InstructionProfile) -> Result<Vec<Suggestion>> {
        match self {
            Self::Gemini(backend) => backend.critique(text, profile),
            Self::Qwen(backend) => backend.critique(text, profile),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Gemini(backend) => backend.name(),
            Self::Qwen(backend) => backend.name(),
        }
    }
}
