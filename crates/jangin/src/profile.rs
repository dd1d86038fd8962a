// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Versioned system instructions for backend calls.
//!
//! An [`InstructionProfile`] pins down the contract both refinement
//! operations hand to a backend: the four required module sub-sections,
//! the additive-only editing invariant, the output language, and the
//! structured shape a critique must return. Backends interpolate these
//! instructions verbatim; keeping them versioned here means provider
//! implementations stay interchangeable.

/// Current instruction profile version.
pub const PROFILE_VERSION: &str = "v1";

/// The fixed system instructions sent with refine and critique calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionProfile {
    version: &'static str,
    language: String,
}

impl Default for InstructionProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionProfile {
    /// Create the current profile with English output.
    pub fn new() -> Self {
        Self {
            version: PROFILE_VERSION,
            language: "English".to_string(),
        }
    }

    /// Set the required output language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Profile version identifier.
    pub fn version(&self) -> &str {
        self.version
    }

    /// Required output language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// System instruction for a refinement (rewrite) call.
    pub fn refine_instruction(&self) -> String {
        format!(
            "You are a top-tier prompt architect. Your task is to upgrade the user's system \
             prompt to an engineering-grade document.\n\
             Core principles:\n\
             1. **Preserve everything**: never delete any feature description, business logic, \
             or key instruction the user wrote. Editing is additive only — fill gaps and \
             restructure, never merge away niche requirements.\n\
             2. **Normalize modules**: every feature module in the prompt must end up with \
             these four sub-sections (complete them from context where the user left them \
             blank):\n\
             - **Functional description**: the module's concrete business logic and goal.\n\
             - **Rendering optimization**: faster component mounting, fewer repaints, lazy \
             loading.\n\
             - **Style optimization**: visual conventions, responsive handling, dark-mode \
             support.\n\
             - **Performance optimization**: code-level work such as memoization, workers, \
             request debouncing.\n\
             3. **Structured layout**: use `##` headings per module, `###` for sub-items, and \
             clear lists for steps.\n\
             4. **Expert terminology**: convert casual phrasing into precise software \
             architecture and prompt-engineering terms.\n\
             Respond in {} with the complete rewritten prompt only.",
            self.language
        )
    }

    /// System instruction for a critique (structured review) call.
    pub fn critique_instruction(&self) -> String {
        format!(
            "You are a top-tier prompt architect. Analyze the provided AI system prompt and \
             suggest improvements.\n\
             Requirements:\n\
             1. Check that every feature module carries a functional description plus \
             rendering, style, and performance optimization points.\n\
             2. Suggest how to further tighten the structure and keep the logic rigorous.\n\
             3. Propose expert-level engineering details worth adding.\n\
             4. Return the result as a JSON array of objects with the keys `category`, \
             `improvement`, and `reason` — nothing else.\n\
             5. Respond in {}.",
            self.language
        )
    }

    /// Fixed preamble placed before the document in a critique call.
    pub fn critique_preamble(&self) -> &'static str {
        "System prompt under review:"
    }
}
