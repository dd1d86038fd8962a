// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Backend abstraction for AI providers.
//!
//! A [`Backend`] turns prompt text into refined text or an ordered list of
//! structured suggestions. Concrete providers live in the client crate;
//! this module defines the capability interface plus closure-driven test
//! doubles, so refinement logic can be exercised without network access.
//!
//! # Examples
//!
//! ```
//! use jangin::backend::{Backend, MockBackend};
//! use jangin::profile::InstructionProfile;
//!
//! let backend = MockBackend::new(|text, _| format!("Refined: {text}"));
//! let profile = InstructionProfile::new();
//! let out = backend.refine("draft", &profile).unwrap();
//! assert_eq!(out, "Refined: draft");
//! ```

use crate::error::{Error, Result};
use crate::profile::InstructionProfile;
use crate::suggestion::Suggestion;

/// Capability interface every AI provider variant satisfies.
///
/// Both operations run to completion (the engine suspends only inside the
/// provider call) and fail with a backend or parse error; callers never
/// see partially parsed data.
pub trait Backend {
    /// Rewrite the document per the profile's refine instruction.
    fn refine(&self, text: &str, profile: &InstructionProfile) -> Result<String>;

    /// Review the document and return ordered structured suggestions.
    ///
    /// A response that does not validate as the required array shape must
    /// fail with [`Error::Parse`] rather than return partial data.
    fn critique(&self, text: &str, profile: &InstructionProfile) -> Result<Vec<Suggestion>>;

    /// Provider name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// A closure-driven backend for tests and examples.
///
/// The refine closure receives the document and profile; critique returns
/// a fixed suggestion list (empty by default) or a configured error.
pub struct MockBackend<F>
where
    F: Fn(&str, &InstructionProfile) -> String,
{
    refine_fn: F,
    suggestions: Vec<Suggestion>,
    critique_error: Option<String>,
    name: &'static str,
}

impl<F> MockBackend<F>
where
    F: Fn(&str, &InstructionProfile) -> String,
{
    /// Create a mock backend with the given refine closure.
    pub fn new(refine_fn: F) -> Self {
        Self {
            refine_fn,
            suggestions: Vec::new(),
            critique_error: None,
            name: "mock",
        }
    }

    /// Set the suggestions critique will return.
    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Make critique fail with a parse error.
    pub fn with_failing_critique(mut self, message: impl Into<String>) -> Self {
        self.critique_error = Some(message.into());
        self
    }

    /// Set a custom provider name.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl<F> Backend for MockBackend<F>
where
    F: Fn(&str, &InstructionProfile) -> String,
{
    fn refine(&self, text: &str, profile: &InstructionProfile) -> Result<String> {
        Ok((self.refine_fn)(text, profile))
    }

    fn critique(&self, _text: &str, _profile: &InstructionProfile) -> Result<Vec<Suggestion>> {
        match &self.critique_error {
            Some(msg) => Err(Error::parse(msg.clone())),
            None => Ok(self.suggestions.clone()),
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// A backend whose operations always fail with a backend error.
///
/// Useful for exercising failure paths in the refinement flow.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    message: String,
}

impl FailingBackend {
    /// Create a failing backend with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Backend for FailingBackend {
    fn refine(&self, _text: &str, _profile: &InstructionProfile) -> Result<String> {
        Err(Error::backend(self.message.clone()))
    }

    fn critique(&self, _text: &str, _profile: &InstructionProfile) -> Result<Vec<Suggestion>> {
        Err(Error::backend(self.message.clone()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
