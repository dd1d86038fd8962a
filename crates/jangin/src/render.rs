// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Markdown rendering collaborator.
//!
//! The engine never generates display markup itself; a host supplies a
//! [`MarkdownRenderer`] and the session degrades rendering failures to an
//! inline notice instead of propagating them — a broken preview must not
//! take the editor down with it.

use crate::error::Result;

/// External renderer turning document text into safe-to-display markup.
pub trait MarkdownRenderer {
    /// Render the document. Output format is the host's concern.
    fn render(&self, text: &str) -> Result<String>;
}

/// Render with non-fatal degradation: failures become an inline notice.
pub fn preview_or_notice<R: MarkdownRenderer>(renderer: &R, text: &str) -> String {
    match renderer.render(text) {
        Ok(markup) => markup,
        Err(e) => format!("Preview unavailable: {e}"),
    }
}
