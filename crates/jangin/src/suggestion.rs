// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Structured improvement suggestions.
//!
//! A critique pass returns an ordered list of [`Suggestion`]s. Backend
//! responses are untrusted input: [`parse_suggestions`] validates them
//! against the exact required shape and fails on anything else — no
//! best-effort partial extraction beyond the single documented
//! [`extract_payload`] fallback for fenced or prose-wrapped JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One structured improvement note from a critique pass.
///
/// All fields are free text; ordering is the relevance order returned by
/// the backend and is preserved as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Short classification label.
    pub category: String,
    /// The proposed improvement.
    pub improvement: String,
    /// Why the improvement matters.
    pub reason: String,
}

/// The ordered suggestion list attached to the most recent critique.
#[derive(Debug, Clone, Default)]
pub struct SuggestionSet {
    items: SmallVec<[Suggestion; 4]>,
}

impl SuggestionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fresh critique result.
    pub fn replace(&mut self, items: Vec<Suggestion>) {
        self.items = items.into();
    }

    /// Drop all suggestions.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The suggestions, in backend relevance order.
    pub fn as_slice(&self) -> &[Suggestion] {
        &self.items
    }

    /// Number of suggestions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Extract the JSON payload from backend text, handling markdown fences.
///
/// If the text contains a ```json fence, the fenced content is used.
/// Otherwise the slice from the first `[` to the last `]` is taken, since
/// chat-tuned models routinely wrap the array in prose. Falls back to the
/// trimmed input when neither applies; validation then rejects it.
pub fn extract_payload(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        let content_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            return content[..end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Parse a critique response into suggestions, strictly.
///
/// The response must validate as a JSON array whose elements all carry
/// `category`, `improvement`, and `reason`. Any element missing a field
/// fails the whole call with [`Error::Parse`] — callers decide whether to
/// degrade to an empty list.
pub fn parse_suggestions(text: &str) -> Result<Vec<Suggestion>> {
    let payload = extract_payload(text);
    serde_json::from_str::<Vec<Suggestion>>(payload)
        .map_err(|e| Error::parse(format!("critique response is not a suggestion array: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
        {"category": "structure", "improvement": "Split the auth module", "reason": "Too broad"},
        {"category": "performance", "improvement": "Memoize the preview", "reason": "Recomputed per keystroke"}
    ]"#;

    #[test]
    fn test_parse_valid_array() {
        let suggestions = parse_suggestions(VALID).unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].category, "structure");
        assert_eq!(suggestions[1].improvement, "Memoize the preview");
    }

    #[test]
    fn test_order_preserved() {
        let suggestions = parse_suggestions(VALID).unwrap();
        assert_eq!(suggestions[0].reason, "Too broad");
        assert_eq!(suggestions[1].reason, "Recomputed per keystroke");
    }

    #[test]
    fn test_parse_fenced_payload() {
        let text = format!("Here is my review:\n```json\n{VALID}\n```\nHope it helps!");
        let suggestions = parse_suggestions(&text).unwrap();
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_parse_prose_wrapped_array() {
        let text = format!("Sure! {VALID} Let me know if you need more.");
        let suggestions = parse_suggestions(&text).unwrap();
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_not_json_is_parse_error() {
        let err = parse_suggestions("not json").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_missing_field_rejects_whole_response() {
        let text = r#"[
            {"category": "a", "improvement": "b", "reason": "c"},
            {"category": "a", "improvement": "b"}
        ]"#;
        let err = parse_suggestions(text).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_object_instead_of_array_rejected() {
        let err =
            parse_suggestions(r#"{"category": "a", "improvement": "b", "reason": "c"}"#)
                .unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_suggestions("[]").unwrap().is_empty());
    }

    #[test]
    fn test_suggestion_set_replace_and_clear() {
        let mut set = SuggestionSet::new();
        set.replace(parse_suggestions(VALID).unwrap());
        assert_eq!(set.len(), 2);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_extract_payload_plain_passthrough() {
        assert_eq!(extract_payload("  [1, 2]  "), "[1, 2]");
        assert_eq!(extract_payload("no array here"), "no array here");
    }
}
