// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Error types for Jangin

use thiserror::Error;

/// Result type alias for Jangin operations
pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the Jangin library
#[derive(Error, Debug)]
pub enum Error {
    /// AI backend failure (connectivity, provider rejection, missing payload)
    #[error("Backend error: {0}")]
    Backend(String),

    /// Malformed structured response from an AI backend.
    ///
    /// This is the backend sub-kind for data that arrived but does not
    /// validate as the required shape. Callers decide whether to degrade
    /// to an empty suggestion list.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Remote prompt store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Local key-value persistence failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Markdown rendering failure (non-fatal for callers that preview)
    #[error("Render error: {0}")]
    Render(String),

    /// A refinement pass is already in flight for this session
    #[error("A refinement pass is already in flight")]
    Busy,
}

impl Error {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a render error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    // =========================================================================
    // Error Classification Methods
    // =========================================================================

    /// Check if this error came from an AI backend (transport or payload).
    ///
    /// Both [`Error::Backend`] and [`Error::Parse`] qualify: a parse
    /// failure is a backend response that could not be validated.
    #[inline]
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Parse(_))
    }

    /// Check if this is specifically a malformed-response error.
    #[inline]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this is a remote store error.
    #[inline]
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Check whether re-invoking the failed operation can succeed without
    /// code changes (everything here is terminal-per-invocation but
    /// user-retryable, except a busy rejection which resolves on its own).
    #[inline]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Busy)
    }

    /// Get the error category for logging/metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Backend(_) => "backend",
            Self::Parse(_) => "parse",
            Self::Store(_) => "store",
            Self::Persistence(_) => "persistence",
            Self::Render(_) => "render",
            Self::Busy => "busy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_backend() {
        let err = Error::backend("connection refused");
        assert!(matches!(err, Error::Backend(_)));
        assert_eq!(err.to_string(), "Backend error: connection refused");
    }

    #[test]
    fn test_error_parse_is_backend_subkind() {
        let err = Error::parse("missing field `reason`");
        assert!(err.is_backend_error());
        assert!(err.is_parse_error());
        assert_eq!(err.category(), "parse");
    }

    #[test]
    fn test_error_store() {
        let err = Error::store("503 Service Unavailable");
        assert!(err.is_store_error());
        assert!(!err.is_backend_error());
        assert_eq!(err.to_string(), "Store error: 503 Service Unavailable");
    }

    #[test]
    fn test_error_category() {
        assert_eq!(Error::backend("x").category(), "backend");
        assert_eq!(Error::parse("x").category(), "parse");
        assert_eq!(Error::store("x").category(), "store");
        assert_eq!(Error::persistence("x").category(), "persistence");
        assert_eq!(Error::render("x").category(), "render");
        assert_eq!(Error::Busy.category(), "busy");
    }

    #[test]
    fn test_busy_not_retryable() {
        assert!(!Error::Busy.is_retryable());
        assert!(Error::backend("x").is_retryable());
    }

    #[test]
    fn test_result_type() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(Error::Busy);
        assert!(err.is_err());
    }
}
