//! Error types for the query engine.
//!
//! Parsing, decoding, category resolution and evaluation all report through
//! [`QueryError`]. Failures raised by an [`EntryStore`](crate::store::EntryStore)
//! implementation travel inside it as [`StoreError`] and are never retried or
//! rewritten by the engine.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for query operations.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The query string or its structured form could not be understood.
    #[error("malformed query: {message}")]
    MalformedQuery { message: String },

    /// None of the candidate categories matched a term with unknown category.
    #[error("invalid search category: no category matches '{term}'")]
    InvalidCategory { term: String },

    /// An operator name that is not AND, OR or EXCEPT.
    #[error("invalid operation: {operation}")]
    InvalidOperation { operation: String },

    /// Error raised by the backing store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    /// Shorthand for a [`QueryError::MalformedQuery`] with the given message.
    pub fn malformed(message: impl Into<String>) -> Self {
        QueryError::MalformedQuery {
            message: message.into(),
        }
    }

    /// Returns true if the error was caused by the client's input rather than
    /// by the backing store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QueryError::Store(_))
    }
}

/// Errors originating from an entry store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not answer the request.
    #[error("store backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The category has no suggestion lookup defined.
    #[error("invalid search category: {category}")]
    InvalidCategory { category: String },
}

impl StoreError {
    /// Creates a backend error without an underlying source.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
            source: None,
        }
    }
}

/// Result type alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::MalformedQuery {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = QueryError::malformed("unexpected end of expression");
        assert_eq!(
            err.to_string(),
            "malformed query: unexpected end of expression"
        );
    }

    #[test]
    fn test_invalid_category_display() {
        let err = QueryError::InvalidCategory {
            term: "foo".to_string(),
        };
        assert!(err.to_string().contains("'foo'"));
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: QueryError = StoreError::backend("connection refused").into();
        assert_eq!(err.to_string(), "store backend error: connection refused");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(QueryError::malformed("x").is_client_error());
        assert!(
            QueryError::InvalidOperation {
                operation: "xor".to_string()
            }
            .is_client_error()
        );
    }
}
