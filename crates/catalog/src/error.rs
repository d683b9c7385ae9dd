//! Error types for catalog loading.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a catalog document.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid catalog JSON.
    #[error("invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but its contents are inconsistent.
    #[error("catalog integrity violation: {message}")]
    Integrity { message: String },
}

impl CatalogError {
    /// Shorthand for a [`CatalogError::Integrity`] with the given message.
    pub fn integrity(message: impl Into<String>) -> Self {
        CatalogError::Integrity {
            message: message.into(),
        }
    }
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = CatalogError::Io {
            path: PathBuf::from("/data/mibig.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read catalog /data/mibig.json: not found"
        );
    }

    #[test]
    fn test_integrity_display() {
        let err = CatalogError::integrity("duplicate entry id 7");
        assert_eq!(
            err.to_string(),
            "catalog integrity violation: duplicate entry id 7"
        );
    }
}
