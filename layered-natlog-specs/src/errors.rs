//! Error types for the fixture harness.
//!
//! This module defines error types for parsing, fixture loading,
//! and assertion failures.

use layered_natlog::{ConfigError, StructuralError};
use thiserror::Error;

/// Errors that can occur during fixture processing.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Error parsing a fixture file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error loading a fixture file.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A fixture tree could not be read or indexed.
    #[error("case {case}: {source}")]
    Tree {
        case: usize,
        #[source]
        source: StructuralError,
    },

    /// The operator catalog or engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Assertion failure when comparing markings.
    #[error("assertion failed: {message}")]
    Assertion { message: String },
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_error_names_case() {
        let err = SpecError::Tree {
            case: 3,
            source: StructuralError::MissingRoot,
        };
        assert!(err.to_string().starts_with("case 3: "));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let inner = ConfigError::UnsupportedArity {
            name: "most".to_string(),
            arity: 3,
        };
        let err: SpecError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }
}
