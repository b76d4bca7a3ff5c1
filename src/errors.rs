//! Error types for catalog construction and tree indexing.
//!
//! Two families of failure exist. A [`ConfigError`] is raised once, while an
//! operator catalog or engine configuration is being built, and never during
//! projection. A [`StructuralError`] is raised for a single input tree whose
//! token coverage is broken; it does not affect any shared state, so callers
//! can log it and move on to the next sentence.

use crate::Span;
use thiserror::Error;

/// Errors raised while building an operator catalog or loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The declared arity disagrees with the presence of second-argument fields.
    #[error("operator `{name}` declares arity {arity} but {detail}")]
    ArityMismatch {
        name: String,
        arity: u8,
        detail: String,
    },

    /// Only unary and binary operators exist.
    #[error("operator `{name}` has unsupported arity {arity} (expected 1 or 2)")]
    UnsupportedArity { name: String, arity: u8 },

    /// A tag or label pattern failed to compile.
    #[error("operator `{name}`: invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        name: String,
        pattern: String,
        message: String,
    },

    /// A configuration file could not be read.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// A configuration document could not be deserialized.
    #[error("failed to parse {source_name}: {message}")]
    Deserialize {
        source_name: String,
        message: String,
    },
}

/// Errors raised when a tree violates the span coverage invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The root does not span every token of the sentence.
    #[error("incomplete span coverage: root spans {found}, expected [0, {expected})")]
    IncompleteCoverage { found: Span, expected: usize },

    /// A leaf points at a token that does not exist.
    #[error("leaf node {node} refers to token {token}, outside [0, {len})")]
    TokenOutOfRange { node: usize, token: usize, len: usize },

    /// Two leaves claim the same token.
    #[error("token {token} is claimed by more than one leaf")]
    DuplicateToken { token: usize },

    /// An internal node with neither children nor a token has no span.
    #[error("node {node} has no children and no token")]
    EmptyConstituent { node: usize },

    /// A node cannot be reached from the root.
    #[error("node {node} is not reachable from the root")]
    Detached { node: usize },

    /// A node is its own ancestor.
    #[error("tree contains a cycle through node {node}")]
    Cycle { node: usize },

    /// A dependency tree has more than one token without a governor.
    #[error("tokens {first} and {second} both lack a governor")]
    MultipleRoots { first: usize, second: usize },

    /// A dependency tree has no token without a governor.
    #[error("no token lacks a governor")]
    MissingRoot,

    /// A governor index points past the end of the sentence.
    #[error("token {token} is governed by {governor}, outside [0, {len})")]
    GovernorOutOfRange {
        token: usize,
        governor: usize,
        len: usize,
    },

    /// Malformed bracketed or tabular tree text.
    #[error("malformed tree text at {position}: {message}")]
    Syntax { position: usize, message: String },
}

/// Any error surfaced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NatlogError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Result type for fallible natlog operations.
pub type NatlogResult<T> = Result<T, NatlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_coverage_message() {
        let err = StructuralError::IncompleteCoverage {
            found: Span::new(0, 3),
            expected: 4,
        };
        assert!(err.to_string().starts_with("incomplete span coverage"));
        assert!(err.to_string().contains("[0, 3)"));
    }

    #[test]
    fn test_arity_mismatch_message() {
        let err = ConfigError::ArityMismatch {
            name: "all".to_string(),
            arity: 2,
            detail: "has no second projection".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operator `all` declares arity 2 but has no second projection"
        );
    }

    #[test]
    fn test_wrapping_into_natlog_error() {
        let err: NatlogError = StructuralError::MissingRoot.into();
        assert!(matches!(err, NatlogError::Structural(StructuralError::MissingRoot)));

        let err: NatlogError = ConfigError::UnsupportedArity {
            name: "x".to_string(),
            arity: 3,
        }
        .into();
        assert!(matches!(err, NatlogError::Config(_)));
    }
}
