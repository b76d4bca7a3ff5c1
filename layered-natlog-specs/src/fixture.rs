//! Core types for parsed `.mono` fixture files.

use layered_natlog::{CompositionPolicy, Monotonicity};
use serde::{Deserialize, Serialize};

/// A parsed `.mono` fixture document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonoFixture {
    /// Optional title from `# Title` header
    pub title: Option<String>,
    /// Cases separated by `---`
    pub cases: Vec<FixtureCase>,
}

/// One sentence and what is expected of its projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case index (0-based)
    pub index: usize,
    /// Bracketed parse, joined across lines
    pub tree: String,
    /// Line the tree starts on
    pub source_line: usize,
    /// Composition policy override from `> policy:`
    pub policy: Option<CompositionPolicy>,
    pub assertions: Vec<Assertion>,
}

/// An assertion about one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertion {
    pub body: AssertionBody,
    /// Source line number for error reporting
    pub source_line: usize,
}

/// What an assertion checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssertionBody {
    /// `marks: all^ catsv have^ tails^`
    Marks(Vec<MarkedWord>),
    /// `scope: { all } [ cats ] [ have tails ]`
    Scope(ScopeExpectation),
    /// `error: structural`
    Error(ExpectedError),
}

/// A word and the marking expected on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedWord {
    pub word: String,
    pub mark: Monotonicity,
}

/// Expected quantifier occurrence, written as the words of each span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeExpectation {
    pub quantifier: String,
    pub subject: String,
    /// `None` for a unary operator
    pub object: Option<String>,
}

/// Failure kinds a case can expect instead of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedError {
    Structural,
}

impl MonoFixture {
    /// Create an empty fixture (for testing/building).
    pub fn empty() -> Self {
        Self {
            title: None,
            cases: Vec::new(),
        }
    }

    /// Total assertions across all cases.
    pub fn assertion_count(&self) -> usize {
        self.cases.iter().map(|c| c.assertions.len()).sum()
    }
}

impl AssertionBody {
    /// Stable key naming this assertion within its case, used by the
    /// expected-failures file.
    pub fn key(&self) -> String {
        match self {
            AssertionBody::Marks(_) => "marks".to_string(),
            AssertionBody::Scope(scope) => format!("scope:{}", scope.quantifier),
            AssertionBody::Error(_) => "error".to_string(),
        }
    }
}

impl std::fmt::Display for MarkedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.word, self.mark.symbol())
    }
}

impl std::fmt::Display for ScopeExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ {} }} [ {} ]", self.quantifier, self.subject)?;
        if let Some(object) = &self.object {
            write!(f, " [ {} ]", object)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for AssertionBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssertionBody::Marks(words) => {
                write!(f, "marks:")?;
                for word in words {
                    write!(f, " {}", word)?;
                }
                Ok(())
            }
            AssertionBody::Scope(scope) => write!(f, "scope: {}", scope),
            AssertionBody::Error(ExpectedError::Structural) => write!(f, "error: structural"),
        }
    }
}
