//! Checking assertions against a projection.

use crate::fixture::{Assertion, MarkedWord, ScopeExpectation};
use layered_natlog::{Projection, Span};

/// Result of a single assertion check.
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Index of the case within its fixture
    pub case: usize,
    pub assertion: Assertion,
    pub outcome: AssertionOutcome,
}

/// Outcome of an assertion check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionOutcome {
    Passed,
    Failed(Vec<FieldMismatch>),
    NotFound { reason: String },
    /// The tree failed to read or index, but the assertion expected a projection
    UnexpectedError { message: String },
    /// The assertion expected a structural error, but projection succeeded
    MissingError,
}

/// One field that differed from what the fixture expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl FieldMismatch {
    pub fn new(field: impl Into<String>, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl AssertionOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, AssertionOutcome::Passed)
    }
}

/// Words covered by `span`, space separated.
pub fn span_text(words: &[String], span: Span) -> String {
    words
        .get(span.tokens())
        .map(|slice| slice.join(" "))
        .unwrap_or_default()
}

/// Compare expected words and marks token by token.
pub fn check_marks(
    words: &[String],
    projection: &Projection,
    expected: &[MarkedWord],
) -> AssertionOutcome {
    if expected.len() != words.len() {
        return AssertionOutcome::Failed(vec![FieldMismatch::new(
            "length",
            expected.len().to_string(),
            words.len().to_string(),
        )]);
    }

    let mut mismatches = Vec::new();
    for (i, (want, word)) in expected.iter().zip(words).enumerate() {
        if want.word != *word {
            mismatches.push(FieldMismatch::new(format!("word {}", i), &want.word, word));
            continue;
        }
        let actual = projection.marks[i];
        if want.mark != actual {
            mismatches.push(FieldMismatch::new(
                format!("{} ({})", word, i),
                want.mark.symbol().to_string(),
                actual.symbol().to_string(),
            ));
        }
    }

    if mismatches.is_empty() {
        AssertionOutcome::Passed
    } else {
        AssertionOutcome::Failed(mismatches)
    }
}

/// Find a detected quantifier whose words and scopes match `expected`.
pub fn check_scope(
    words: &[String],
    projection: &Projection,
    expected: &ScopeExpectation,
) -> AssertionOutcome {
    let candidates: Vec<_> = projection
        .quantifiers
        .iter()
        .filter(|q| span_text(words, q.quantifier) == expected.quantifier)
        .collect();

    if candidates.is_empty() {
        let detected: Vec<String> = projection
            .quantifiers
            .iter()
            .map(|q| format!("`{}`", span_text(words, q.quantifier)))
            .collect();
        return AssertionOutcome::NotFound {
            reason: if detected.is_empty() {
                format!("no quantifier `{}`; nothing was detected", expected.quantifier)
            } else {
                format!(
                    "no quantifier `{}`; detected {}",
                    expected.quantifier,
                    detected.join(", ")
                )
            },
        };
    }

    let mut first_mismatch = None;
    for candidate in candidates {
        let mut mismatches = Vec::new();
        let subject = span_text(words, candidate.subject);
        if subject != expected.subject {
            mismatches.push(FieldMismatch::new("subject", &expected.subject, subject));
        }
        match (&expected.object, candidate.is_binary()) {
            (Some(object), true) => {
                let actual = span_text(words, candidate.object);
                if actual != *object {
                    mismatches.push(FieldMismatch::new("object", object, actual));
                }
            }
            (Some(object), false) => {
                mismatches.push(FieldMismatch::new("object", object, "(unary)"));
            }
            (None, true) => {
                mismatches.push(FieldMismatch::new(
                    "object",
                    "(unary)",
                    span_text(words, candidate.object),
                ));
            }
            (None, false) => {}
        }
        if mismatches.is_empty() {
            return AssertionOutcome::Passed;
        }
        first_mismatch.get_or_insert(mismatches);
    }

    AssertionOutcome::Failed(first_mismatch.unwrap_or_default())
}
