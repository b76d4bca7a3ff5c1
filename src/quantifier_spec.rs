//! Detected quantifier occurrences and their scopes.

use crate::Span;
use std::fmt;

/// One operator occurrence: where its words are and what it scopes over.
///
/// Unary operators get a degenerate object span at the end of the subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantifierSpec {
    /// Name of the operator or lexicon entry that fired
    pub name: String,
    pub quantifier: Span,
    pub subject: Span,
    pub object: Span,
}

impl QuantifierSpec {
    pub fn binary(name: &str, quantifier: Span, subject: Span, object: Span) -> Self {
        Self {
            name: name.to_string(),
            quantifier,
            subject,
            object,
        }
    }

    pub fn unary(name: &str, quantifier: Span, subject: Span) -> Self {
        Self::binary(name, quantifier, subject, Span::empty_at(subject.right))
    }

    pub fn is_binary(&self) -> bool {
        !self.object.is_empty()
    }

    pub fn quantifier_len(&self) -> usize {
        self.quantifier.len()
    }

    /// Last token of the quantifier phrase, if it has any tokens.
    pub fn head(&self) -> Option<usize> {
        (!self.quantifier.is_empty()).then(|| self.quantifier.right - 1)
    }

    /// Widen both scopes to cover `other`'s as well. The quantifier span is kept.
    pub fn merge(&self, other: &QuantifierSpec) -> QuantifierSpec {
        let hull = |a: Span, b: Span| Span::new(a.left.min(b.left), a.right.max(b.right));
        QuantifierSpec {
            name: self.name.clone(),
            quantifier: self.quantifier,
            subject: hull(self.subject, other.subject),
            object: hull(self.object, other.object),
        }
    }
}

impl fmt::Display for QuantifierSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} subject {}", self.name, self.quantifier, self.subject)?;
        if self.is_binary() {
            write!(f, " object {}", self.object)?;
        }
        Ok(())
    }
}
