//! Half-open token intervals.

use std::fmt;
use std::ops::Range;

/// A token interval `[left, right)`.
///
/// Spans order by `left`, then `right`, which is also the order quantifier
/// occurrences are reported in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Span {
    /// First token in the span
    pub left: usize,
    /// One past the last token in the span
    pub right: usize,
}

impl Span {
    /// Create a span.
    ///
    /// # Panics
    /// If `left > right`.
    pub fn new(left: usize, right: usize) -> Self {
        assert!(left <= right, "inverted span bounds [{}, {})", left, right);
        Span { left, right }
    }

    /// Span covering the single token `i`.
    pub fn token(i: usize) -> Self {
        Span::new(i, i + 1)
    }

    /// Zero-width span positioned at `at`.
    pub fn empty_at(at: usize) -> Self {
        Span::new(at, at)
    }

    pub fn len(&self) -> usize {
        self.right - self.left
    }

    pub fn is_empty(&self) -> bool {
        self.left == self.right
    }

    /// Does the span contain token `i`?
    pub fn contains(&self, i: usize) -> bool {
        self.left <= i && i < self.right
    }

    /// Does `other` lie entirely within this span?
    pub fn covers(&self, other: &Span) -> bool {
        self.left <= other.left && other.right <= self.right
    }

    /// Do the two spans share at least one token?
    ///
    /// An empty span shares no tokens, so it overlaps nothing.
    pub fn overlaps(&self, other: &Span) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
    }

    /// Token indices in the span.
    pub fn tokens(&self) -> Range<usize> {
        self.left..self.right
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.left, self.right)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}
