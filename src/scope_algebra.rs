//! Interval operations for carving argument scopes out of subtree spans.
//!
//! All functions are pure. The carving rules follow the usual pattern for a
//! binary quantifier: the subject is its subtree minus the quantifier words,
//! and the object is its subtree widened to the pivot, minus the subject.

use crate::lexicon::is_quantifier_gloss;
use crate::tree::{NodeId, ParseTree};
use crate::Span;
use std::collections::VecDeque;

/// Span of `node` and all its descendants, found by walking the tree.
///
/// Returns `None` when no token lies under `node`. Agrees with
/// [`crate::TreeSpanIndex::span`] on any tree that indexes cleanly.
pub fn subtree_span<T: ParseTree + ?Sized>(tree: &T, node: NodeId) -> Option<Span> {
    let mut bounds: Option<(usize, usize)> = None;
    let mut seen = vec![false; tree.node_count()];
    let mut fringe = VecDeque::from([node]);
    while let Some(current) = fringe.pop_front() {
        if std::mem::replace(&mut seen[current.0], true) {
            continue;
        }
        if let Some(token) = tree.token(current) {
            bounds = Some(match bounds {
                None => (token, token + 1),
                Some((l, r)) => (l.min(token), r.max(token + 1)),
            });
        }
        fringe.extend(tree.children(current).iter().copied());
    }
    bounds.map(|(l, r)| Span::new(l, r))
}

/// Widen `span` just enough to contain token `i`.
pub fn include_point(span: Span, i: usize) -> Span {
    if i < span.left {
        Span::new(i, span.right)
    } else if i >= span.right {
        Span::new(span.left, i + 1)
    } else {
        span
    }
}

/// Smallest span containing both arguments.
pub fn include_span(span: Span, other: Span) -> Span {
    Span::new(span.left.min(other.left), span.right.max(other.right))
}

/// Remove `other` from the edge of `span`.
///
/// A contiguous span cannot have a hole punched in it, so when `other` lies
/// strictly inside `span` the span comes back unchanged. When `other` covers
/// `span` entirely the result is empty, positioned at `span.right`.
pub fn exclude_interval(span: Span, other: Span) -> Span {
    if other.right <= span.left || other.left >= span.right {
        span
    } else if other.left <= span.left && span.left < other.right {
        Span::new(other.right.min(span.right), span.right)
    } else if other.left < span.right && span.right <= other.right {
        Span::new(span.left, other.left)
    } else if span.left < other.left && other.right < span.right {
        span
    } else {
        unreachable!("exclude_interval: {} against {}", span, other)
    }
}

/// Move the left edge of `span` past a quantifier phrase sitting at its front.
///
/// Looks at most two tokens in from the left edge for the longest known
/// quantifier gloss that still leaves at least one token of the span behind.
pub fn strip_leading_quantifier(span: Span, words: &[String]) -> Span {
    let size = span.len();
    if size < 2 || span.right > words.len() {
        return span;
    }
    for start in 0..(size - 1).min(2) {
        for len in (1..size - start).rev() {
            let from = span.left + start;
            let gloss = words[from..from + len]
                .iter()
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
                .join(" ");
            if is_quantifier_gloss(&gloss) {
                return Span::new(from + len, span.right);
            }
        }
    }
    span
}
