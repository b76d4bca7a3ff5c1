//! Node-to-span index for one parsed tree.
//!
//! Built once per sentence in a single post-order pass. Spans are stored in
//! an arena and interned by `(len, left)`, so a unary chain of constituents
//! over the same tokens shares one [`SpanId`].

use crate::tree::{NodeId, ParseTree};
use crate::{Span, StructuralError};
use std::collections::HashMap;

/// Identity of an interned span within one [`TreeSpanIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanId(usize);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    Open,
    Closed,
}

/// Maps every node of a tree to the token span it covers.
#[derive(Debug, Clone)]
pub struct TreeSpanIndex {
    node_spans: Vec<SpanId>,
    arena: Vec<Span>,
    interned: HashMap<(usize, usize), SpanId>,
    token_count: usize,
}

impl TreeSpanIndex {
    /// Index `tree`, checking that its leaves tile `[0, n)` exactly.
    pub fn build<T: ParseTree + ?Sized>(tree: &T) -> Result<Self, StructuralError> {
        let node_count = tree.node_count();
        let token_count = tree.token_count();

        let root = tree.root();
        if root.0 >= node_count {
            return Err(StructuralError::Detached { node: root.0 });
        }

        let mut visit = vec![Visit::Unseen; node_count];
        let mut claimed = vec![false; token_count];
        let mut spans: Vec<Option<Span>> = vec![None; node_count];

        let mut stack = vec![(root, false)];
        visit[root.0] = Visit::Open;
        while let Some((node, expanded)) = stack.pop() {
            if !expanded {
                stack.push((node, true));
                for child in tree.children(node).iter().rev() {
                    if child.0 >= node_count {
                        return Err(StructuralError::Detached { node: child.0 });
                    }
                    if visit[child.0] != Visit::Unseen {
                        return Err(StructuralError::Cycle { node: child.0 });
                    }
                    visit[child.0] = Visit::Open;
                    stack.push((*child, false));
                }
                continue;
            }

            let mut bounds: Option<(usize, usize)> = None;
            if let Some(token) = tree.token(node) {
                if token >= token_count {
                    return Err(StructuralError::TokenOutOfRange {
                        node: node.0,
                        token,
                        len: token_count,
                    });
                }
                if claimed[token] {
                    return Err(StructuralError::DuplicateToken { token });
                }
                claimed[token] = true;
                bounds = Some((token, token + 1));
            }
            for child in tree.children(node) {
                if let Some(span) = spans[child.0] {
                    bounds = Some(match bounds {
                        None => (span.left, span.right),
                        Some((l, r)) => (l.min(span.left), r.max(span.right)),
                    });
                }
            }
            let (left, right) = bounds.ok_or(StructuralError::EmptyConstituent { node: node.0 })?;
            spans[node.0] = Some(Span::new(left, right));
            visit[node.0] = Visit::Closed;
        }

        if let Some(node) = visit.iter().position(|v| *v == Visit::Unseen) {
            return Err(StructuralError::Detached { node });
        }

        let root_span = spans[root.0].unwrap_or(Span::empty_at(0));
        if root_span != Span::new(0, token_count) || claimed.iter().any(|c| !c) {
            return Err(StructuralError::IncompleteCoverage {
                found: root_span,
                expected: token_count,
            });
        }

        let mut index = TreeSpanIndex {
            node_spans: Vec::with_capacity(node_count),
            arena: Vec::new(),
            interned: HashMap::new(),
            token_count,
        };
        for span in spans.into_iter().flatten() {
            let id = index.intern(span);
            index.node_spans.push(id);
        }
        Ok(index)
    }

    fn intern(&mut self, span: Span) -> SpanId {
        let key = (span.len(), span.left);
        if let Some(id) = self.interned.get(&key) {
            return *id;
        }
        let id = SpanId(self.arena.len());
        self.arena.push(span);
        self.interned.insert(key, id);
        id
    }

    /// Span covered by `node`.
    pub fn span(&self, node: NodeId) -> Option<Span> {
        self.span_id(node).map(|id| self.arena[id.0])
    }

    /// Shared identity of the span covered by `node`.
    pub fn span_id(&self, node: NodeId) -> Option<SpanId> {
        self.node_spans.get(node.0).copied()
    }

    /// Look up an interned span.
    pub fn resolve(&self, id: SpanId) -> Span {
        self.arena[id.0]
    }

    /// Number of distinct spans across all nodes.
    pub fn distinct_spans(&self) -> usize {
        self.arena.len()
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }
}
