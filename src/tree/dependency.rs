//! Dependency trees: one node per token, arcs from governor to dependent.

use super::{NodeId, ParseTree};
use crate::{Span, StructuralError};
use std::collections::VecDeque;

/// A token of a dependency parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepToken {
    pub word: String,
    /// Part-of-speech tag
    pub tag: String,
    /// Lemma, when the pipeline supplied one
    pub lemma: Option<String>,
}

impl DepToken {
    pub fn new(word: &str, tag: &str) -> Self {
        Self {
            word: word.to_string(),
            tag: tag.to_string(),
            lemma: None,
        }
    }

    pub fn with_lemma(mut self, lemma: &str) -> Self {
        self.lemma = Some(lemma.to_string());
        self
    }

    /// Lowercased lemma, falling back to the lowercased word.
    pub fn lemma_or_word(&self) -> String {
        self.lemma.as_deref().unwrap_or(&self.word).to_lowercase()
    }
}

/// A validated dependency parse.
///
/// Node `i` is token `i`. Exactly one token has no governor, and following
/// governors from any token reaches it without revisiting a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTree {
    tokens: Vec<DepToken>,
    words: Vec<String>,
    governors: Vec<Option<usize>>,
    relations: Vec<String>,
    dependents: Vec<Vec<NodeId>>,
    root: NodeId,
}

impl DependencyTree {
    /// Build a tree from per-token governors (`None` for the root) and arc labels.
    pub fn new(
        tokens: Vec<DepToken>,
        governors: Vec<Option<usize>>,
        relations: Vec<String>,
    ) -> Result<Self, StructuralError> {
        let len = tokens.len();
        if governors.len() != len || relations.len() != len {
            return Err(StructuralError::Syntax {
                position: governors.len().min(relations.len()),
                message: format!(
                    "{} tokens but {} governors and {} relations",
                    len,
                    governors.len(),
                    relations.len()
                ),
            });
        }

        let mut root = None;
        for (token, governor) in governors.iter().enumerate() {
            match governor {
                None => match root {
                    None => root = Some(token),
                    Some(first) => {
                        return Err(StructuralError::MultipleRoots {
                            first,
                            second: token,
                        })
                    }
                },
                Some(g) if *g >= len => {
                    return Err(StructuralError::GovernorOutOfRange {
                        token,
                        governor: *g,
                        len,
                    })
                }
                Some(g) if *g == token => return Err(StructuralError::Cycle { node: token }),
                Some(_) => {}
            }
        }
        let root = root.ok_or(StructuralError::MissingRoot)?;

        // With a single root, a walk longer than `len` steps must loop.
        for start in 0..len {
            let mut current = start;
            let mut steps = 0;
            while let Some(g) = governors[current] {
                current = g;
                steps += 1;
                if steps > len {
                    return Err(StructuralError::Cycle { node: start });
                }
            }
        }

        let mut dependents = vec![Vec::new(); len];
        for (token, governor) in governors.iter().enumerate() {
            if let Some(g) = governor {
                dependents[*g].push(NodeId(token));
            }
        }

        let words = tokens.iter().map(|t| t.word.clone()).collect();
        Ok(Self {
            tokens,
            words,
            governors,
            relations,
            dependents,
            root: NodeId(root),
        })
    }

    /// Read whitespace-separated rows of `index word lemma tag governor relation`.
    ///
    /// Indices are 1-based and governor `0` marks the root. A lemma of `_`
    /// is treated as missing. Blank lines and lines starting with `#` are skipped.
    pub fn from_conll(text: &str) -> Result<Self, StructuralError> {
        let mut tokens = Vec::new();
        let mut governors = Vec::new();
        let mut relations = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let syntax = |message: String| StructuralError::Syntax {
                position: line_no + 1,
                message,
            };
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [index, word, lemma, tag, governor, relation] = fields.as_slice() else {
                return Err(syntax(format!(
                    "expected 6 columns, found {}",
                    fields.len()
                )));
            };
            let index: usize = index
                .parse()
                .map_err(|_| syntax(format!("bad token index `{}`", index)))?;
            if index != tokens.len() + 1 {
                return Err(syntax(format!(
                    "expected token {}, found {}",
                    tokens.len() + 1,
                    index
                )));
            }
            let governor: usize = governor
                .parse()
                .map_err(|_| syntax(format!("bad governor `{}`", governor)))?;

            let mut token = DepToken::new(word, tag);
            if *lemma != "_" {
                token = token.with_lemma(lemma);
            }
            tokens.push(token);
            governors.push(governor.checked_sub(1));
            relations.push(relation.to_string());
        }

        DependencyTree::new(tokens, governors, relations)
    }

    pub fn tokens(&self) -> &[DepToken] {
        &self.tokens
    }

    pub fn governor(&self, token: usize) -> Option<usize> {
        self.governors[token]
    }

    /// Label of the arc into `token` (`root` for the root).
    pub fn relation(&self, token: usize) -> &str {
        &self.relations[token]
    }

    /// Dependents of `token`, in sentence order.
    pub fn dependents(&self, token: usize) -> impl Iterator<Item = usize> + '_ {
        self.dependents[token].iter().map(|n| n.0)
    }

    /// Dependents of `token` reached by an arc whose label satisfies `relation`.
    pub fn dependents_via<'a>(
        &'a self,
        token: usize,
        relation: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = usize> + 'a {
        self.dependents(token)
            .filter(move |d| relation(self.relations[*d].as_str()))
    }

    /// Span of `token` and everything it transitively governs.
    pub fn subtree_span(&self, token: usize) -> Span {
        self.generalized_subtree_span(token, |_| true)
    }

    /// Like [`DependencyTree::subtree_span`], but only the first hop out of
    /// `token` is restricted to arcs labeled with one of `arcs`.
    pub fn subtree_span_via(&self, token: usize, arcs: &[&str]) -> Span {
        self.generalized_subtree_span(token, |relation| arcs.iter().any(|a| *a == relation))
    }

    fn generalized_subtree_span(&self, token: usize, first_hop: impl Fn(&str) -> bool) -> Span {
        let mut min = token;
        let mut max = token;
        let mut fringe: VecDeque<usize> = self
            .dependents(token)
            .filter(|d| first_hop(&self.relations[*d]))
            .collect();
        while let Some(node) = fringe.pop_front() {
            min = min.min(node);
            max = max.max(node);
            fringe.extend(self.dependents(node));
        }
        Span::new(min, max + 1)
    }

    /// Is `span` a constituent of the tree?
    ///
    /// A constituent has exactly one token whose governor lies outside it
    /// (its head), and no token outside it is governed from inside.
    pub fn is_constituent(&self, span: Span) -> bool {
        if span.is_empty() || span.right > self.tokens.len() {
            return false;
        }
        let mut heads = 0;
        for token in span.tokens() {
            match self.governors[token] {
                Some(g) if span.contains(g) => {}
                _ => heads += 1,
            }
        }
        if heads != 1 {
            return false;
        }
        (0..self.tokens.len())
            .filter(|t| !span.contains(*t))
            .all(|t| !matches!(self.governors[t], Some(g) if span.contains(g)))
    }

    /// Every contiguous constituent, longest first, then left to right.
    pub fn constituent_spans(&self) -> Vec<Span> {
        let len = self.tokens.len();
        let mut spans = Vec::new();
        for width in (1..=len).rev() {
            for left in 0..=(len - width) {
                let span = Span::new(left, left + width);
                if self.is_constituent(span) {
                    spans.push(span);
                }
            }
        }
        spans
    }
}

impl ParseTree for DependencyTree {
    fn root(&self) -> NodeId {
        self.root
    }

    fn node_count(&self) -> usize {
        self.tokens.len()
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.dependents[node.0]
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.governors[node.0].map(NodeId)
    }

    fn label(&self, node: NodeId) -> &str {
        &self.tokens[node.0].tag
    }

    fn token(&self, node: NodeId) -> Option<usize> {
        Some(node.0)
    }

    fn words(&self) -> &[String] {
        &self.words
    }

    fn preterminal_word(&self, node: NodeId) -> Option<&str> {
        self.words.get(node.0).map(String::as_str)
    }

    fn as_dependency(&self) -> Option<&DependencyTree> {
        Some(self)
    }
}
