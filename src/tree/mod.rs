//! Read-only views over parsed sentences.
//!
//! The projection core never owns a parser. It reads trees through the
//! [`ParseTree`] trait, which both the constituency and the dependency
//! representation implement. Nodes are addressed by [`NodeId`], a plain
//! index into the tree's node arena.

mod constituency;
mod dependency;

pub use constituency::{ConstituencyTree, TreeBuilder};
pub use dependency::{DepToken, DependencyTree};

use std::fmt;

/// Stable index of a node within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A parsed sentence, seen as ordered labeled nodes over a token sequence.
///
/// Leaves carry a token index; internal nodes may carry one too (a
/// dependency node is both a token and the head of its dependents).
pub trait ParseTree {
    fn root(&self) -> NodeId;

    /// Number of nodes in the arena. Valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    fn children(&self, node: NodeId) -> &[NodeId];

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Category or tag of the node. Constituency leaves are labeled with their word.
    fn label(&self, node: NodeId) -> &str;

    /// Token carried by this node, if any.
    fn token(&self, node: NodeId) -> Option<usize>;

    /// Surface forms of the sentence, indexed by token.
    fn words(&self) -> &[String];

    fn token_count(&self) -> usize {
        self.words().len()
    }

    fn is_leaf(&self, node: NodeId) -> bool {
        self.children(node).is_empty()
    }

    /// Word the node's tag applies to.
    ///
    /// For phrase structure that is the word under a preterminal, i.e. a
    /// node whose only child is a token leaf. Dependency nodes override this
    /// with their own word.
    fn preterminal_word(&self, node: NodeId) -> Option<&str> {
        match self.children(node) {
            [child] if self.is_leaf(*child) => {
                let token = self.token(*child)?;
                self.words().get(token).map(String::as_str)
            }
            _ => None,
        }
    }

    /// The dependency view of this tree, when it is one.
    fn as_dependency(&self) -> Option<&DependencyTree> {
        None
    }

    /// All nodes reachable from the root, parents before children, children in order.
    fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.node_count());
        let mut seen = vec![false; self.node_count()];
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if seen[node.0] {
                continue;
            }
            seen[node.0] = true;
            order.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        order
    }
}

/// Random constituency trees for property tests.
#[cfg(test)]
pub(crate) mod strategies {
    use super::{ConstituencyTree, TreeBuilder};
    use proptest::prelude::*;

    const TRIGGER_LEAVES: &[(&str, &str)] = &[
        ("DT", "all"),
        ("DT", "no"),
        ("DT", "a"),
        ("RB", "not"),
        ("JJ", "few"),
        ("JJS", "angriest"),
        ("JJS", "most"),
        ("IN", "without"),
        ("IN", "at"),
        ("CD", "3"),
    ];

    const PLAIN_LEAVES: &[(&str, &str)] = &[
        ("NNS", "cats"),
        ("NN", "tail"),
        ("VBP", "have"),
        ("VBD", "slept"),
        ("JJ", "grey"),
    ];

    const LABELS: &[&str] = &["NP", "VP", "S", "PP", "QP", "ADJP"];

    /// Fold a random sequence of preterminals into a tree by repeatedly
    /// grouping a contiguous run of the current top-level nodes.
    fn assemble(leaves: &[(&str, &str)], merges: &[(usize, usize, usize)]) -> ConstituencyTree {
        let words = leaves.iter().map(|(_, w)| w.to_string()).collect();
        let mut b = TreeBuilder::new(words);
        let mut top: Vec<_> = leaves
            .iter()
            .enumerate()
            .map(|(i, (tag, _))| b.preterminal(tag, i))
            .collect();
        for (start, len, label) in merges {
            if top.len() == 1 {
                break;
            }
            let start = start % top.len();
            let len = 1 + len % (top.len() - start);
            let group: Vec<_> = top.drain(start..start + len).collect();
            let phrase = b.phrase(LABELS[label % LABELS.len()], group);
            top.insert(start, phrase);
        }
        let s = b.phrase("S", top);
        let root = b.phrase("ROOT", [s]);
        b.finish(root)
    }

    fn tree_from(pool: &'static [(&'static str, &'static str)]) -> impl Strategy<Value = ConstituencyTree> {
        (
            prop::collection::vec(0..pool.len(), 1..10),
            prop::collection::vec((0usize..16, 0usize..16, 0usize..16), 0..16),
        )
            .prop_map(move |(picks, merges)| {
                let leaves: Vec<_> = picks.iter().map(|i| pool[*i]).collect();
                assemble(&leaves, &merges)
            })
    }

    /// Trees mixing trigger words and plain words.
    pub(crate) fn arbitrary_tree() -> impl Strategy<Value = ConstituencyTree> {
        static MIXED: once_cell::sync::Lazy<Vec<(&str, &str)>> = once_cell::sync::Lazy::new(|| {
            TRIGGER_LEAVES.iter().chain(PLAIN_LEAVES).copied().collect()
        });
        tree_from(MIXED.as_slice())
    }

    /// Trees built only from words no operator triggers on.
    pub(crate) fn trigger_free_tree() -> impl Strategy<Value = ConstituencyTree> {
        tree_from(PLAIN_LEAVES)
    }
}
