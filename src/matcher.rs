//! Finding trigger nodes and projecting from them to argument nodes.
//!
//! The engine only needs two capabilities from a tree-pattern matcher, and
//! [`TreeMatcher`] names exactly those. [`DirectMatcher`] implements both by
//! walking the tree for the fixed set of trigger and projection shapes the
//! catalog can express.

use crate::catalog::{ChildPattern, DominanceContext, ProjectionQuery, TriggerPattern};
use crate::tree::{NodeId, ParseTree};

/// Locates operator triggers and their argument nodes.
pub trait TreeMatcher {
    /// Every node matching `pattern`, in pre-order.
    fn find_all(&self, tree: &dyn ParseTree, pattern: &TriggerPattern) -> Vec<NodeId>;

    /// The node `query` projects to from `anchor`, if the shape is present.
    fn match_at(
        &self,
        tree: &dyn ParseTree,
        query: ProjectionQuery,
        anchor: NodeId,
    ) -> Option<NodeId>;
}

/// A tree-walking matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectMatcher;

impl TreeMatcher for DirectMatcher {
    fn find_all(&self, tree: &dyn ParseTree, pattern: &TriggerPattern) -> Vec<NodeId> {
        tree.preorder()
            .into_iter()
            .filter(|node| matches_trigger(tree, pattern, *node))
            .collect()
    }

    fn match_at(
        &self,
        tree: &dyn ParseTree,
        query: ProjectionQuery,
        anchor: NodeId,
    ) -> Option<NodeId> {
        match query {
            ProjectionQuery::Parent => tree.parent(anchor),
            ProjectionQuery::ParentPp => tree
                .parent(anchor)
                .filter(|p| category(tree.label(*p)) == "PP"),
            ProjectionQuery::MaximalNp => {
                let mut np = tree
                    .parent(anchor)
                    .filter(|p| category(tree.label(*p)) == "NP")?;
                while let Some(up) = tree
                    .parent(np)
                    .filter(|p| category(tree.label(*p)) == "NP")
                {
                    np = up;
                }
                Some(np)
            }
            ProjectionQuery::ClauseS => ancestors(tree, anchor).find(|a| {
                category(tree.label(*a)) == "S"
                    && tree
                        .parent(*a)
                        .map_or(true, |p| category(tree.label(p)) != "S")
            }),
        }
    }
}

/// Phrase category with function tags stripped: `NP-SBJ` and `NP=2` are `NP`.
///
/// Bracket tokens such as `-LRB-` are left alone.
pub fn category(label: &str) -> &str {
    if label.starts_with('-') {
        return label;
    }
    label.split(['-', '=']).next().unwrap_or(label)
}

fn ancestors<'t>(tree: &'t dyn ParseTree, node: NodeId) -> impl Iterator<Item = NodeId> + 't {
    std::iter::successors(tree.parent(node), move |n| tree.parent(*n))
}

fn matches_child(tree: &dyn ParseTree, pattern: &ChildPattern, node: NodeId) -> bool {
    if !pattern.tag.is_match(tree.label(node)) {
        return false;
    }
    match &pattern.word {
        None => true,
        Some(word) => tree
            .preterminal_word(node)
            .is_some_and(|w| w.to_lowercase() == *word),
    }
}

fn matches_trigger(tree: &dyn ParseTree, pattern: &TriggerPattern, node: NodeId) -> bool {
    if !pattern.tag.is_match(tree.label(node)) {
        return false;
    }

    if pattern.children.is_empty() {
        let Some(word) = tree.preterminal_word(node) else {
            return false;
        };
        let word = word.to_lowercase();
        if !pattern.words.is_empty() && !pattern.words.contains(&word) {
            return false;
        }
        if pattern.excluded_words.contains(&word) {
            return false;
        }
    } else {
        let mut wanted = pattern.children.iter().peekable();
        for child in tree.children(node) {
            if let Some(next) = wanted.peek() {
                if matches_child(tree, next, *child) {
                    wanted.next();
                }
            }
        }
        if wanted.peek().is_some() {
            return false;
        }
    }

    let parent = tree.parent(node);
    let under_vp = || ancestors(tree, node).any(|a| category(tree.label(a)) == "VP");
    let context_ok = match pattern.context {
        DominanceContext::Anywhere => true,
        DominanceContext::OutsideVerbPhrase => !under_vp(),
        DominanceContext::NounPhraseUnderVerbPhrase => {
            parent.is_some_and(|p| category(tree.label(p)) == "NP") && under_vp()
        }
    };
    if !context_ok {
        return false;
    }

    if let Some(p) = parent {
        let label = tree.label(p);
        if pattern.excluded_parents.iter().any(|re| re.is_match(label)) {
            return false;
        }
        if let Some(sister) = &pattern.excluded_left_sister {
            let siblings = tree.children(p);
            let position = siblings.iter().position(|s| *s == node);
            if let Some(left) = position.and_then(|i| i.checked_sub(1)).map(|i| siblings[i]) {
                if matches_child(tree, sister, left) {
                    return false;
                }
            }
        }
    }

    true
}
