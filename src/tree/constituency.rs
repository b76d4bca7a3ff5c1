//! Phrase-structure trees in an index arena.

use super::{NodeId, ParseTree};
use crate::StructuralError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    token: Option<usize>,
}

/// A constituency parse: labeled phrases over word leaves.
///
/// Leaves are labeled with their word and carry the token index they stand
/// for. Preterminals (`DT`, `NNS`, ...) have exactly one leaf child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituencyTree {
    nodes: Vec<Node>,
    words: Vec<String>,
    root: NodeId,
}

impl ConstituencyTree {
    /// Read a Penn-style bracketed tree such as
    /// `(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))`.
    ///
    /// Leaves are numbered left to right. A bracket with no label (as in
    /// `( (S ...))`) is labeled `ROOT`.
    pub fn from_bracketed(text: &str) -> Result<Self, StructuralError> {
        let lexemes = lex(text);
        let mut parser = BracketParser {
            lexemes: &lexemes,
            pos: 0,
            builder: TreeBuilder::new(Vec::new()),
            end: text.len(),
        };
        let root = parser.node()?;
        if let Some(extra) = parser.lexemes.get(parser.pos) {
            return Err(StructuralError::Syntax {
                position: extra.offset,
                message: format!("unexpected `{}` after the root bracket", extra.text),
            });
        }
        Ok(parser.builder.finish(root))
    }

    /// Render back into single-line bracketed form.
    pub fn to_bracketed(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        if node.children.is_empty() {
            out.push_str(&node.label);
            return;
        }
        out.push('(');
        out.push_str(&node.label);
        for child in &node.children {
            out.push(' ');
            self.write_node(*child, out);
        }
        out.push(')');
    }
}

impl fmt::Display for ConstituencyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bracketed())
    }
}

impl ParseTree for ConstituencyTree {
    fn root(&self) -> NodeId {
        self.root
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn label(&self, node: NodeId) -> &str {
        &self.nodes[node.0].label
    }

    fn token(&self, node: NodeId) -> Option<usize> {
        self.nodes[node.0].token
    }

    fn words(&self) -> &[String] {
        &self.words
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Assembles a [`ConstituencyTree`] bottom-up.
///
/// The builder records whatever it is given. Token indices are not checked
/// here; [`crate::TreeSpanIndex::build`] reports out-of-range, duplicate or
/// missing tokens as structural errors.
///
/// ```
/// use layered_natlog::{ParseTree, TreeBuilder};
///
/// let mut b = TreeBuilder::new(vec!["all".into(), "cats".into()]);
/// let all = b.preterminal("DT", 0);
/// let cats = b.preterminal("NNS", 1);
/// let np = b.phrase("NP", [all, cats]);
/// let tree = b.finish(np);
/// assert_eq!(tree.token_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    words: Vec<String>,
}

impl TreeBuilder {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            nodes: Vec::new(),
            words,
        }
    }

    /// A word leaf standing for `token`.
    pub fn leaf(&mut self, token: usize) -> NodeId {
        let label = self
            .words
            .get(token)
            .cloned()
            .unwrap_or_else(|| format!("<token {}>", token));
        self.push(Node {
            label,
            parent: None,
            children: Vec::new(),
            token: Some(token),
        })
    }

    /// A tag node over a single word leaf.
    pub fn preterminal(&mut self, tag: &str, token: usize) -> NodeId {
        let leaf = self.leaf(token);
        self.phrase(tag, [leaf])
    }

    /// A labeled node over `children`, in order.
    pub fn phrase(&mut self, label: &str, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let children: Vec<NodeId> = children.into_iter().collect();
        let id = NodeId(self.nodes.len());
        for child in &children {
            if let Some(node) = self.nodes.get_mut(child.0) {
                node.parent = Some(id);
            }
        }
        self.push(Node {
            label: label.to_string(),
            parent: None,
            children,
            token: None,
        })
    }

    pub fn finish(self, root: NodeId) -> ConstituencyTree {
        ConstituencyTree {
            nodes: self.nodes,
            words: self.words,
            root,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append a word and return its token index.
    fn push_word(&mut self, word: &str) -> usize {
        self.words.push(word.to_string());
        self.words.len() - 1
    }
}

// ============================================================================
// Bracketed reader
// ============================================================================

#[derive(Debug)]
struct Lexeme<'t> {
    text: &'t str,
    offset: usize,
}

fn lex(text: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::new();
    let mut start: Option<usize> = None;
    for (offset, c) in text.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(s) = start.take() {
                lexemes.push(Lexeme {
                    text: &text[s..offset],
                    offset: s,
                });
            }
            if !c.is_whitespace() {
                lexemes.push(Lexeme {
                    text: &text[offset..offset + 1],
                    offset,
                });
            }
        } else if start.is_none() {
            start = Some(offset);
        }
    }
    if let Some(s) = start {
        lexemes.push(Lexeme {
            text: &text[s..],
            offset: s,
        });
    }
    lexemes
}

struct BracketParser<'l, 't> {
    lexemes: &'l [Lexeme<'t>],
    pos: usize,
    builder: TreeBuilder,
    end: usize,
}

impl<'l, 't> BracketParser<'l, 't> {
    fn peek(&self) -> Option<&'t str> {
        self.lexemes.get(self.pos).map(|l| l.text)
    }

    fn offset(&self) -> usize {
        self.lexemes.get(self.pos).map_or(self.end, |l| l.offset)
    }

    fn error(&self, message: impl Into<String>) -> StructuralError {
        StructuralError::Syntax {
            position: self.offset(),
            message: message.into(),
        }
    }

    /// `( label child* )` where each child is a bracket or a bare word.
    fn node(&mut self) -> Result<NodeId, StructuralError> {
        if self.peek() != Some("(") {
            return Err(self.error("expected `(`"));
        }
        self.pos += 1;

        let label = match self.peek() {
            Some("(") => "ROOT".to_string(),
            Some(")") | None => return Err(self.error("empty bracket")),
            Some(text) => {
                self.pos += 1;
                text.to_string()
            }
        };

        let mut children = Vec::new();
        loop {
            match self.peek() {
                Some(")") => {
                    self.pos += 1;
                    break;
                }
                Some("(") => children.push(self.node()?),
                Some(word) => {
                    let token = self.builder.push_word(word);
                    children.push(self.builder.leaf(token));
                    self.pos += 1;
                }
                None => return Err(self.error(format!("unclosed bracket `{}`", label))),
            }
        }
        if children.is_empty() {
            return Err(self.error(format!("bracket `{}` has no children", label)));
        }
        Ok(self.builder.phrase(&label, children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CATS: &str = "(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))";

    #[test]
    fn test_from_bracketed_numbers_leaves() {
        let tree = ConstituencyTree::from_bracketed(ALL_CATS).unwrap();
        assert_eq!(tree.words(), &["all", "cats", "have", "tails"]);
        assert_eq!(tree.label(tree.root()), "ROOT");

        let leaves: Vec<usize> = tree
            .preorder()
            .into_iter()
            .filter_map(|n| tree.token(n))
            .collect();
        assert_eq!(leaves, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_parents_are_linked() {
        let tree = ConstituencyTree::from_bracketed(ALL_CATS).unwrap();
        for node in tree.preorder() {
            for child in tree.children(node) {
                assert_eq!(tree.parent(*child), Some(node));
            }
        }
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn test_round_trip_text() {
        let tree = ConstituencyTree::from_bracketed(ALL_CATS).unwrap();
        assert_eq!(tree.to_bracketed(), ALL_CATS);
    }

    #[test]
    fn test_unlabeled_root_and_multiline() {
        let tree = ConstituencyTree::from_bracketed("( (S\n  (NP (NN it))\n  (VP (VBZ rains))))")
            .unwrap();
        assert_eq!(tree.label(tree.root()), "ROOT");
        assert_eq!(tree.token_count(), 2);
    }

    #[test]
    fn test_bare_words_become_leaves() {
        let tree = ConstituencyTree::from_bracketed("(FRAG all cats (VP purr))").unwrap();
        assert_eq!(tree.words(), &["all", "cats", "purr"]);
        let root = tree.root();
        assert_eq!(tree.children(root).len(), 3);
        assert!(tree.is_leaf(tree.children(root)[0]));
        assert_eq!(tree.label(tree.children(root)[1]), "cats");
        assert_eq!(tree.token(tree.children(root)[1]), Some(1));
    }

    #[test]
    fn test_syntax_errors() {
        let err = ConstituencyTree::from_bracketed("(S (NP (DT all)").unwrap_err();
        assert!(matches!(err, StructuralError::Syntax { .. }));

        let err = ConstituencyTree::from_bracketed("(S (NP)) (X y)").unwrap_err();
        assert!(matches!(err, StructuralError::Syntax { .. }));

        let err = ConstituencyTree::from_bracketed("cats").unwrap_err();
        assert!(matches!(err, StructuralError::Syntax { position: 0, .. }));
    }

    #[test]
    fn test_builder_records_out_of_range_token() {
        let mut b = TreeBuilder::new(vec!["cats".to_string()]);
        let leaf = b.preterminal("NNS", 3);
        let tree = b.finish(leaf);
        assert_eq!(tree.token(tree.children(tree.root())[0]), Some(3));
        assert_eq!(tree.label(tree.children(tree.root())[0]), "<token 3>");
    }
}
