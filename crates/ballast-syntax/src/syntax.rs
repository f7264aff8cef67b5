//! Positioned, parent-linked handles over the green tree.
//!
//! A `SyntaxNode` is created on demand while walking down from the root and
//! remembers its parent and its index in that parent, which is all that is
//! needed to rebuild the ancestors of an edited node.

use std::fmt::{self, Write as _};

use text_size::{TextRange, TextSize};
use triomphe::Arc;

use crate::{GreenElement, GreenNode, GreenToken, SyntaxKind};

/// Immutable syntax tree for a single source text.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: GreenNode,
}

impl SyntaxTree {
    pub fn new(root: GreenNode) -> Self {
        Self { root }
    }

    /// Returns the root syntax node.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.root.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.root
    }

    /// Serializes the tree back to source text.
    pub fn text(&self) -> String {
        self.root.to_string()
    }

    /// Returns a tree over `root`; `self` is left untouched.
    pub fn modify_with(&self, root: GreenNode) -> Self {
        debug_assert_eq!(self.root.kind(), root.kind(), "root kind changed by a modification");
        Self::new(root)
    }

    /// Returns a tree where `node`, a node of this tree, is replaced by
    /// `replacement`.
    pub fn replace(&self, node: &SyntaxNode, replacement: GreenNode) -> Self {
        debug_assert!(
            node.ancestors().last().is_some_and(|root| root.green().ptr_eq(&self.root)),
            "node does not belong to this tree"
        );
        Self::new(node.replace_with(replacement))
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree").field("text_len", &self.root.text_len()).finish_non_exhaustive()
    }
}

/// Node handle: a green node plus its position in the tree.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

struct NodeData {
    parent: Option<SyntaxNode>,
    index: usize,
    offset: TextSize,
    green: GreenNode,
}

impl SyntaxNode {
    pub fn new_root(green: GreenNode) -> Self {
        Self(Arc::new(NodeData { parent: None, index: 0, offset: TextSize::new(0), green }))
    }

    fn new_child(parent: Self, index: usize, offset: TextSize, green: GreenNode) -> Self {
        Self(Arc::new(NodeData { parent: Some(parent), index, offset, green }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    pub fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    /// Returns an iterator of ancestors starting from this node.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + use<> {
        std::iter::successors(Some(self.clone()), Self::parent)
    }

    /// Position among the parent's children, tokens included.
    pub fn index(&self) -> usize {
        self.0.index
    }

    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.0.offset, self.green().text_len())
    }

    /// Range without the leading trivia of the first token and the trailing
    /// trivia of the last one.
    pub fn trimmed_range(&self) -> TextRange {
        let range = self.text_range();
        let leading = self.green().first_token().map_or(TextSize::new(0), |t| t.leading().len());
        let trailing = self.green().last_token().map_or(TextSize::new(0), |t| t.trailing().len());
        if range.len() < leading + trailing {
            return TextRange::empty(range.start());
        }
        TextRange::new(range.start() + leading, range.end() - trailing)
    }

    pub fn text(&self) -> String {
        self.green().to_string()
    }

    pub fn text_trimmed(&self) -> String {
        self.green().text_trimmed()
    }

    pub fn children_with_tokens(&self) -> SyntaxElementChildren {
        SyntaxElementChildren { parent: self.clone(), index: 0, offset: self.0.offset }
    }

    pub fn children(&self) -> SyntaxNodeChildren {
        SyntaxNodeChildren { inner: self.children_with_tokens() }
    }

    pub fn first_child(&self) -> Option<Self> {
        self.children().next()
    }

    pub fn first_token(&self) -> Option<SyntaxToken> {
        self.children_with_tokens().find_map(|child| match child {
            NodeOrToken::Node(node) => node.first_token(),
            NodeOrToken::Token(token) => Some(token),
        })
    }

    /// Returns the direct child token of the given kind, if any.
    pub fn child_token(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.children_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .find(|token| token.kind() == kind)
    }

    /// All tokens below this node, in source order.
    pub fn descendant_tokens(&self) -> Vec<SyntaxToken> {
        let mut tokens = Vec::new();
        self.collect_tokens(&mut tokens);
        tokens
    }

    fn collect_tokens(&self, tokens: &mut Vec<SyntaxToken>) {
        for child in self.children_with_tokens() {
            match child {
                NodeOrToken::Node(node) => node.collect_tokens(tokens),
                NodeOrToken::Token(token) => tokens.push(token),
            }
        }
    }

    /// Child indices leading from the root to this node.
    pub fn path(&self) -> Vec<usize> {
        let mut path: Vec<usize> =
            self.ancestors().filter(|node| node.parent().is_some()).map(|node| node.index()).collect();
        path.reverse();
        path
    }

    /// Swaps this node for `replacement` and returns the new root, rebuilding
    /// every ancestor along the way.
    pub fn replace_with(&self, replacement: GreenNode) -> GreenNode {
        match self.parent() {
            None => replacement,
            Some(parent) => {
                let new_parent =
                    parent.green().replace_child(self.index(), NodeOrToken::Node(replacement));
                parent.replace_with(new_parent)
            }
        }
    }

    /// Indented `KIND@range` dump, one element per line.
    pub fn debug_tree(&self) -> String {
        let mut buf = String::new();
        self.write_tree(&mut buf, 0);
        buf
    }

    fn write_tree(&self, buf: &mut String, depth: usize) {
        _ = writeln!(buf, "{:indent$}{:?}@{:?}", "", self.kind(), self.text_range(), indent = depth * 2);
        for child in self.children_with_tokens() {
            match child {
                NodeOrToken::Node(node) => node.write_tree(buf, depth + 1),
                NodeOrToken::Token(token) => {
                    _ = writeln!(
                        buf,
                        "{:indent$}{:?}@{:?} {:?}",
                        "",
                        token.kind(),
                        token.trimmed_range(),
                        token.text_trimmed(),
                        indent = (depth + 1) * 2
                    );
                }
            }
        }
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.offset == other.0.offset && self.green().ptr_eq(other.green()))
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.green(), f)
    }
}

/// Token handle: a green token plus its parent and position.
#[derive(Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    parent: SyntaxNode,
    index: usize,
    offset: TextSize,
    green: GreenToken,
}

impl SyntaxToken {
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the token text including trivia.
    pub fn text(&self) -> &str {
        self.green.text()
    }

    /// Returns the token text excluding trivia.
    pub fn text_trimmed(&self) -> &str {
        self.green.text_trimmed()
    }

    pub fn text_range(&self) -> TextRange {
        TextRange::at(self.offset, self.green.text_len())
    }

    pub fn trimmed_range(&self) -> TextRange {
        let range = self.text_range();
        TextRange::new(
            range.start() + self.green.leading().len(),
            range.end() - self.green.trailing().len(),
        )
    }

    /// Swaps this token for `replacement` and returns the new root.
    pub fn replace_with(&self, replacement: GreenToken) -> GreenNode {
        let new_parent =
            self.parent.green().replace_child(self.index, NodeOrToken::Token(replacement));
        self.parent.replace_with(new_parent)
    }
}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.trimmed_range(), self.text_trimmed())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

/// Iterator over children including tokens.
#[derive(Clone)]
pub struct SyntaxElementChildren {
    parent: SyntaxNode,
    index: usize,
    offset: TextSize,
}

impl Iterator for SyntaxElementChildren {
    type Item = SyntaxElement;

    fn next(&mut self) -> Option<Self::Item> {
        let green = self.parent.green().children().get(self.index)?.clone();
        let (index, offset) = (self.index, self.offset);
        self.index += 1;
        self.offset += green.text_len();

        Some(match green {
            GreenElement::Node(node) => {
                NodeOrToken::Node(SyntaxNode::new_child(self.parent.clone(), index, offset, node))
            }
            GreenElement::Token(token) => NodeOrToken::Token(SyntaxToken {
                parent: self.parent.clone(),
                index,
                offset,
                green: token,
            }),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.parent.green().children().len() - self.index;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SyntaxElementChildren {}

/// Iterator over child nodes only.
#[derive(Clone)]
pub struct SyntaxNodeChildren {
    inner: SyntaxElementChildren,
}

impl Iterator for SyntaxNodeChildren {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(NodeOrToken::into_node)
    }
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

impl<N: fmt::Display, T: fmt::Display> fmt::Display for NodeOrToken<N, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}
