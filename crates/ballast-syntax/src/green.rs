//! Position-independent, `Arc`-shared layer of the syntax tree.
//!
//! Green nodes know their kind, children and length, nothing else. Editing
//! never mutates a node: every operation returns a new node that shares all
//! untouched children with the original.

use std::fmt;
use std::ops::Range;

use text_size::TextSize;
use triomphe::Arc;

use crate::{GreenTrivia, NodeOrToken, SyntaxKind};

pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(),
            NodeOrToken::Token(token) => token.text_len(),
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        NodeOrToken::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        NodeOrToken::Token(token)
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    text_len: TextSize,
    children: Box<[GreenElement]>,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: impl IntoIterator<Item = GreenElement>) -> Self {
        let children: Box<[GreenElement]> = children.into_iter().collect();
        let text_len = children.iter().map(GreenElement::text_len).sum();
        Self(Arc::new(GreenNodeData { kind, text_len, children }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn text_len(&self) -> TextSize {
        self.0.text_len
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn replace_child(&self, index: usize, element: GreenElement) -> Self {
        self.splice_children(index..index + 1, [element])
    }

    pub fn insert_child(&self, index: usize, element: GreenElement) -> Self {
        self.splice_children(index..index, [element])
    }

    pub fn splice_children(
        &self,
        range: Range<usize>,
        replace_with: impl IntoIterator<Item = GreenElement>,
    ) -> Self {
        let mut children = self.children().to_vec();
        children.splice(range, replace_with);
        Self::new(self.kind(), children)
    }

    /// Replaces the element found by following `path` (child indices, root
    /// excluded) and rebuilds every ancestor on the way back up.
    ///
    /// Siblings of the rebuilt nodes are shared, not copied.
    #[track_caller]
    pub fn replace_at(&self, path: &[usize], element: GreenElement) -> Self {
        let Some((&index, rest)) = path.split_first() else {
            panic!("`replace_at` needs a non-empty path");
        };
        let replacement = match (rest.is_empty(), &self.children()[index]) {
            (true, _) => element,
            (false, NodeOrToken::Node(child)) => NodeOrToken::Node(child.replace_at(rest, element)),
            (false, NodeOrToken::Token(token)) => {
                panic!("path continues below token {:?}", token.kind())
            }
        };
        self.replace_child(index, replacement)
    }

    pub fn element_at(&self, path: &[usize]) -> Option<&GreenElement> {
        let (&index, rest) = path.split_first()?;
        let element = self.children().get(index)?;
        match (rest.is_empty(), element) {
            (true, _) => Some(element),
            (false, NodeOrToken::Node(child)) => child.element_at(rest),
            (false, NodeOrToken::Token(_)) => None,
        }
    }

    pub fn first_token_path(&self) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        self.edge_token_path(false, &mut path).then_some(path)
    }

    pub fn last_token_path(&self) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        self.edge_token_path(true, &mut path).then_some(path)
    }

    fn edge_token_path(&self, from_end: bool, path: &mut Vec<usize>) -> bool {
        let len = self.children().len();
        for step in 0..len {
            let index = if from_end { len - 1 - step } else { step };
            path.push(index);
            match &self.children()[index] {
                NodeOrToken::Token(_) => return true,
                NodeOrToken::Node(node) => {
                    if node.edge_token_path(from_end, path) {
                        return true;
                    }
                }
            }
            path.pop();
        }
        false
    }

    pub fn first_token(&self) -> Option<&GreenToken> {
        self.element_at(&self.first_token_path()?)?.as_token()
    }

    pub fn last_token(&self) -> Option<&GreenToken> {
        self.element_at(&self.last_token_path()?)?.as_token()
    }

    pub fn map_first_token(&self, f: impl FnOnce(&GreenToken) -> GreenToken) -> Self {
        match self.first_token_path() {
            Some(path) => self.map_token_at(&path, f),
            None => self.clone(),
        }
    }

    pub fn map_last_token(&self, f: impl FnOnce(&GreenToken) -> GreenToken) -> Self {
        match self.last_token_path() {
            Some(path) => self.map_token_at(&path, f),
            None => self.clone(),
        }
    }

    fn map_token_at(&self, path: &[usize], f: impl FnOnce(&GreenToken) -> GreenToken) -> Self {
        let Some(NodeOrToken::Token(token)) = self.element_at(path) else {
            return self.clone();
        };
        let mapped = f(token);
        if mapped == *token {
            return self.clone();
        }
        self.replace_at(path, NodeOrToken::Token(mapped))
    }

    /// The same node without the leading trivia of its first token and the
    /// trailing trivia of its last token.
    pub fn trimmed(&self) -> Self {
        self.map_first_token(GreenToken::without_leading).map_last_token(GreenToken::without_trailing)
    }

    /// Concatenated token text, trivia excluded at both ends.
    pub fn text_trimmed(&self) -> String {
        self.trimmed().to_string()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children() {
            match child {
                NodeOrToken::Node(node) => fmt::Display::fmt(node, f)?,
                NodeOrToken::Token(token) => fmt::Display::fmt(token, f)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("text_len", &self.text_len())
            .field("children", &self.children())
            .finish()
    }
}

/// A token together with its leading and trailing trivia.
///
/// `text` always holds the full text, trivia included.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken(Arc<GreenTokenData>);

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    leading: GreenTrivia,
    kind: SyntaxKind,
    text: Box<str>,
    trailing: GreenTrivia,
}

impl GreenToken {
    pub fn new(leading: GreenTrivia, kind: SyntaxKind, text: &str, trailing: GreenTrivia) -> Self {
        debug_assert!(
            usize::from(leading.len() + trailing.len()) <= text.len(),
            "trivia longer than token text {text:?}"
        );
        Self(Arc::new(GreenTokenData { leading, kind, text: text.into(), trailing }))
    }

    /// A token without trivia, e.g. a synthesized delimiter.
    pub fn bare(kind: SyntaxKind, text: &str) -> Self {
        Self::new(GreenTrivia::empty(), kind, text, GreenTrivia::empty())
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn text_len(&self) -> TextSize {
        TextSize::of(self.text())
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.0.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.0.trailing
    }

    fn trimmed_bounds(&self) -> (usize, usize) {
        let start = usize::from(self.leading().len());
        let end = self.text().len() - usize::from(self.trailing().len());
        (start, end)
    }

    pub fn text_trimmed(&self) -> &str {
        let (start, end) = self.trimmed_bounds();
        &self.text()[start..end]
    }

    pub fn leading_text(&self) -> &str {
        let (start, _) = self.trimmed_bounds();
        &self.text()[..start]
    }

    pub fn trailing_text(&self) -> &str {
        let (_, end) = self.trimmed_bounds();
        &self.text()[end..]
    }

    pub fn with_leading(&self, leading: GreenTrivia, leading_text: &str) -> Self {
        debug_assert_eq!(leading.len(), TextSize::of(leading_text));
        let text = format!("{leading_text}{}{}", self.text_trimmed(), self.trailing_text());
        Self::new(leading, self.kind(), &text, self.trailing().clone())
    }

    pub fn with_trailing(&self, trailing: GreenTrivia, trailing_text: &str) -> Self {
        debug_assert_eq!(trailing.len(), TextSize::of(trailing_text));
        let text = format!("{}{}{trailing_text}", self.leading_text(), self.text_trimmed());
        Self::new(self.leading().clone(), self.kind(), &text, trailing)
    }

    pub fn without_leading(&self) -> Self {
        if self.leading().is_empty() {
            return self.clone();
        }
        self.with_leading(GreenTrivia::empty(), "")
    }

    pub fn without_trailing(&self) -> Self {
        if self.trailing().is_empty() {
            return self.clone();
        }
        self.with_trailing(GreenTrivia::empty(), "")
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?}", self.kind(), self.text())
    }
}
