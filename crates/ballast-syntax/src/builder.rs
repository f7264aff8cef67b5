use text_size::TextRange;

use crate::{GreenElement, GreenNode, GreenToken, GreenTrivia, SyntaxKind};

/// Assembles a green tree bottom-up from parser events.
pub struct Builder<'a> {
    text: &'a str,
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl Drop for Builder<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.parents.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 32;
const DEFAULT_CHILDREN_LEN: usize = 256;

impl<'a> Builder<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            parents: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
        }
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Adds a token whose significant text is `kind_range`; the trivia
    /// lengths extend it to both sides.
    pub fn token(
        &mut self,
        leading: GreenTrivia,
        kind: SyntaxKind,
        kind_range: TextRange,
        trailing: GreenTrivia,
    ) {
        let range = TextRange::new(
            kind_range.start() - leading.len(),
            kind_range.end() + trailing.len(),
        );
        let token = GreenToken::new(leading, kind, &self.text[range], trailing);
        self.children.push(token.into());
    }

    pub fn finish_node(&mut self) {
        let (kind, first_child) = self.parents.pop().expect("unbalanced `finish_node`");
        let children: Vec<GreenElement> = self.children.drain(first_child..).collect();
        self.children.push(GreenNode::new(kind, children).into());
    }

    pub fn finish(mut self) -> GreenNode {
        assert!(self.parents.is_empty(), "unfinished nodes: {:?}", self.parents);
        let mut children = std::mem::take(&mut self.children);
        assert_eq!(children.len(), 1, "expected a single root node");
        match children.pop() {
            Some(GreenElement::Node(node)) => node,
            _ => panic!("root element must be a node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{TriviaPiece, TriviaPieceKind};

    #[test]
    fn builds_nested_nodes() {
        let text = " a;";
        let mut builder = Builder::new(text);
        builder.start_node(MODULE_PART);
        builder.start_node(EXPRESSION);
        builder.token(
            GreenTrivia::new(&[TriviaPiece::new(TriviaPieceKind::Whitespace, TextSize::new(1))]),
            IDENTIFIER,
            TextRange::new(1.into(), 2.into()),
            GreenTrivia::empty(),
        );
        builder.finish_node();
        builder.token(
            GreenTrivia::empty(),
            SEMICOLON,
            TextRange::new(2.into(), 3.into()),
            GreenTrivia::empty(),
        );
        builder.finish_node();

        let root = builder.finish();
        assert_eq!(root.kind(), MODULE_PART);
        assert_eq!(root.to_string(), text);
        assert_eq!(root.children().len(), 2);
    }
}
