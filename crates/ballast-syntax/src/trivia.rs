//! Trivia pieces attached to tokens.

use std::fmt;

use text_size::TextSize;
use triomphe::ThinArc;

/// Kinds of trivia stored alongside tokens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    Newline,
    SingleLineComment,
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    /// Creates a new trivia piece with the given kind and length.
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

/// Shared, immutable run of trivia pieces with its total length in the header.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("pieces", &self.pieces())
            .field("total_len", &self.len())
            .finish()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }
        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    /// Classifies `text`, which must consist of spaces, tabs and newlines only.
    pub fn layout(text: &str) -> Self {
        let mut pieces: Vec<TriviaPiece> = Vec::new();
        let mut after_cr = false;
        for ch in text.chars() {
            debug_assert!(ch.is_ascii_whitespace(), "layout trivia must be whitespace: {ch:?}");
            let len = TextSize::of(ch);
            match (ch, pieces.last_mut()) {
                ('\n', Some(last)) if after_cr => last.len += len,
                ('\n' | '\r', _) => pieces.push(TriviaPiece::new(TriviaPieceKind::Newline, len)),
                (_, Some(last)) if last.kind == TriviaPieceKind::Whitespace => last.len += len,
                _ => pieces.push(TriviaPiece::new(TriviaPieceKind::Whitespace, len)),
            }
            after_cr = ch == '\r';
        }
        Self::new(&pieces)
    }

    pub fn len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_merges_runs_of_spaces() {
        let trivia = GreenTrivia::layout("  \n\t");
        let kinds: Vec<_> = trivia.pieces().iter().map(|piece| piece.kind).collect();
        assert_eq!(
            kinds,
            [TriviaPieceKind::Whitespace, TriviaPieceKind::Newline, TriviaPieceKind::Whitespace]
        );
        assert_eq!(trivia.len(), TextSize::new(4));
        assert!(GreenTrivia::layout("").is_empty());
    }

    #[test]
    fn layout_keeps_crlf_together() {
        let trivia = GreenTrivia::layout("\r\n\r\n ");
        let pieces = trivia.pieces();
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0], TriviaPiece::new(TriviaPieceKind::Newline, TextSize::new(2)));
        assert_eq!(pieces[1], TriviaPiece::new(TriviaPieceKind::Newline, TextSize::new(2)));
        assert_eq!(pieces[2].kind, TriviaPieceKind::Whitespace);
    }
}
