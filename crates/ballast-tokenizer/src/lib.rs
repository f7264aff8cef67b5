mod cursor;

pub use ballast_syntax::SyntaxKind;
use ballast_syntax::SyntaxKind::*;
use ballast_syntax::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use cursor::{Cursor, EOF_CHAR};
use text_size::{TextRange, TextSize};

/// A significant token with the trivia that belongs to it.
///
/// Trailing trivia runs up to and including the first newline after the
/// token; everything else before the next token is that token's leading
/// trivia.
#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };

    /// Range covering the token and both trivia runs.
    pub fn full_range(&self) -> TextRange {
        TextRange::new(
            self.kind_range.start() - self.leading.len(),
            self.kind_range.end() + self.trailing.len(),
        )
    }
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn token_text(&self) -> &'a str {
        &self.text[self.range()]
    }

    pub fn next_token(&mut self) -> Token {
        self.leading_trivia();
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        if kind != EOF {
            self.trailing_trivia();
        }

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn leading_trivia(&mut self) {
        while let Some(kind) = self.trivia_piece() {
            self.push_piece(kind);
        }
    }

    fn trailing_trivia(&mut self) {
        while let Some(kind) = self.trivia_piece() {
            self.push_piece(kind);
            if kind == TriviaPieceKind::Newline {
                break;
            }
        }
    }

    fn push_piece(&mut self, kind: TriviaPieceKind) {
        self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
        self.cursor.reset_pos_within_token();
    }

    fn trivia_piece(&mut self) -> Option<TriviaPieceKind> {
        if self.cursor.is_eof() {
            return None;
        }
        let kind = match self.cursor.peek() {
            '/' if self.cursor.second() == '/' => {
                self.cursor.advance_while(|c| c != '\n' && c != '\r');
                TriviaPieceKind::SingleLineComment
            }
            '\n' => {
                self.cursor.advance();
                TriviaPieceKind::Newline
            }
            '\r' => {
                self.cursor.advance();
                if self.cursor.matches('\n') {
                    self.cursor.advance();
                }
                TriviaPieceKind::Newline
            }
            c if is_inline_whitespace(c) => {
                self.cursor.advance_while(is_inline_whitespace);
                TriviaPieceKind::Whitespace
            }
            _ => return None,
        };
        Some(kind)
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        if self.cursor.is_eof() {
            return (EOF, self.range());
        }

        let kind = match self.cursor.advance() {
            '@' => AT,
            ':' => COLON,
            ';' => SEMICOLON,
            ',' => COMMA,
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '?' => QUESTION,
            '/' => SLASH,
            '.' if self.cursor.peek() == '.' && self.cursor.second() == '.' => {
                self.cursor.advance();
                self.cursor.advance();
                ELLIPSIS
            }
            '.' => DOT,
            '=' if !matches!(self.cursor.peek(), '=' | '>') => EQ,
            '"' => self.string_literal(),
            '`' => self.template_literal(),
            '#' => {
                self.cursor.advance_while(|c| c != '\n' && c != '\r');
                DOCUMENTATION_LINE
            }
            '\'' if is_ident_start(self.cursor.peek()) || self.cursor.peek() == '\\' => {
                self.identifier_rest();
                IDENTIFIER
            }
            '\\' if is_escapable(self.cursor.peek()) => {
                self.cursor.advance();
                self.identifier_rest();
                IDENTIFIER
            }
            first_char @ '0'..='9' => self.number(first_char),
            c if is_ident_start(c) => {
                self.identifier_rest();
                SyntaxKind::from_keyword(self.token_text()).unwrap_or(IDENTIFIER)
            }
            c if is_operator(c) => {
                self.cursor.advance_while(is_operator);
                OPERATOR
            }
            _ => UNKNOWN,
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    /// Identifier characters, with `\\x` escaping any non-whitespace `x`.
    fn identifier_rest(&mut self) {
        loop {
            match self.cursor.peek() {
                '\\' if is_escapable(self.cursor.second()) => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                c if is_ident_continue(c) => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    /// Unterminated literals come back as `UNKNOWN`.
    fn string_literal(&mut self) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                '"' => {
                    self.cursor.advance();
                    return STRING_LITERAL;
                }
                '\\' => {
                    self.cursor.advance();
                    if !matches!(self.cursor.peek(), '\n' | '\r') {
                        self.cursor.advance();
                    }
                }
                '\n' | '\r' => return UNKNOWN,
                _ if self.cursor.is_eof() => return UNKNOWN,
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn template_literal(&mut self) -> SyntaxKind {
        self.cursor.advance_while(|c| c != '`');
        if self.cursor.matches('`') {
            self.cursor.advance();
            TEMPLATE_LITERAL
        } else {
            UNKNOWN
        }
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' && matches!(self.cursor.peek(), 'x' | 'X') {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_hexdigit());
            return NUMERIC_LITERAL;
        }

        self.cursor.advance_while(|c| c.is_ascii_digit());
        if self.cursor.matches('.') && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }
        if matches!(self.cursor.peek(), 'e' | 'E') {
            self.cursor.advance();
            if matches!(self.cursor.peek(), '+' | '-') {
                self.cursor.advance();
            }
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }
        if matches!(self.cursor.peek(), 'd' | 'D' | 'f' | 'F') {
            self.cursor.advance();
        }
        NUMERIC_LITERAL
    }
}

fn is_inline_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0C')
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_escapable(c: char) -> bool {
    c != EOF_CHAR && !c.is_whitespace()
}

fn is_operator(c: char) -> bool {
    matches!(c, '=' | '-' | '+' | '*' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~')
}
