use ballast_syntax::SyntaxKind::{self, *};
use ballast_syntax::SyntaxSet;

use crate::parser::Parser;

mod exprs;
pub(crate) mod items;

/// `identifier` or `prefix:identifier`.
pub(crate) fn name_reference(p: &mut Parser, recovery: &SyntaxSet) {
    if !p.at(IDENTIFIER) {
        p.error_recover("expected identifier", recovery);
        return;
    }

    let m = p.start();
    p.advance();
    if p.eat(COLON) {
        p.expect(IDENTIFIER);
        m.complete(p, QUALIFIED_NAME_REFERENCE);
    } else {
        m.complete(p, SIMPLE_NAME_REFERENCE);
    }
}

pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_delim_message: &'static str,
    first_set: &SyntaxSet,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    debug_assert_eq!(p.peek_kind(), bra);
    p.advance();

    while !p.at(ket) && !p.at(EOF) {
        if p.at(delim) {
            let m = p.start();
            p.error(unexpected_delim_message);
            p.advance();
            m.complete(p, ERROR);
            continue;
        }

        if !parser(p) {
            break;
        }

        if !p.eat(delim) {
            if first_set.contains(p.peek_kind()) {
                p.expect(delim);
            } else {
                break;
            }
        }
    }

    p.expect(ket);
}

/// Consumes tokens up to (not including) the first token in `stop` that
/// sits outside any bracket pair. Returns `false` if nothing was consumed.
pub(crate) fn balanced(p: &mut Parser, stop: &SyntaxSet) -> bool {
    let mut depth = 0usize;
    let mut consumed = false;

    loop {
        let kind = p.peek_kind();
        if kind == EOF || (depth == 0 && stop.contains(kind)) {
            return consumed;
        }
        match kind {
            LEFT_PAREN | LEFT_BRACE | LEFT_BRACKET => depth += 1,
            RIGHT_PAREN | RIGHT_BRACE | RIGHT_BRACKET => {
                if depth == 0 {
                    return consumed;
                }
                depth -= 1;
            }
            _ => {}
        }
        p.advance();
        consumed = true;
    }
}

/// Consumes a `{ ... }` block including both braces.
pub(crate) fn block(p: &mut Parser, unclosed_message: &str) {
    debug_assert!(p.at(LEFT_BRACE));
    p.advance();
    balanced(p, &SyntaxSet::EMPTY);
    if !p.eat(RIGHT_BRACE) {
        p.error(unclosed_message);
    }
}
