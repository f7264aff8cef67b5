use ballast_syntax::SyntaxKind::*;
use ballast_syntax::SyntaxSet;

use super::{balanced, delimited};
use crate::parser::Parser;

/// Where an expression inside a mapping constructor ends.
const FIELD_END: SyntaxSet = SyntaxSet::new([COMMA, RIGHT_BRACE, SEMICOLON]);
/// Where a listener expression of a service ends; `{` opens the body.
const LISTENER_END: SyntaxSet = SyntaxSet::new([COMMA, LEFT_BRACE, SEMICOLON]);
const FIELD_FIRST: SyntaxSet = SyntaxSet::new([IDENTIFIER, STRING_LITERAL, ELLIPSIS]);

/// An opaque expression: every token up to `stop` at bracket depth zero.
pub(super) fn expression(p: &mut Parser, stop: &SyntaxSet) -> bool {
    let m = p.start();
    if balanced(p, stop) {
        m.complete(p, EXPRESSION);
        true
    } else {
        m.abandon(p);
        p.error("expected expression");
        false
    }
}

/// `expr (, expr)*` in front of a service body.
pub(super) fn expression_list(p: &mut Parser) {
    let m = p.start();
    loop {
        if !expression(p, &LISTENER_END) {
            break;
        }
        if !p.eat(COMMA) {
            break;
        }
    }
    m.complete(p, EXPRESSION_LIST);
}

/// `{ field, ... }`
pub(super) fn mapping_constructor(p: &mut Parser) {
    let m = p.start();
    delimited(
        p,
        LEFT_BRACE,
        RIGHT_BRACE,
        COMMA,
        "expected field, found `,`",
        &FIELD_FIRST,
        field,
    );
    m.complete(p, MAPPING_CONSTRUCTOR);
}

fn field(p: &mut Parser) -> bool {
    match p.peek_kind() {
        ELLIPSIS => {
            let m = p.start();
            p.advance();
            expression(p, &FIELD_END);
            m.complete(p, SPREAD_FIELD);
            true
        }
        IDENTIFIER | STRING_LITERAL => {
            let m = p.start();
            p.advance();
            if p.eat(COLON) {
                field_value(p);
            }
            m.complete(p, SPECIFIC_FIELD);
            true
        }
        _ => {
            p.error("expected field name");
            false
        }
    }
}

fn field_value(p: &mut Parser) {
    if p.at(LEFT_BRACE) {
        mapping_constructor(p);
    } else {
        expression(p, &FIELD_END);
    }
}
