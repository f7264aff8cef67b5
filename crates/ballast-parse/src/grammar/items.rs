use ballast_syntax::SyntaxKind::{self, *};
use ballast_syntax::SyntaxSet;

use super::{balanced, block, exprs, name_reference};
use crate::parser::{CompletedMarker, Parser};

const QUALIFIERS: SyntaxSet =
    SyntaxSet::new([PUBLIC_KW, ISOLATED_KW, FINAL_KW, CONFIGURABLE_KW]);
const MEMBER_KEYWORDS: SyntaxSet = SyntaxSet::new([
    SERVICE_KW,
    FUNCTION_KW,
    LISTENER_KW,
    TYPE_KW,
    CONST_KW,
    CLASS_KW,
    ENUM_KW,
    ANNOTATION_KW,
]);
const ATTACH_POINT_END: SyntaxSet = SyntaxSet::new([ON_KW, LEFT_BRACE]);
const DECLARATION_END: SyntaxSet = SyntaxSet::new([SEMICOLON]);
/// Type descriptors a module variable can start with, besides keywords.
const VAR_START: SyntaxSet = SyntaxSet::new([IDENTIFIER, LEFT_BRACKET, LEFT_PAREN]);

pub(crate) fn module_part(p: &mut Parser) {
    let m = p.start();

    while !p.at(EOF) {
        match p.peek_kind() {
            IMPORT_KW => import_declaration(p),
            kind if kind.is_member_start() || VAR_START.contains(kind) => member(p),
            SEMICOLON => p.error_and_bump("expected a declaration, found `;`"),
            _ => p.error_and_bump("expected a module-level declaration"),
        }
    }

    p.advance_eof();
    m.complete(p, MODULE_PART);
}

/// `import org/name.part [as prefix];`
fn import_declaration(p: &mut Parser) {
    let m = p.start();
    p.advance();
    if !balanced(p, &DECLARATION_END.union(&SyntaxSet::new([IMPORT_KW]))) {
        p.error("expected module name");
    }
    p.expect(SEMICOLON);
    m.complete(p, IMPORT_DECLARATION);
}

fn member(p: &mut Parser) {
    let m = match metadata(p) {
        Some(metadata) => metadata.precede(p),
        None => p.start(),
    };

    while p.at_set(&QUALIFIERS) {
        p.advance();
    }

    let kind = match p.peek_kind() {
        SERVICE_KW => service_declaration(p),
        FUNCTION_KW => other_member(p, FUNCTION_DEFINITION),
        LISTENER_KW => other_member(p, LISTENER_DECLARATION),
        TYPE_KW => other_member(p, TYPE_DEFINITION),
        CONST_KW => other_member(p, CONST_DECLARATION),
        CLASS_KW => other_member(p, CLASS_DEFINITION),
        ENUM_KW => other_member(p, ENUM_DECLARATION),
        ANNOTATION_KW => other_member(p, ANNOTATION_DECLARATION),
        kind if VAR_START.contains(kind) => other_member(p, MODULE_VAR_DECLARATION),
        _ => {
            p.error("expected a declaration");
            ERROR
        }
    };

    m.complete(p, kind);
}

/// Documentation lines followed by annotations.
fn metadata(p: &mut Parser) -> Option<CompletedMarker> {
    if !p.at(DOCUMENTATION_LINE) && !p.at(AT) {
        return None;
    }

    let m = p.start();
    if p.at(DOCUMENTATION_LINE) {
        let doc = p.start();
        while p.at(DOCUMENTATION_LINE) {
            p.advance();
        }
        doc.complete(p, DOCUMENTATION);
    }
    while p.at(AT) {
        annotation(p);
    }
    Some(m.complete(p, METADATA))
}

/// `@reference [{ fields }]`
fn annotation(p: &mut Parser) {
    let m = p.start();
    p.advance();
    name_reference(p, &MEMBER_KEYWORDS.union(&QUALIFIERS).with(AT).with(LEFT_BRACE));
    if p.at(LEFT_BRACE) {
        exprs::mapping_constructor(p);
    }
    m.complete(p, ANNOTATION);
}

/// `[isolated] service [type] [attach-point] on expr, ... { body }`
///
/// Qualifiers were consumed by the caller. `service class` is a class
/// definition and is kept as a flat run.
fn service_declaration(p: &mut Parser) -> SyntaxKind {
    p.advance();
    if p.at(CLASS_KW) {
        return other_member(p, CLASS_DEFINITION);
    }

    if p.at(IDENTIFIER) {
        name_reference(p, &ATTACH_POINT_END);
    }

    match p.peek_kind() {
        SLASH => absolute_resource_path(p),
        STRING_LITERAL => p.advance(),
        _ => {}
    }

    if p.expect(ON_KW) {
        exprs::expression_list(p);
    }

    if p.at(LEFT_BRACE) {
        let m = p.start();
        block(p, "unclosed service body");
        m.complete(p, SERVICE_BODY);
    } else {
        p.error("expected service body");
    }
    SERVICE_DECLARATION
}

/// `/` or `/seg/seg...`
fn absolute_resource_path(p: &mut Parser) {
    let m = p.start();
    while p.eat(SLASH) {
        p.eat(IDENTIFIER);
    }
    m.complete(p, ABSOLUTE_RESOURCE_PATH);
}

/// Members whose contents never matter here are kept as flat token runs.
///
/// A run ends after a `;` at depth zero, or after a closing `}` at depth zero
/// when the next token cannot continue the declaration.
fn other_member(p: &mut Parser, mut kind: SyntaxKind) -> SyntaxKind {
    let mut depth = 0usize;

    loop {
        match p.peek_kind() {
            EOF => {
                p.error("unexpected end of file in declaration");
                return kind;
            }
            SEMICOLON if depth == 0 => {
                p.advance();
                return kind;
            }
            CLASS_KW if depth == 0 && kind == MODULE_VAR_DECLARATION => {
                kind = CLASS_DEFINITION;
                p.advance();
            }
            LEFT_PAREN | LEFT_BRACE | LEFT_BRACKET => {
                depth += 1;
                p.advance();
            }
            RIGHT_PAREN | RIGHT_BRACE | RIGHT_BRACKET => {
                if depth == 0 {
                    p.error_and_bump("unmatched closing delimiter");
                    continue;
                }
                let closes_brace = p.at(RIGHT_BRACE);
                depth -= 1;
                p.advance();
                if closes_brace && depth == 0 && ends_declaration(p.peek_kind()) {
                    return kind;
                }
            }
            _ => p.advance(),
        }
    }
}

fn ends_declaration(next: SyntaxKind) -> bool {
    next == EOF || next == IMPORT_KW || VAR_START.contains(next) || next.is_member_start()
}
