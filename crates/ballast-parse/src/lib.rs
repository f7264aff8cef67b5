//! Lossless parser for the module-level structure of Ballerina sources.
//!
//! Only what a declaration-level rewrite needs is parsed structurally:
//! imports, member boundaries, metadata, and service headers. Everything
//! else is kept as flat token runs inside its member node, so printing the
//! tree reproduces the input byte for byte.

use ballast_errors::Diagnostic;
use ballast_inputs::File;
use ballast_syntax::{SyntaxTree, ast};

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    tree: SyntaxTree,
    diagnostics: Vec<Diagnostic>,
}

unsafe impl salsa::Update for Parse {
    unsafe fn maybe_update(old_pointer: *mut Self, new_value: Self) -> bool {
        let old_value = unsafe { &mut *old_pointer };
        if *old_value == new_value {
            false
        } else {
            *old_value = new_value;
            true
        }
    }
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn module_part(&self) -> ast::ModulePart {
        use ast::AstNode as _;

        ast::ModulePart::cast(self.tree.root()).expect("root is always a module part")
    }
}

/// Parses one document.
pub fn parse_module(text: &str) -> Parse {
    let mut parser = parser::Parser::new(text);
    grammar::items::module_part(&mut parser);
    let (root, diagnostics) = parser.build_tree();
    Parse { tree: SyntaxTree::new(root), diagnostics }
}

#[salsa::tracked(returns(ref), no_eq)]
fn parse_file(db: &dyn salsa::Database, file: File) -> Parse {
    parse_module(file.text(db))
}

pub trait FileParse {
    fn parse(self, db: &dyn salsa::Database) -> &Parse;
}

impl FileParse for File {
    fn parse(self, db: &dyn salsa::Database) -> &Parse {
        parse_file(db, self)
    }
}
