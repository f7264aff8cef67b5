//! Lossless, immutable syntax tree with structural sharing.
//!
//! The green layer holds `Arc`-shared nodes without positions; the red layer
//! (`SyntaxNode`, `SyntaxToken`) adds offsets and parent links on demand.
//! Edits return new trees and never touch the old one.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod green;
/// Constructors for synthesized nodes and tokens.
pub mod make;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Event-driven green tree construction.
pub use builder::Builder;
/// Position-independent tree storage.
pub use green::{GreenElement, GreenNode, GreenToken};
/// Primary syntax tree API types.
pub use syntax::{
    NodeOrToken, SyntaxElement, SyntaxElementChildren, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
    SyntaxTree,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind};
