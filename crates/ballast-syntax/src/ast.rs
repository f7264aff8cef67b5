use std::marker::PhantomData;

use crate::SyntaxKind::{self, *};
use crate::{
    GreenNode, GreenToken, GreenTrivia, NodeOrToken, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

pub trait AstNode {
    fn can_cast(kind: SyntaxKind) -> bool
    where
        Self: Sized;

    fn cast(syntax: SyntaxNode) -> Option<Self>
    where
        Self: Sized;

    fn syntax(&self) -> &SyntaxNode;

    fn green(&self) -> &GreenNode {
        self.syntax().green()
    }
}

/// Typed iterator over the children of a node that cast to `N`.
#[derive(Clone)]
pub struct AstChildren<N> {
    inner: SyntaxNodeChildren,
    _marker: PhantomData<N>,
}

impl<N> AstChildren<N> {
    fn new(parent: &SyntaxNode) -> Self {
        Self { inner: parent.children(), _marker: PhantomData }
    }
}

impl<N: AstNode> Iterator for AstChildren<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        self.inner.find_map(N::cast)
    }
}

fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    AstChildren::new(parent).next()
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == $kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then(|| Self(syntax))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(
    /// Root of a document: imports, then members, then `EOF`.
    ModulePart => MODULE_PART
);
ast_node!(ImportDeclaration => IMPORT_DECLARATION);
ast_node!(
    /// `[metadata] [isolated] service [type] [attach-point] on exprs { ... }`
    ServiceDeclaration => SERVICE_DECLARATION
);
ast_node!(FunctionDefinition => FUNCTION_DEFINITION);
ast_node!(ListenerDeclaration => LISTENER_DECLARATION);
ast_node!(TypeDefinition => TYPE_DEFINITION);
ast_node!(ConstDeclaration => CONST_DECLARATION);
ast_node!(ClassDefinition => CLASS_DEFINITION);
ast_node!(EnumDeclaration => ENUM_DECLARATION);
ast_node!(AnnotationDeclaration => ANNOTATION_DECLARATION);
ast_node!(ModuleVarDeclaration => MODULE_VAR_DECLARATION);
ast_node!(
    /// Documentation lines followed by annotations.
    Metadata => METADATA
);
ast_node!(Documentation => DOCUMENTATION);
ast_node!(Annotation => ANNOTATION);
ast_node!(
    /// `module:identifier`
    QualifiedNameReference => QUALIFIED_NAME_REFERENCE
);
ast_node!(SimpleNameReference => SIMPLE_NAME_REFERENCE);
ast_node!(AbsoluteResourcePath => ABSOLUTE_RESOURCE_PATH);
ast_node!(ExpressionList => EXPRESSION_LIST);
ast_node!(Expression => EXPRESSION);
ast_node!(MappingConstructor => MAPPING_CONSTRUCTOR);
ast_node!(
    /// `key: value`, or a bare `key` shorthand.
    SpecificField => SPECIFIC_FIELD
);
ast_node!(SpreadField => SPREAD_FIELD);
ast_node!(ServiceBody => SERVICE_BODY);

impl ModulePart {
    pub fn imports(&self) -> AstChildren<ImportDeclaration> {
        AstChildren::new(&self.0)
    }

    pub fn members(&self) -> AstChildren<ModuleMember> {
        AstChildren::new(&self.0)
    }

    pub fn eof_token(&self) -> Option<SyntaxToken> {
        self.0.child_token(EOF)
    }

    /// Rebuilds the module part with `members` in the member slots, in order.
    ///
    /// Imports, the `EOF` token and any stray error nodes keep their place.
    /// Returns `None` if `members` does not have one entry per member slot.
    pub fn with_members(&self, members: Vec<GreenNode>) -> Option<GreenNode> {
        let mut members = members.into_iter();
        let children = self
            .green()
            .children()
            .iter()
            .map(|child| match child {
                NodeOrToken::Node(node) if ModuleMember::can_cast(node.kind()) => {
                    members.next().map(NodeOrToken::Node)
                }
                other => Some(other.clone()),
            })
            .collect::<Option<Vec<_>>>()?;
        if members.next().is_some() {
            return None;
        }
        Some(GreenNode::new(MODULE_PART, children))
    }
}

impl ImportDeclaration {
    /// `org/name.part`, without the prefix alias.
    pub fn module_path(&self) -> String {
        let mut path = String::new();
        for token in self.0.descendant_tokens() {
            match token.kind() {
                IMPORT_KW | SEMICOLON => {}
                AS_KW => break,
                _ => path.push_str(token.text_trimmed()),
            }
        }
        path
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleMember {
    Service(ServiceDeclaration),
    Function(FunctionDefinition),
    Listener(ListenerDeclaration),
    Type(TypeDefinition),
    Const(ConstDeclaration),
    Class(ClassDefinition),
    Enum(EnumDeclaration),
    AnnotationDecl(AnnotationDeclaration),
    Var(ModuleVarDeclaration),
}

impl AstNode for ModuleMember {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SERVICE_DECLARATION
                | FUNCTION_DEFINITION
                | LISTENER_DECLARATION
                | TYPE_DEFINITION
                | CONST_DECLARATION
                | CLASS_DEFINITION
                | ENUM_DECLARATION
                | ANNOTATION_DECLARATION
                | MODULE_VAR_DECLARATION
        )
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        Some(match syntax.kind() {
            SERVICE_DECLARATION => Self::Service(ServiceDeclaration(syntax)),
            FUNCTION_DEFINITION => Self::Function(FunctionDefinition(syntax)),
            LISTENER_DECLARATION => Self::Listener(ListenerDeclaration(syntax)),
            TYPE_DEFINITION => Self::Type(TypeDefinition(syntax)),
            CONST_DECLARATION => Self::Const(ConstDeclaration(syntax)),
            CLASS_DEFINITION => Self::Class(ClassDefinition(syntax)),
            ENUM_DECLARATION => Self::Enum(EnumDeclaration(syntax)),
            ANNOTATION_DECLARATION => Self::AnnotationDecl(AnnotationDeclaration(syntax)),
            MODULE_VAR_DECLARATION => Self::Var(ModuleVarDeclaration(syntax)),
            _ => return None,
        })
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Service(it) => it.syntax(),
            Self::Function(it) => it.syntax(),
            Self::Listener(it) => it.syntax(),
            Self::Type(it) => it.syntax(),
            Self::Const(it) => it.syntax(),
            Self::Class(it) => it.syntax(),
            Self::Enum(it) => it.syntax(),
            Self::AnnotationDecl(it) => it.syntax(),
            Self::Var(it) => it.syntax(),
        }
    }
}

impl ModuleMember {
    /// Metadata of any member kind; every declaration may carry one.
    pub fn metadata(&self) -> Option<Metadata> {
        child(self.syntax())
    }
}

/// Where a service is attached: `/a/b` or `"name"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachPoint {
    ResourcePath(AbsoluteResourcePath),
    StringLiteral(SyntaxToken),
}

impl ServiceDeclaration {
    pub fn metadata(&self) -> Option<Metadata> {
        child(&self.0)
    }

    pub fn isolated_token(&self) -> Option<SyntaxToken> {
        self.0.child_token(ISOLATED_KW)
    }

    pub fn service_keyword(&self) -> Option<SyntaxToken> {
        self.0.child_token(SERVICE_KW)
    }

    /// The declared service type, absent for untyped services.
    pub fn type_descriptor(&self) -> Option<TypeDescriptor> {
        child(&self.0)
    }

    pub fn attach_point(&self) -> Option<AttachPoint> {
        if let Some(path) = child(&self.0) {
            return Some(AttachPoint::ResourcePath(path));
        }
        self.0.child_token(STRING_LITERAL).map(AttachPoint::StringLiteral)
    }

    pub fn on_keyword(&self) -> Option<SyntaxToken> {
        self.0.child_token(ON_KW)
    }

    pub fn expressions(&self) -> Option<ExpressionList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<ServiceBody> {
        child(&self.0)
    }

    /// Returns this declaration with `metadata` in its metadata slot.
    ///
    /// When the declaration had no metadata, the leading trivia of its first
    /// token moves to the front of the new metadata, so the annotation lands
    /// right above the declaration and every original token keeps its text.
    pub fn with_metadata(&self, metadata: GreenNode) -> GreenNode {
        let green = self.green();
        let slot = green
            .children()
            .iter()
            .position(|child| child.as_node().is_some_and(|node| node.kind() == METADATA));
        match slot {
            Some(index) => green.replace_child(index, NodeOrToken::Node(metadata)),
            None => {
                let (trivia, text, declaration) = take_leading_trivia(green);
                let metadata = if trivia.is_empty() {
                    metadata
                } else {
                    metadata.map_first_token(|token| token.with_leading(trivia, &text))
                };
                declaration.insert_child(0, NodeOrToken::Node(metadata))
            }
        }
    }
}

impl Metadata {
    pub fn documentation(&self) -> Option<Documentation> {
        child(&self.0)
    }

    pub fn annotations(&self) -> AstChildren<Annotation> {
        AstChildren::new(&self.0)
    }

    /// Returns this metadata with `annotation` appended after the existing ones.
    pub fn with_annotation_appended(&self, annotation: GreenNode) -> GreenNode {
        let green = self.green();
        green.insert_child(green.children().len(), NodeOrToken::Node(annotation))
    }
}

impl Documentation {
    /// Documentation text with the `#` markers removed, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        self.0
            .descendant_tokens()
            .iter()
            .filter(|token| token.kind() == DOCUMENTATION_LINE)
            .map(|token| token.text_trimmed().trim_start_matches('#').trim().to_owned())
            .collect()
    }
}

impl Annotation {
    pub fn at_token(&self) -> Option<SyntaxToken> {
        self.0.child_token(AT)
    }

    pub fn annot_reference(&self) -> Option<NameReference> {
        child(&self.0)
    }

    pub fn annot_value(&self) -> Option<MappingConstructor> {
        child(&self.0)
    }
}

/// A reference to a named entity, possibly module-qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameReference {
    Qualified(QualifiedNameReference),
    Simple(SimpleNameReference),
}

/// The type descriptors a service declaration can carry.
pub type TypeDescriptor = NameReference;

impl AstNode for NameReference {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, QUALIFIED_NAME_REFERENCE | SIMPLE_NAME_REFERENCE)
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            QUALIFIED_NAME_REFERENCE => Some(Self::Qualified(QualifiedNameReference(syntax))),
            SIMPLE_NAME_REFERENCE => Some(Self::Simple(SimpleNameReference(syntax))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Qualified(it) => it.syntax(),
            Self::Simple(it) => it.syntax(),
        }
    }
}

impl QualifiedNameReference {
    pub fn module_prefix(&self) -> Option<SyntaxToken> {
        self.0.child_token(IDENTIFIER)
    }

    pub fn colon_token(&self) -> Option<SyntaxToken> {
        self.0.child_token(COLON)
    }

    pub fn identifier(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .skip_while(|token| token.kind() != COLON)
            .find(|token| token.kind() == IDENTIFIER)
    }
}

impl SimpleNameReference {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0.child_token(IDENTIFIER)
    }
}

impl AbsoluteResourcePath {
    /// Path segments without the separators.
    pub fn segments(&self) -> Vec<String> {
        self.0
            .descendant_tokens()
            .iter()
            .filter(|token| token.kind() != SLASH)
            .map(|token| token.text_trimmed().to_owned())
            .collect()
    }
}

impl ExpressionList {
    pub fn expressions(&self) -> AstChildren<Expression> {
        AstChildren::new(&self.0)
    }
}

impl MappingConstructor {
    pub fn open_brace(&self) -> Option<SyntaxToken> {
        self.0.child_token(LEFT_BRACE)
    }

    pub fn fields(&self) -> AstChildren<MappingField> {
        AstChildren::new(&self.0)
    }

    pub fn close_brace(&self) -> Option<SyntaxToken> {
        self.0.child_token(RIGHT_BRACE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingField {
    Specific(SpecificField),
    Spread(SpreadField),
}

impl AstNode for MappingField {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SPECIFIC_FIELD | SPREAD_FIELD)
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            SPECIFIC_FIELD => Some(Self::Specific(SpecificField(syntax))),
            SPREAD_FIELD => Some(Self::Spread(SpreadField(syntax))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Specific(it) => it.syntax(),
            Self::Spread(it) => it.syntax(),
        }
    }
}

impl SpecificField {
    /// The key: an identifier or a string literal.
    pub fn field_name(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .find(|token| matches!(token.kind(), IDENTIFIER | STRING_LITERAL))
    }

    pub fn colon_token(&self) -> Option<SyntaxToken> {
        self.0.child_token(COLON)
    }

    pub fn value_expr(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }
}

impl SpreadField {
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }
}

/// Splits the leading trivia off the first token of `node`.
fn take_leading_trivia(node: &GreenNode) -> (GreenTrivia, String, GreenNode) {
    match node.first_token() {
        Some(token) if !token.leading().is_empty() => (
            token.leading().clone(),
            token.leading_text().to_owned(),
            node.map_first_token(GreenToken::without_leading),
        ),
        _ => (GreenTrivia::empty(), String::new(), node.clone()),
    }
}
