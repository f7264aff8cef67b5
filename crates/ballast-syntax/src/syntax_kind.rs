#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    AT,
    COLON,
    SEMICOLON,
    COMMA,
    DOT,
    ELLIPSIS,
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    EQ,
    SLASH,
    QUESTION,
    OPERATOR,

    ANNOTATION_KW,
    AS_KW,
    CLASS_KW,
    CONFIGURABLE_KW,
    CONST_KW,
    ENUM_KW,
    FINAL_KW,
    FUNCTION_KW,
    IMPORT_KW,
    ISOLATED_KW,
    LISTENER_KW,
    NEW_KW,
    ON_KW,
    PUBLIC_KW,
    SERVICE_KW,
    TYPE_KW,

    IDENTIFIER,
    STRING_LITERAL,
    TEMPLATE_LITERAL,
    NUMERIC_LITERAL,
    DOCUMENTATION_LINE,

    WHITESPACE,
    NEWLINE,
    LINE_COMMENT,

    UNKNOWN,
    EOF,

    MODULE_PART,
    IMPORT_DECLARATION,
    SERVICE_DECLARATION,
    FUNCTION_DEFINITION,
    LISTENER_DECLARATION,
    TYPE_DEFINITION,
    CONST_DECLARATION,
    CLASS_DEFINITION,
    ENUM_DECLARATION,
    ANNOTATION_DECLARATION,
    MODULE_VAR_DECLARATION,
    METADATA,
    DOCUMENTATION,
    ANNOTATION,
    QUALIFIED_NAME_REFERENCE,
    SIMPLE_NAME_REFERENCE,
    ABSOLUTE_RESOURCE_PATH,
    EXPRESSION_LIST,
    EXPRESSION,
    MAPPING_CONSTRUCTOR,
    SPECIFIC_FIELD,
    SPREAD_FIELD,
    SERVICE_BODY,
    ERROR,
    TOMBSTONE,
}

impl SyntaxKind {
    /// Returns `true` for whitespace, newlines and comments.
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::LINE_COMMENT)
    }

    pub const fn is_keyword(self) -> bool {
        self as u16 >= Self::ANNOTATION_KW as u16 && self as u16 <= Self::TYPE_KW as u16
    }

    /// Kinds a module member may start with, qualifiers included.
    pub const fn is_member_start(self) -> bool {
        matches!(
            self,
            Self::AT
                | Self::DOCUMENTATION_LINE
                | Self::PUBLIC_KW
                | Self::ISOLATED_KW
                | Self::FINAL_KW
                | Self::CONFIGURABLE_KW
                | Self::SERVICE_KW
                | Self::FUNCTION_KW
                | Self::LISTENER_KW
                | Self::TYPE_KW
                | Self::CONST_KW
                | Self::CLASS_KW
                | Self::ENUM_KW
                | Self::ANNOTATION_KW
        )
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "annotation" => Self::ANNOTATION_KW,
            "as" => Self::AS_KW,
            "class" => Self::CLASS_KW,
            "configurable" => Self::CONFIGURABLE_KW,
            "const" => Self::CONST_KW,
            "enum" => Self::ENUM_KW,
            "final" => Self::FINAL_KW,
            "function" => Self::FUNCTION_KW,
            "import" => Self::IMPORT_KW,
            "isolated" => Self::ISOLATED_KW,
            "listener" => Self::LISTENER_KW,
            "new" => Self::NEW_KW,
            "on" => Self::ON_KW,
            "public" => Self::PUBLIC_KW,
            "service" => Self::SERVICE_KW,
            "type" => Self::TYPE_KW,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind;

    #[test]
    fn keywords_round_trip() {
        for text in ["service", "on", "import", "isolated", "type", "annotation"] {
            let kind = SyntaxKind::from_keyword(text).unwrap();
            assert!(kind.is_keyword(), "{kind:?}");
        }
        assert_eq!(SyntaxKind::from_keyword("ServiceConfig"), None);
        assert!(!SyntaxKind::IDENTIFIER.is_keyword());
    }
}
