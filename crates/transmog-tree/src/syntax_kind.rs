/// Token and node kinds of the Java syntax tree.
///
/// Node kinds without a token of their own (`EXPR`, `OBJBLOCK`, ...) are
/// produced by the parser or synthesized by the editor.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    ROOT,
    FILE,

    PACKAGE_DEF,
    IMPORT,
    CLASS_DEF,
    INTERFACE_DEF,
    OBJBLOCK,
    MODIFIERS,
    TYPE,
    METHOD_DEF,
    CTOR_DEF,
    VARIABLE_DEF,
    PARAMETERS,
    PARAMETER_DEF,
    SLIST,
    EXPR,
    ELIST,
    METHOD_CALL,
    ARRAY_DECLARATOR,
    INDEX_OP,
    TYPECAST,

    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    SEMICOLON,
    COMMA,
    DOT,
    ASSIGN,
    PLUS_ASSIGN,
    MINUS_ASSIGN,
    EQ_EQ,
    NOT_EQ,
    LT,
    GT,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    INC,
    DEC,
    BANG,

    PACKAGE_KW,
    IMPORT_KW,
    CLASS_KW,
    INTERFACE_KW,
    EXTENDS_KW,
    PUBLIC_KW,
    PROTECTED_KW,
    PRIVATE_KW,
    STATIC_KW,
    FINAL_KW,
    VOID_KW,
    INT_KW,
    BOOLEAN_KW,
    NEW_KW,
    THIS_KW,
    RETURN_KW,
    WHILE_KW,
    FOR_KW,
    DO_KW,
    IF_KW,
    ELSE_KW,
    SWITCH_KW,
    CASE_KW,
    TRY_KW,
    CATCH_KW,
    FINALLY_KW,
    THROW_KW,

    IDENT,
    NUM_INT,
    STRING_LITERAL,
    CHAR_LITERAL,
}

impl SyntaxKind {
    /// The text a node of this kind carries when the editor synthesizes it.
    ///
    /// Tokens use their source spelling; group nodes use their kind name.
    pub const fn canonical_text(self) -> &'static str {
        use SyntaxKind::*;
        match self {
            ROOT | FILE => "",
            PACKAGE_DEF => "package",
            IMPORT => "import",
            CLASS_DEF => "CLASS_DEF",
            INTERFACE_DEF => "INTERFACE_DEF",
            OBJBLOCK => "OBJBLOCK",
            MODIFIERS => "MODIFIERS",
            TYPE => "TYPE",
            METHOD_DEF => "METHOD_DEF",
            CTOR_DEF => "CTOR_DEF",
            VARIABLE_DEF => "VARIABLE_DEF",
            PARAMETERS => "PARAMETERS",
            PARAMETER_DEF => "PARAMETER_DEF",
            SLIST => "{",
            EXPR => "EXPR",
            ELIST => "ELIST",
            METHOD_CALL => "(",
            ARRAY_DECLARATOR => "[",
            INDEX_OP => "[",
            TYPECAST => "(",
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            SEMICOLON => ";",
            COMMA => ",",
            DOT => ".",
            ASSIGN => "=",
            PLUS_ASSIGN => "+=",
            MINUS_ASSIGN => "-=",
            EQ_EQ => "==",
            NOT_EQ => "!=",
            LT => "<",
            GT => ">",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            INC => "++",
            DEC => "--",
            BANG => "!",
            PACKAGE_KW => "package",
            IMPORT_KW => "import",
            CLASS_KW => "class",
            INTERFACE_KW => "interface",
            EXTENDS_KW => "extends",
            PUBLIC_KW => "public",
            PROTECTED_KW => "protected",
            PRIVATE_KW => "private",
            STATIC_KW => "static",
            FINAL_KW => "final",
            VOID_KW => "void",
            INT_KW => "int",
            BOOLEAN_KW => "boolean",
            NEW_KW => "new",
            THIS_KW => "this",
            RETURN_KW => "return",
            WHILE_KW => "while",
            FOR_KW => "for",
            DO_KW => "do",
            IF_KW => "if",
            ELSE_KW => "else",
            SWITCH_KW => "switch",
            CASE_KW => "case",
            TRY_KW => "try",
            CATCH_KW => "catch",
            FINALLY_KW => "finally",
            THROW_KW => "throw",
            IDENT => "IDENT",
            NUM_INT => "NUM_INT",
            STRING_LITERAL => "STRING_LITERAL",
            CHAR_LITERAL => "CHAR_LITERAL",
        }
    }
}
