//! Token definitions for the record language

use crate::utils::Span;
use std::fmt;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            span,
        }
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ============ Keywords ============
    /// TYPE
    Type,
    /// RECORD
    Record,
    /// VAR
    Var,
    /// BEGIN
    Begin,
    /// END
    End,
    /// IF
    If,
    /// THEN
    Then,
    /// ELSE
    Else,
    /// WHILE
    While,
    /// DO
    Do,
    /// INTEGER
    Integer,
    /// REAL
    Real,
    /// BOOLEAN
    Boolean,
    /// OR
    Or,
    /// DIV
    Div,
    /// MOD
    Mod,
    /// AND
    And,
    /// NOT
    Not,
    /// TRUE
    True,
    /// FALSE
    False,
    /// NEW
    New,
    /// POINTER
    Pointer,
    /// TO
    To,

    // ============ Identifiers and Literals ============
    /// Variable name (starts with a lowercase letter)
    VarName(String),
    /// Record type name (starts with an uppercase letter)
    TypeName(String),
    /// Integer literal
    IntLit(i64),
    /// Real literal
    RealLit(f64),

    // ============ Operators and Delimiters ============
    /// :=
    Assign,
    /// :
    Colon,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// .
    Dot,
    /// ^
    Caret,
    /// =
    Eq,
    /// #
    Hash,
    /// <
    Lt,
    /// <=
    Le,
    /// >
    Gt,
    /// >=
    Ge,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// (
    LParen,
    /// )
    RParen,

    // ============ Special ============
    /// End of file
    Eof,
}

impl TokenKind {
    /// Try to convert an identifier to a keyword.
    ///
    /// Keywords are all uppercase, so they can only collide with type names;
    /// the keyword table is checked first, giving it the higher priority.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "TYPE" => Some(TokenKind::Type),
            "RECORD" => Some(TokenKind::Record),
            "VAR" => Some(TokenKind::Var),
            "BEGIN" => Some(TokenKind::Begin),
            "END" => Some(TokenKind::End),
            "IF" => Some(TokenKind::If),
            "THEN" => Some(TokenKind::Then),
            "ELSE" => Some(TokenKind::Else),
            "WHILE" => Some(TokenKind::While),
            "DO" => Some(TokenKind::Do),
            "INTEGER" => Some(TokenKind::Integer),
            "REAL" => Some(TokenKind::Real),
            "BOOLEAN" => Some(TokenKind::Boolean),
            "OR" => Some(TokenKind::Or),
            "DIV" => Some(TokenKind::Div),
            "MOD" => Some(TokenKind::Mod),
            "AND" => Some(TokenKind::And),
            "NOT" => Some(TokenKind::Not),
            "TRUE" => Some(TokenKind::True),
            "FALSE" => Some(TokenKind::False),
            "NEW" => Some(TokenKind::New),
            "POINTER" => Some(TokenKind::Pointer),
            "TO" => Some(TokenKind::To),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    /// The surface form of the token, used in error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Type => write!(f, "TYPE"),
            TokenKind::Record => write!(f, "RECORD"),
            TokenKind::Var => write!(f, "VAR"),
            TokenKind::Begin => write!(f, "BEGIN"),
            TokenKind::End => write!(f, "END"),
            TokenKind::If => write!(f, "IF"),
            TokenKind::Then => write!(f, "THEN"),
            TokenKind::Else => write!(f, "ELSE"),
            TokenKind::While => write!(f, "WHILE"),
            TokenKind::Do => write!(f, "DO"),
            TokenKind::Integer => write!(f, "INTEGER"),
            TokenKind::Real => write!(f, "REAL"),
            TokenKind::Boolean => write!(f, "BOOLEAN"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Div => write!(f, "DIV"),
            TokenKind::Mod => write!(f, "MOD"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::True => write!(f, "TRUE"),
            TokenKind::False => write!(f, "FALSE"),
            TokenKind::New => write!(f, "NEW"),
            TokenKind::Pointer => write!(f, "POINTER"),
            TokenKind::To => write!(f, "TO"),
            TokenKind::VarName(name) => write!(f, "{}", name),
            TokenKind::TypeName(name) => write!(f, "{}", name),
            TokenKind::IntLit(value) => write!(f, "{}", value),
            TokenKind::RealLit(value) => write!(f, "{}", value),
            TokenKind::Assign => write!(f, ":="),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::Hash => write!(f, "#"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Le => write!(f, "<="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Ge => write!(f, ">="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
