use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref DATATYPE_LOOKUP: HashMap<&'static str, Datatype> = {
        let mut map = HashMap::new();
        map.insert("int", Datatype::Int);
        map.insert("decimal", Datatype::Decimal);
        map.insert("bool", Datatype::Bool);
        map.insert("char", Datatype::Char);
        map
    };
}

/// Every reserved word of the language, type keywords included.
pub const KEYWORDS: [&str; 10] = [
    "int", "decimal", "bool", "char", "if", "else", "true", "false", "read", "write",
];

pub const IO_KEYWORDS: [&str; 2] = ["read", "write"];

pub const ARITHMETIC_OPERATORS: [&str; 6] = ["+", "-", "*", "/", "%", "^"];

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum TokenKind {
    StringLiteral,
    Keyword,
    Operator,
    Delimiter,
    Decimal,
    Integer,
    CharLiteral,
    Identifier,
    Comment,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Integer => "INTEGER",
            TokenKind::CharLiteral => "CHAR_LITERAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Comment => "COMMENT",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Primitive types a declaration can start with.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Datatype {
    Int,
    Decimal,
    Bool,
    Char,
}

impl Datatype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Int => "int",
            Datatype::Decimal => "decimal",
            Datatype::Bool => "bool",
            Datatype::Char => "char",
        }
    }
}

impl Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token(type={}, lexeme={}, line={})",
            self.kind, self.lexeme, self.line
        )
    }
}

impl Token {
    pub fn is_arithmetic_operator(&self) -> bool {
        self.kind == TokenKind::Operator && ARITHMETIC_OPERATORS.contains(&self.lexeme.as_str())
    }

    pub fn is_io_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && IO_KEYWORDS.contains(&self.lexeme.as_str())
    }
}
