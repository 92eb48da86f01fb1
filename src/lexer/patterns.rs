use lazy_static::lazy_static;
use regex::Regex;

use super::{
    lexer::{default_handler, delimiter_handler, identifier_handler, keyword_handler, PatternHandler},
    tokens::{TokenKind, KEYWORDS},
};

lazy_static! {
    pub static ref PATTERN_REGISTRY: PatternRegistry = PatternRegistry::new();
    pub static ref WHITESPACE: Regex = anchored(r"[ \t\n\x0B\x0C\r]+");
    pub static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
}

pub const LINE_COMMENT_MARKER: &str = "//";

fn anchored(source: &str) -> Regex {
    Regex::new(&format!("^(?:{})", source)).unwrap()
}

pub struct TokenPattern {
    pub kind: TokenKind,
    source: String,
    regex: Regex,
    pub handler: PatternHandler,
}

impl TokenPattern {
    fn new(kind: TokenKind, source: impl Into<String>, handler: PatternHandler) -> Self {
        let source = source.into();
        let regex = anchored(&source);

        TokenPattern {
            kind,
            source,
            regex,
            handler,
        }
    }

    /// The pattern as written, without the anchor the registry adds.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Matches only at the very start of `text`.
    pub fn match_at<'s>(&self, text: &'s str) -> Option<&'s str> {
        self.regex.find(text).map(|m| m.as_str()).filter(|lexeme| !lexeme.is_empty())
    }
}

/// Token patterns in the order they are tried. Several categories overlap
/// (keywords are also identifiers, `3.14` starts with an integer), so the
/// first entry that matches wins regardless of match length.
pub struct PatternRegistry {
    patterns: Vec<TokenPattern>,
}

impl PatternRegistry {
    pub fn new() -> PatternRegistry {
        PatternRegistry {
            patterns: vec![
                TokenPattern::new(TokenKind::StringLiteral, r#""(\\.|[^"])*""#, default_handler),
                TokenPattern::new(TokenKind::Keyword, format!(r"\b(?:{})\b", KEYWORDS.join("|")), keyword_handler),
                TokenPattern::new(TokenKind::Operator, r"=|>|\+|-|\*|/|%|\^", default_handler),
                TokenPattern::new(TokenKind::Delimiter, r"[;(){}]", delimiter_handler),
                TokenPattern::new(TokenKind::Decimal, r"\b[0-9]+\.[0-9]{1,5}\b", default_handler),
                TokenPattern::new(TokenKind::Integer, r"\b[0-9]+\b", default_handler),
                TokenPattern::new(TokenKind::CharLiteral, r"'(\\.|[^'])'", default_handler),
                TokenPattern::new(TokenKind::Identifier, r"\b[a-z][a-z0-9_]*\b", identifier_handler),
            ],
        }
    }

    pub fn patterns(&self) -> &[TokenPattern] {
        &self.patterns
    }

    pub fn pattern_for(&self, kind: TokenKind) -> Option<&TokenPattern> {
        self.patterns.iter().find(|pattern| pattern.kind == kind)
    }

    /// `(kind, pattern)` pairs in priority order, for tooling that builds
    /// its own recognisers from the token definitions.
    pub fn definitions(&self) -> impl Iterator<Item = (TokenKind, &str)> {
        self.patterns.iter().map(|pattern| (pattern.kind, pattern.source()))
    }

    pub fn match_at<'s>(&self, text: &'s str) -> Option<(&TokenPattern, &'s str)> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.match_at(text).map(|lexeme| (pattern, lexeme)))
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}
