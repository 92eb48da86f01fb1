use std::{collections::BTreeSet, ops::RangeInclusive, time::Instant};

use log::{debug, trace};

use crate::{
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    line_at_offset,
    symbols::symbol_table::{ScopeTag, SymbolCategory, SymbolTable},
    MK_TOKEN,
};

use super::{
    patterns::{PatternRegistry, BLOCK_COMMENT, LINE_COMMENT_MARKER, PATTERN_REGISTRY, WHITESPACE},
    tokens::{Datatype, Token, TokenKind, DATATYPE_LOOKUP},
};

pub type PatternHandler = fn(&mut Lexer, &mut ScanState, TokenKind, &str);

/// Per-run scan state threaded through the pattern handlers.
#[derive(Debug, Default, Clone)]
pub struct ScanState {
    pub line: usize,
    /// Type keyword waiting for the identifier it declares.
    pub pending_datatype: Option<Datatype>,
}

pub struct Lexer {
    registry: &'static PatternRegistry,
    tokens: Vec<Token>,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
}

/// Everything a run produced. Block comments come first in `tokens`,
/// ahead of the tokens of the lines around them.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
}

impl Analysis {
    pub fn tokens_in_source_order(&self) -> Vec<&Token> {
        let mut tokens = self.tokens.iter().collect::<Vec<&Token>>();
        tokens.sort_by_key(|token| token.line);
        tokens
    }

    pub fn observed_kinds(&self) -> BTreeSet<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }

    pub fn register_literals(&mut self) {
        self.symbols.register_literals(&self.tokens, &mut self.diagnostics);
    }
}

impl Lexer {
    pub fn new() -> Lexer {
        Lexer::with_symbol_table(SymbolTable::new())
    }

    pub fn with_symbol_table(symbols: SymbolTable) -> Lexer {
        Lexer {
            registry: &*PATTERN_REGISTRY,
            tokens: vec![],
            symbols,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn push(&mut self, token: Token) {
        trace!("{}", token);
        self.tokens.push(token);
    }

    pub fn tokenize(mut self, source: &str) -> Analysis {
        let start = Instant::now();
        let comment_lines = self.extract_block_comments(source);
        let mut state = ScanState::default();

        for (index, line) in source.split('\n').enumerate() {
            state.line = index + 1;

            if comment_lines.iter().any(|range| range.contains(&state.line)) {
                continue;
            }

            let code = match line.find(LINE_COMMENT_MARKER) {
                Some(marker) => {
                    let comment = line[marker..].trim_end_matches('\r');
                    self.push(MK_TOKEN!(TokenKind::Comment, String::from(comment), state.line));
                    &line[..marker]
                }
                None => line,
            };

            self.scan_line(code, &mut state);
        }

        debug!(
            "tokenized {} tokens, {} symbols, {} diagnostics in {:?}",
            self.tokens.len(),
            self.symbols.history().len(),
            self.diagnostics.len(),
            start.elapsed()
        );

        Analysis {
            tokens: self.tokens,
            symbols: self.symbols,
            diagnostics: self.diagnostics,
        }
    }

    /// Emits one comment token per block comment and returns the line
    /// ranges they cover.
    fn extract_block_comments(&mut self, source: &str) -> Vec<RangeInclusive<usize>> {
        let mut ranges = vec![];

        for comment in BLOCK_COMMENT.find_iter(source) {
            let start = line_at_offset(source, comment.start());
            let end = line_at_offset(source, comment.end());

            self.push(MK_TOKEN!(TokenKind::Comment, String::from(comment.as_str()), start));
            ranges.push(start..=end);
        }

        ranges
    }

    fn scan_line(&mut self, line: &str, state: &mut ScanState) {
        let registry = self.registry;
        let mut pos = 0;

        while pos < line.len() {
            let remainder = &line[pos..];

            if let Some(whitespace) = WHITESPACE.find(remainder) {
                pos += whitespace.end();
                continue;
            }

            if let Some((pattern, lexeme)) = registry.match_at(remainder) {
                (pattern.handler)(self, state, pattern.kind, lexeme);
                pos += lexeme.len();
                continue;
            }

            let Some(offending) = remainder.chars().next() else {
                break;
            };
            let column = line[..pos].chars().count() + 1;
            let error = Error::new(ErrorImpl::UnrecognisedToken { token: offending }, state.line)
                .at_column(column);

            self.diagnostics.report_error(&error);
            pos += offending.len_utf8();
        }
    }

    fn declare(&mut self, name: &str, datatype: Datatype, line: usize) {
        let scope = ScopeTag::for_level(self.symbols.current_level());

        if let Err(error) = self.symbols.register(name, SymbolCategory::Datatype(datatype), scope) {
            self.diagnostics.report_error(&Error::new(error, line));
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn default_handler(lexer: &mut Lexer, state: &mut ScanState, kind: TokenKind, lexeme: &str) {
    lexer.push(MK_TOKEN!(kind, String::from(lexeme), state.line));
}

pub(crate) fn delimiter_handler(lexer: &mut Lexer, state: &mut ScanState, kind: TokenKind, lexeme: &str) {
    match lexeme {
        "{" => {
            lexer.symbols.enter_scope();
        }
        "}" => {
            if let Err(error) = lexer.symbols.exit_scope() {
                lexer.diagnostics.report_error(&Error::new(error, state.line));
            }
        }
        _ => {}
    }

    default_handler(lexer, state, kind, lexeme);
}

pub(crate) fn keyword_handler(lexer: &mut Lexer, state: &mut ScanState, kind: TokenKind, lexeme: &str) {
    if let Some(datatype) = DATATYPE_LOOKUP.get(lexeme) {
        state.pending_datatype = Some(*datatype);
    }

    default_handler(lexer, state, kind, lexeme);
}

pub(crate) fn identifier_handler(lexer: &mut Lexer, state: &mut ScanState, kind: TokenKind, lexeme: &str) {
    if let Some(datatype) = state.pending_datatype.take() {
        lexer.declare(lexeme, datatype, state.line);
    }

    default_handler(lexer, state, kind, lexeme);
}

pub fn tokenize(source: &str) -> Analysis {
    Lexer::new().tokenize(source)
}
