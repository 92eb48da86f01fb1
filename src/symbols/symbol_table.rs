use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Display,
};

use crate::{
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Datatype, Token, TokenKind},
};

lazy_static! {
    static ref IDENTIFIER_SHAPE: Regex = Regex::new("^[a-z][a-z0-9_]*$").unwrap();
}

/// Simulated memory address handed to the first registered symbol.
pub const DEFAULT_BASE_ADDRESS: usize = 1000;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SymbolCategory {
    Datatype(Datatype),
    Identifier,
    StringConstant,
    NumericConstant,
    Comment,
    ArithmeticOperator,
    Io,
}

impl SymbolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolCategory::Datatype(datatype) => datatype.as_str(),
            SymbolCategory::Identifier => "identifier",
            SymbolCategory::StringConstant => "string constant",
            SymbolCategory::NumericConstant => "numeric constant",
            SymbolCategory::Comment => "comment",
            SymbolCategory::ArithmeticOperator => "arithmetic operator",
            SymbolCategory::Io => "io",
        }
    }

    /// Variable categories are the only ones whose names must look like
    /// identifiers.
    pub fn is_variable(&self) -> bool {
        matches!(self, SymbolCategory::Datatype(_) | SymbolCategory::Identifier)
    }
}

impl Display for SymbolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ScopeTag {
    Global,
    Local,
}

impl ScopeTag {
    pub fn for_level(level: usize) -> ScopeTag {
        if level <= 1 {
            ScopeTag::Global
        } else {
            ScopeTag::Local
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeTag::Global => "global",
            ScopeTag::Local => "local",
        }
    }
}

impl Display for ScopeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    category: SymbolCategory,
    scope: ScopeTag,
    level: usize,
    address: usize,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> SymbolCategory {
        self.category
    }

    pub fn scope(&self) -> ScopeTag {
        self.scope
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn address(&self) -> usize {
        self.address
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name: {:<20} | Type: {:<20} | Scope: {:<10} ",
            self.name, self.category, self.scope
        )
    }
}

/// Maps a name to its index in the declaration history.
type Frame = HashMap<String, usize>;

/// Scope stack plus the ordered history of every declaration made during a
/// run. Closing a scope drops its frame but never its symbols.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    global: Frame,
    nested: Vec<Frame>,
    history: Vec<Symbol>,
    next_address: usize,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::with_base_address(DEFAULT_BASE_ADDRESS)
    }

    pub fn with_base_address(base_address: usize) -> SymbolTable {
        SymbolTable {
            global: Frame::new(),
            nested: vec![],
            history: vec![],
            next_address: base_address,
        }
    }

    pub fn enter_scope(&mut self) -> usize {
        self.nested.push(Frame::new());
        debug!("entered scope level {}", self.current_level());
        self.current_level()
    }

    /// Closes the innermost block. The global scope has no frame on the
    /// nested stack, so there is nothing to pop once only it remains.
    pub fn exit_scope(&mut self) -> Result<usize, ErrorImpl> {
        match self.nested.pop() {
            Some(_) => {
                debug!("exited to scope level {}", self.current_level());
                Ok(self.current_level())
            }
            None => Err(ErrorImpl::GlobalScopeExit),
        }
    }

    pub fn current_level(&self) -> usize {
        self.nested.len() + 1
    }

    fn current_frame(&self) -> &Frame {
        self.nested.last().unwrap_or(&self.global)
    }

    fn current_frame_mut(&mut self) -> &mut Frame {
        self.nested.last_mut().unwrap_or(&mut self.global)
    }

    pub fn is_valid_identifier(name: &str) -> bool {
        IDENTIFIER_SHAPE.is_match(name)
    }

    pub fn register(
        &mut self,
        name: &str,
        category: SymbolCategory,
        scope: ScopeTag,
    ) -> Result<&Symbol, ErrorImpl> {
        if self.current_frame().contains_key(name) {
            return Err(ErrorImpl::AlreadyDeclared {
                name: String::from(name),
            });
        }

        if category.is_variable() && !SymbolTable::is_valid_identifier(name) {
            return Err(ErrorImpl::InvalidIdentifier {
                name: String::from(name),
            });
        }

        let symbol = Symbol {
            name: String::from(name),
            category,
            scope,
            level: self.current_level(),
            address: self.next_address,
        };
        self.next_address += 1;

        debug!(
            "registered `{}` as {} at level {}, address {}",
            symbol.name, symbol.category, symbol.level, symbol.address
        );

        let index = self.history.len();
        self.history.push(symbol);
        self.current_frame_mut().insert(String::from(name), index);

        Ok(&self.history[index])
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.nested
            .iter()
            .rev()
            .chain(std::iter::once(&self.global))
            .find_map(|frame| frame.get(name))
            .map(|index| &self.history[*index])
    }

    /// Every symbol ever registered, in registration order.
    pub fn history(&self) -> &[Symbol] {
        &self.history
    }

    pub fn snapshot_by_level(&self) -> BTreeMap<usize, Vec<&Symbol>> {
        let mut grouped: BTreeMap<usize, Vec<&Symbol>> = BTreeMap::new();

        for symbol in &self.history {
            grouped.entry(symbol.level).or_default().push(symbol);
        }

        grouped
    }

    /// Registers the literal constants, comments, arithmetic operators and
    /// I/O keywords found in `tokens`, each distinct lexeme once.
    pub fn register_literals(&mut self, tokens: &[Token], diagnostics: &mut Diagnostics) {
        let mut seen = HashSet::new();

        for token in tokens {
            let category = match token.kind {
                TokenKind::StringLiteral => SymbolCategory::StringConstant,
                TokenKind::Comment => SymbolCategory::Comment,
                TokenKind::Operator if token.is_arithmetic_operator() => {
                    SymbolCategory::ArithmeticOperator
                }
                TokenKind::Keyword if token.is_io_keyword() => SymbolCategory::Io,
                TokenKind::Integer | TokenKind::Decimal => SymbolCategory::NumericConstant,
                _ => continue,
            };

            if !seen.insert(token.lexeme.as_str()) {
                continue;
            }

            if let Err(error) = self.register(&token.lexeme, category, ScopeTag::Global) {
                diagnostics.report_error(&Error::new(error, token.line));
            }
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Complete Symbol Table ---")?;

        for symbols in self.snapshot_by_level().values() {
            writeln!(f, "---------------------------------------------------------------")?;
            writeln!(f, "{:<20} | {:<20} | {:<10}", "Name", "Type", "Scope")?;
            for symbol in symbols {
                writeln!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
