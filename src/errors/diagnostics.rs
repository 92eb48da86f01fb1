use std::fmt::Display;

use log::warn;

use super::errors::{Error, Severity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub column: Option<usize>,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            severity,
            message: message.into(),
        }
    }
}

impl From<&Error> for Diagnostic {
    fn from(error: &Error) -> Self {
        Self {
            line: error.get_line(),
            column: error.get_column(),
            severity: error.severity(),
            message: error.to_string(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}:{}: {}", self.severity, self.line, column, self.message),
            None => write!(f, "{}:{}: {}", self.severity, self.line, self.message),
        }
    }
}

/// Append-only, line-tagged record of everything that went wrong during a
/// run. Reading it back never clears it.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, line: usize, message: impl Into<String>) {
        self.push(Diagnostic::new(line, Severity::Error, message));
    }

    pub fn warn(&mut self, line: usize, message: impl Into<String>) {
        self.push(Diagnostic::new(line, Severity::Warning, message));
    }

    pub fn report_error(&mut self, error: &Error) {
        self.push(Diagnostic::from(error));
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn drain(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }
}
