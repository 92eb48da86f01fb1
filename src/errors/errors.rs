use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A recoverable problem found while analysing a source unit, tagged with
/// the line (and column, where the analyzer knows it) it was found on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    line: usize,
    column: Option<usize>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: usize) -> Self {
        Error {
            internal_error: error_impl,
            line,
            column: None,
        }
    }

    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn get_line(&self) -> usize {
        self.line
    }

    pub fn get_column(&self) -> Option<usize> {
        self.column
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::InvalidIdentifier { .. } => "InvalidIdentifier",
            ErrorImpl::GlobalScopeExit => "GlobalScopeExit",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::AlreadyDeclared { name } => ErrorTip::Suggestion(format!(
                "`{}` is already declared in this block, the earlier declaration is kept",
                name
            )),
            ErrorImpl::InvalidIdentifier { name } => ErrorTip::Suggestion(format!(
                "rename `{}` so it starts with a lowercase letter followed by lowercase letters, digits or underscores",
                name
            )),
            ErrorImpl::GlobalScopeExit => {
                ErrorTip::Suggestion(String::from("is there an unmatched `}`?"))
            }
        }
    }

    pub fn severity(&self) -> Severity {
        self.internal_error.severity()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognized token near: '{token}'")]
    UnrecognisedToken { token: char },
    #[error("redeclaration of symbol '{name}' in the current scope")]
    AlreadyDeclared { name: String },
    #[error("invalid identifier '{name}', identifiers must be lowercase")]
    InvalidIdentifier { name: String },
    #[error("attempted to exit the global scope")]
    GlobalScopeExit,
}

impl ErrorImpl {
    pub fn severity(&self) -> Severity {
        match self {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::InvalidIdentifier { .. } => {
                Severity::Error
            }
            ErrorImpl::AlreadyDeclared { .. } | ErrorImpl::GlobalScopeExit => Severity::Warning,
        }
    }
}
