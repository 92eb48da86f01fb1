//! Error types and the diagnostics sink for lexical analysis.
//!
//! Nothing in this crate aborts a run. Every problem is described by an
//! [`errors::ErrorImpl`] and ends up in a [`diagnostics::Diagnostics`]
//! collector:
//!
//! - Unrecognised characters skipped by the analyzer
//! - Redeclarations and malformed names rejected by the symbol table
//! - Attempts to close the global scope

pub mod diagnostics;
pub mod errors;
