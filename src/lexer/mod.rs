//! Lexical analysis.
//!
//! Converts source text into a stream of classified tokens. It handles:
//!
//! - Block and line comments, each kept as a single comment token
//! - Priority-ordered regex matching of literals, keywords, operators and identifiers
//! - Scope changes on `{` and `}`
//! - Registering declared identifiers in the symbol table
//! - Skipping unrecognised characters with a diagnostic

pub mod lexer;
pub mod patterns;
pub mod tokens;
