//! Scope-aware symbol table.
//!
//! The lexer registers identifiers here as it discovers them. Scopes follow
//! the `{`/`}` delimiters it matches, and every declaration is kept in a
//! flat history for reporting after the run.

pub mod symbol_table;
