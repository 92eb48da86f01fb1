#![allow(clippy::module_inception)]

use crate::errors::diagnostics::Diagnostic;

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod symbols;

extern crate regex;

/// 1-based line containing the byte `offset` of `source`.
pub fn line_at_offset(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())].matches('\n').count() + 1
}

pub fn get_line(source: &str, line: usize) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)?)
        .map(|text| text.trim_end_matches('\r'))
}

pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str) -> String {
    /*
        error: message
          |
        3 | int x = @;
          | --------^
    */

    let line_string = diagnostic.line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = format!("{}: {}\n", diagnostic.severity, diagnostic.message);
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = get_line(source, diagnostic.line).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    if let Some(column) = diagnostic.column {
        let arrows = column.saturating_sub(removed_whitespace).max(1);
        rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    rendered
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start();
    let removed = string[..string.len() - trimmed.len()].chars().count();

    (trimmed, removed)
}
