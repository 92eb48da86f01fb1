//! Integration tests for end-to-end analysis.
//!
//! These tests run whole source units through the analyzer and check the
//! token stream, the symbol table and the diagnostics together.

use lexan::{
    errors::errors::Severity,
    lexer::{lexer::tokenize, tokens::TokenKind},
    render_diagnostic,
    symbols::symbol_table::ScopeTag,
};
use proptest::prelude::*;

fn summary(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source)
        .tokens
        .into_iter()
        .map(|token| (token.kind, token.lexeme))
        .collect()
}

fn pair(kind: TokenKind, lexeme: &str) -> (TokenKind, String) {
    (kind, lexeme.to_string())
}

#[test]
fn test_simple_declaration() {
    let analysis = tokenize("int x = 5;");

    assert_eq!(
        summary("int x = 5;"),
        vec![
            pair(TokenKind::Keyword, "int"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Operator, "="),
            pair(TokenKind::Integer, "5"),
            pair(TokenKind::Delimiter, ";"),
        ]
    );

    let history = analysis.symbols.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].name(), "x");
    assert_eq!(history[0].category().as_str(), "int");
    assert_eq!(history[0].scope(), ScopeTag::Global);
    assert_eq!(history[0].level(), 1);
}

#[test]
fn test_decimal_is_not_split() {
    let analysis = tokenize("decimal y = 3.14;\n");
    let decimals = analysis
        .tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Decimal)
        .collect::<Vec<_>>();

    assert_eq!(decimals.len(), 1);
    assert_eq!(decimals[0].lexeme, "3.14");
    assert!(analysis.tokens.iter().all(|token| token.kind != TokenKind::Integer));
}

#[test]
fn test_nested_block_declaration() {
    let analysis = tokenize("if (true) { int z = 1; }");
    let z = &analysis.symbols.history()[0];

    assert_eq!(z.name(), "z");
    assert_eq!(z.scope(), ScopeTag::Local);
    assert_eq!(z.level(), 2);
    assert_eq!(analysis.symbols.current_level(), 1);
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_line_comment_then_declaration() {
    let analysis = tokenize("// comment\nint a;");

    assert_eq!(analysis.tokens[0].kind, TokenKind::Comment);
    assert_eq!(analysis.tokens[0].line, 1);
    assert_eq!(
        analysis.tokens[1..].iter().map(|token| (token.kind, token.line)).collect::<Vec<_>>(),
        vec![
            (TokenKind::Keyword, 2),
            (TokenKind::Identifier, 2),
            (TokenKind::Delimiter, 2),
        ]
    );
}

#[test]
fn test_invalid_start_recovers() {
    let analysis = tokenize("1x");

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(analysis.diagnostics.drain()[0].message, "unrecognized token near: '1'");
}

#[test]
fn test_invalid_character_keeps_neighbours() {
    let clean = summary("int a = 5; bool b;");
    let analysis = tokenize("int a = 5; # bool b;");

    assert_eq!(analysis.diagnostics.len(), 1);
    assert_eq!(summary("int a = 5; # bool b;"), clean);
    assert_eq!(analysis.symbols.history().len(), 2);
}

#[test]
fn test_full_program() {
    let source = "\
/* globals
   live here */
int count = 0;
decimal rate = 2.75;
char c = 'q';
if (count > 1) {
    bool done = false; // inner
    write(\"done\");
    {
        int count = 3;
    }
}
";
    let mut analysis = tokenize(source);

    assert_eq!(analysis.tokens[0].kind, TokenKind::Comment);
    assert_eq!(analysis.tokens[0].line, 1);
    assert!(analysis.diagnostics.is_empty());
    assert_eq!(analysis.symbols.current_level(), 1);

    let snapshot = analysis.symbols.snapshot_by_level();
    let names = |level: usize| snapshot[&level].iter().map(|s| s.name()).collect::<Vec<_>>();
    assert_eq!(names(1), vec!["count", "rate", "c"]);
    assert_eq!(names(2), vec!["done"]);
    assert_eq!(names(3), vec!["count"]);

    let addresses = analysis.symbols.history().iter().map(|s| s.address()).collect::<Vec<_>>();
    assert_eq!(addresses, vec![1000, 1001, 1002, 1003, 1004]);

    analysis.register_literals();
    let constants = analysis
        .symbols
        .history()
        .iter()
        .skip(5)
        .map(|symbol| symbol.category().as_str())
        .collect::<Vec<_>>();
    assert!(constants.contains(&"comment"));
    assert!(constants.contains(&"string constant"));
    assert!(constants.contains(&"io"));
    assert!(constants.contains(&"numeric constant"));
}

#[test]
fn test_rendered_diagnostic_points_at_character() {
    let source = "int a;\nint b = $;";
    let analysis = tokenize(source);
    let diagnostic = &analysis.diagnostics.drain()[0];

    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(
        render_diagnostic(diagnostic, source),
        "error: unrecognized token near: '$'\n  |\n2 | int b = $;\n  | --------^\n"
    );
}

#[derive(Debug, Clone)]
enum Item {
    Declare(String),
    Open,
    Close,
}

fn item() -> impl Strategy<Value = Item> {
    prop_oneof![
        "[a-z]{1,3}".prop_map(|name| Item::Declare(format!("v_{}", name))),
        Just(Item::Open),
        Just(Item::Close),
    ]
}

fn render(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| match item {
            Item::Declare(name) => format!("int {};", name),
            Item::Open => String::from("{"),
            Item::Close => String::from("}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #[test]
    fn scope_level_tracks_unmatched_braces(braces in prop::collection::vec(any::<bool>(), 0..64)) {
        let source = braces.iter().map(|open| if *open { "{" } else { "}" }).collect::<Vec<_>>().join(" ");
        let analysis = tokenize(&source);

        let mut depth = 0usize;
        let mut underflows = 0usize;
        for open in &braces {
            if *open {
                depth += 1;
            } else if depth == 0 {
                underflows += 1;
            } else {
                depth -= 1;
            }
        }

        prop_assert_eq!(analysis.symbols.current_level(), depth + 1);
        prop_assert_eq!(analysis.diagnostics.len(), underflows);
    }

    #[test]
    fn addresses_increase_without_gaps(items in prop::collection::vec(item(), 0..48)) {
        let analysis = tokenize(&render(&items));
        let history = analysis.symbols.history();

        for (index, symbol) in history.iter().enumerate() {
            prop_assert_eq!(symbol.address(), 1000 + index);
        }

        let declarations = items.iter().filter(|item| matches!(item, Item::Declare(_))).count();
        let redeclarations = analysis
            .diagnostics
            .drain()
            .iter()
            .filter(|diagnostic| diagnostic.message.starts_with("redeclaration"))
            .count();
        prop_assert_eq!(history.len() + redeclarations, declarations);
    }
}
