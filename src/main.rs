use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use lexan::{
    lexer::lexer::{Analysis, Lexer},
    render_diagnostic,
    symbols::symbol_table::{SymbolTable, DEFAULT_BASE_ADDRESS},
};
use log::{error, info, LevelFilter};

#[derive(Debug, Parser)]
#[command(author, version, about = "Tokenize a source file and build its symbol table")]
struct CLOpt {
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the symbol table grouped by scope level
    #[arg(long)]
    symbols: bool,

    /// Print diagnostics
    #[arg(long)]
    diagnostics: bool,

    /// Also register literal constants, comments, operators and I/O keywords
    #[arg(long)]
    constants: bool,

    /// Print tokens ordered by line instead of emission order
    #[arg(long)]
    source_order: bool,

    #[arg(long, default_value_t = DEFAULT_BASE_ADDRESS, value_name = "N")]
    base_address: usize,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl CLOpt {
    fn show_all(&self) -> bool {
        !(self.tokens || self.symbols || self.diagnostics)
    }
}

fn main() -> ExitCode {
    let args = CLOpt::parse();
    init_logging(args.verbose);

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            error!("failed to read {}: {}", args.file.display(), e);
            eprintln!("Error reading file {}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut analysis = Lexer::with_symbol_table(SymbolTable::with_base_address(args.base_address))
        .tokenize(&source);
    if args.constants {
        analysis.register_literals();
    }
    info!("analysed {} in {:?}", args.file.display(), start.elapsed());

    print_analysis(&args, &analysis, &source);

    ExitCode::SUCCESS
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"));

    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }

    builder.init();
}

fn print_analysis(args: &CLOpt, analysis: &Analysis, source: &str) {
    if args.diagnostics || args.show_all() {
        for diagnostic in analysis.diagnostics.drain() {
            println!("{}", render_diagnostic(diagnostic, source));
        }
    }

    if args.tokens || args.show_all() {
        println!("\nTokens:");
        if args.source_order {
            analysis.tokens_in_source_order().iter().for_each(|token| println!("{}", token));
        } else {
            analysis.tokens.iter().for_each(|token| println!("{}", token));
        }
    }

    if args.symbols || args.show_all() {
        println!();
        print!("{}", analysis.symbols);
    }
}
