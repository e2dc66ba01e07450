// ABOUTME: exprtree-cli — a small REPL and one-shot evaluator over exprtree

use clap::Parser as ClapParser;
use exprtree::{interp, CompileError, SymbolTable};
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use tracing_subscriber::EnvFilter;

/// Evaluate real-number arithmetic expressions
#[derive(ClapParser, Debug)]
#[command(name = "exprtree-cli")]
#[command(version = exprtree::config::VERSION)]
#[command(about = "A small expression evaluator: tokenizer, parser, and tree evaluator")]
struct CliArgs {
    /// Expression to evaluate. If omitted, starts an interactive REPL.
    expression: Option<String>,

    /// List the built-in constants and functions and exit.
    #[arg(long = "list-builtins")]
    list_builtins: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = CliArgs::parse();

    if args.list_builtins {
        for name in exprtree::builtins::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let table = SymbolTable::new();

    if let Some(expression) = args.expression {
        match interp(&expression, &table) {
            Ok(value) => println!("{value}"),
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    run_repl(&table)
}

fn run_repl(table: &SymbolTable) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), _> =
        Editor::with_config(config).map_err(|e| format!("failed to initialize REPL: {e}"))?;

    let history_file = ".exprtree_history";
    let _ = rl.load_history(history_file);

    println!("{}", exprtree::config::WELCOME_MESSAGE);
    println!("Type an expression, or (quit)/(exit)/Ctrl-D to leave.");

    loop {
        let readline = rl.readline("expr> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "quit" || trimmed == "exit" {
                    break;
                }
                report(interp(trimmed, table));
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}

fn report(result: Result<f64, CompileError>) {
    match result {
        Ok(value) => println!("=> {value}"),
        Err(err) => eprintln!("error: {err} (position {})", err.position()),
    }
}
