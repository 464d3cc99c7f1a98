//! # Sluc
//!
//! This binary is the SLU-C interpreter. It combines lexer, parser, type
//! checker, and tree-walking evaluator into a single application.

use std::{fs, path::PathBuf, process};

use clap::{Parser as ClapParser, ValueEnum};
use log::{error, info};

use sluc::{interpreter::Interpreter, lexer::Lexer, parser::Parser, typechecker::TypeChecker};

/// Struct containing the CLI configuration for Sluc.
#[derive(ClapParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// The path to the SLU-C source file.
    #[arg(index = 1)]
    file: PathBuf,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    verbosity: LogLevel,

    /// Whether to dump the token stream (for debugging).
    #[arg(long)]
    dump_tokens: bool,

    /// Whether to dump the parsed AST (for debugging).
    #[arg(long)]
    dump_parsed: bool,

    /// Whether to dump the type-checked AST (for debugging).
    #[arg(long)]
    dump_typed: bool,
}

/// Enum for specifying the log level of Sluc.
#[derive(ValueEnum, Clone, Default, Debug)]
enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// A log level, where also warnings are logged.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the interpreter,
    /// e.g., the debug dumps.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the interpreter.
    #[value(alias("3"))]
    Debug,

    /// Log extra information.
    #[value(alias("4"))]
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn main() {
    let args = Cli::parse();

    simple_logger::init_with_level(args.verbosity.clone().into()).unwrap();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            error!("Could not read file '{}': {err}", args.file.display());
            process::exit(1);
        }
    };

    let tokens = match Lexer::new(&source).lex() {
        Ok(tokens) => tokens,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    if args.dump_tokens {
        info!("Tokens:\n{tokens:#?}");
    }

    let program = match Parser::new(tokens).parse() {
        Ok(program) => program,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    if args.dump_parsed {
        info!("Parsed AST:\n{program:#?}");
    }

    let program = match TypeChecker::new(program).check() {
        Ok(program) => program,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };

    if args.dump_typed {
        info!("Typed AST:\n{program:#?}");
    }

    if let Err(err) = Interpreter::new(&program).run() {
        error!("{err}");
        process::exit(1);
    }
}
