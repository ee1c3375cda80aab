//! Command-line interface for gram
//! Compiles gram grammar files into standalone Rust parsers, and parses
//! input texts directly against a grammar for quick iteration.
//!
//! Usage:
//!   gram generate `<grammar>` [-o `<out>`]  - Emit Rust parser source
//!   gram parse `<grammar>` `<input>`        - Parse a file, print the AST as JSON
//!   gram check `<grammar>`                - Validate a grammar and summarize it
//!
//! All subcommands accept `--strict` (unrecognized grammar lines become
//! errors) and `--debug` (matching trace on stderr).

use std::fs;
use std::process;

use clap::{Arg, ArgAction, Command};
use log::{LevelFilter, Metadata, Record};

use gram::codegen;
use gram::engine::{self, ParseOutcome};
use gram::grammar::{self, Grammar};

/// Stderr logger behind the `--debug` flag. Output stays off stdout so
/// generated source and JSON remain pipeable.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level().to_string().to_lowercase(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A second init attempt (only possible in tests) is harmless
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

fn main() {
    let matches = Command::new("gram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A parser generator for the gram grammar notation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("strict")
                .long("strict")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Treat unrecognized grammar lines as errors"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Print the matching trace to stderr"),
        )
        .subcommand(
            Command::new("generate")
                .about("Compile a grammar into standalone Rust parser source")
                .arg(
                    Arg::new("grammar")
                        .help("Path to the grammar file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .help("Output path; stdout when omitted"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse an input file against a grammar and print the AST as JSON")
                .arg(
                    Arg::new("grammar")
                        .help("Path to the grammar file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("input")
                        .help("Path to the text to parse")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["json", "debug"])
                        .default_value("json")
                        .help("AST output format"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a grammar and print a summary")
                .arg(
                    Arg::new("grammar")
                        .help("Path to the grammar file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("dump-grammar")
                        .long("dump-grammar")
                        .action(ArgAction::SetTrue)
                        .help("Print the assembled grammar model as JSON"),
                ),
        )
        .get_matches();

    let (name, sub) = match matches.subcommand() {
        Some(pair) => pair,
        None => unreachable!(),
    };
    // Global flags land in the subcommand's matches
    init_logging(sub.get_flag("debug"));
    let strict = sub.get_flag("strict");

    match name {
        "generate" => {
            let grammar_path = sub.get_one::<String>("grammar").unwrap();
            let out = sub.get_one::<String>("out").map(String::as_str);
            handle_generate_command(grammar_path, out, strict);
        }
        "parse" => {
            let grammar_path = sub.get_one::<String>("grammar").unwrap();
            let input_path = sub.get_one::<String>("input").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_parse_command(grammar_path, input_path, format, strict);
        }
        "check" => {
            let grammar_path = sub.get_one::<String>("grammar").unwrap();
            handle_check_command(grammar_path, sub.get_flag("dump-grammar"), strict);
        }
        _ => unreachable!(),
    }
}

/// Handle the generate command
fn handle_generate_command(grammar_path: &str, out: Option<&str>, strict: bool) {
    let grammar = load_grammar(grammar_path, strict);
    let source = match codegen::generate(&grammar) {
        Ok(source) => source,
        Err(e) => fail(&format!("{}: {}", grammar_path, e)),
    };
    match out {
        Some(path) => {
            if let Err(e) = fs::write(path, source) {
                fail(&format!("{}: {}", path, e));
            }
        }
        None => print!("{}", source),
    }
}

/// Handle the parse command
fn handle_parse_command(grammar_path: &str, input_path: &str, format: &str, strict: bool) {
    let grammar = load_grammar(grammar_path, strict);
    let input = read_file(input_path);
    match engine::parse(&grammar, &input) {
        Ok(ParseOutcome::Matched(ast)) => match format {
            "debug" => println!("{:#?}", ast),
            _ => match serde_json::to_string_pretty(&ast) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(&format!("serializing AST: {}", e)),
            },
        },
        Ok(ParseOutcome::NoMatch) => {
            eprintln!("{}: input does not match the grammar", input_path);
            process::exit(1);
        }
        Err(e) => fail(&format!("{}: {}", grammar_path, e)),
    }
}

/// Handle the check command
fn handle_check_command(grammar_path: &str, dump: bool, strict: bool) {
    let grammar = load_grammar(grammar_path, strict);
    if dump {
        match serde_json::to_string_pretty(&grammar) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("serializing grammar: {}", e)),
        }
        return;
    }
    let entry = grammar
        .entry_production()
        .map(|p| p.name.as_str())
        .unwrap_or("(none)");
    println!(
        "{}: ok ({} productions, {} directives, entry: {})",
        grammar_path,
        grammar.productions.len(),
        grammar.directives.len(),
        entry
    );
}

fn load_grammar(path: &str, strict: bool) -> Grammar {
    let source = read_file(path);
    let compiled = if strict {
        grammar::compile_strict(&source)
    } else {
        grammar::compile(&source)
    };
    match compiled {
        Ok(grammar) => grammar,
        Err(e) => fail(&format!("{}: {}", path, e)),
    }
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => fail(&format!("{}: {}", path, e)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1)
}
