#[macro_use]
extern crate log;

use std::env::{args, var};
use std::fs::File;
use std::io::{self, Read};
use std::process;

use cisp::eval::{default_env, Environment, GcShared, MAX_EVAL_DEPTH};
use cisp::interpreter::{interpret_with_depth, InterpreterError};
use cisp::printer::render;

use rustyline::error::ReadlineError;

const PROMPT: &str = "Cisp> ";

fn main() {
    env_logger::init();

    let file = args().nth(1);
    let max_depth = var("CISP_MAX_DEPTH")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(MAX_EVAL_DEPTH);

    debug!("max evaluation depth: {}", max_depth);

    match file {
        Some(file) => run_file(&file, max_depth),
        None => run_repl(max_depth),
    }
}

fn read_source(file_path: &str) -> io::Result<String> {
    let mut bf = String::new();
    File::open(file_path)?.read_to_string(&mut bf)?;

    // A program is a single expression, possibly spread over many lines
    Ok(bf.lines().collect::<Vec<_>>().join(" "))
}

fn run_file(file_path: &str, max_depth: usize) {
    let source = match read_source(file_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Unable to read {}: {}", file_path, err);
            process::exit(1);
        }
    };

    let environment = default_env();

    match run(&source, &environment, max_depth) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}

fn run_repl(max_depth: usize) {
    let mut rl = rustyline::Editor::<()>::new();
    let environment = default_env();

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(err) => {
                error!("readline failed: {}", err);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        rl.add_history_entry(line.as_str());

        match run(&line, &environment, max_depth) {
            Ok(output) => println!("{}", output),
            Err(err) => println!("{}", err),
        }
    }
}

fn run(
    source: &str,
    environment: &GcShared<Environment>,
    max_depth: usize,
) -> Result<String, InterpreterError> {
    interpret_with_depth(source, environment, max_depth).map(|value| render(&value))
}
