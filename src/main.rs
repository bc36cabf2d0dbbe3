use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process,
};

use clap::Parser;
use rill::Session;

/// rill is an easy to use, dynamically typed scripting language with
/// first-class functions, homogeneous lists and ranges.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to execute; an interactive prompt starts when omitted.
    path: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    match args.path {
        Some(path) => run_file(&path),
        None => run_prompt(),
    }
}

fn run_file(path: &PathBuf) {
    let source = fs::read_to_string(path).unwrap_or_else(|_| {
                                             eprintln!("Failed to read the input file '{}'. \
                                                        Perhaps this file does not exist?",
                                                       path.display());
                                             process::exit(1);
                                         });

    let mut session = Session::standard();
    session.run(&source);
    report(&mut session);

    if session.had_error() {
        process::exit(65);
    }
    if session.had_runtime_error() {
        process::exit(70);
    }
}

fn run_prompt() {
    let mut session = Session::standard();

    loop {
        prompt();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        let echo = session.run_line(&line);
        report(&mut session);
        if let Some(text) = echo {
            println!("{text}");
        }
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn report(session: &mut Session) {
    for line in session.drain_diagnostics() {
        eprintln!("{line}");
    }
}
