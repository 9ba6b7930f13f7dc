//! Command line front-end for the `jsontree` parser and serializer.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use jsontree::{from_str_with, Format, Node, ParseOptions};

#[derive(Parser)]
#[command(name = "jsontree-cli")]
#[command(about = "Format and validate JSON documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Maximum object/array nesting accepted while parsing.
    #[arg(long, global = true, default_value_t = 1000)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Pretty-print a document with four-space indentation
    Fmt {
        /// Input file; standard input when omitted
        path: Option<PathBuf>,
        /// Rewrite the file in place instead of printing
        #[arg(long, requires = "path")]
        write: bool,
    },
    /// Strip all insignificant whitespace from a document
    Min {
        /// Input file; standard input when omitted
        path: Option<PathBuf>,
        /// Rewrite the file in place instead of printing
        #[arg(long, requires = "path")]
        write: bool,
    },
    /// Parse a document and report the first syntax error, if any
    Check {
        /// Input file; standard input when omitted
        path: Option<PathBuf>,
    },
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn parse(text: &str, max_depth: usize) -> Result<Node, jsontree::Error> {
    from_str_with(text, ParseOptions::new().max_depth(max_depth))
}

fn reformat(
    path: Option<&PathBuf>,
    write: bool,
    max_depth: usize,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(path)?;
    let rendered = parse(&text, max_depth)?.to_text(format);
    match (path, write) {
        (Some(path), true) => fs::write(path, rendered + "\n")?,
        _ => writeln!(io::stdout(), "{rendered}")?,
    }
    Ok(())
}

fn check(path: Option<&PathBuf>, max_depth: usize) -> Result<bool, Box<dyn std::error::Error>> {
    let text = read_input(path)?;
    match parse(&text, max_depth) {
        Ok(_) => {
            writeln!(io::stdout(), "OK")?;
            Ok(true)
        }
        Err(error) => {
            writeln!(io::stderr(), "{error}")?;
            Ok(false)
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Fmt { path, write } => {
            reformat(path.as_ref(), *write, cli.max_depth, Format::Pretty)?;
            Ok(true)
        }
        Command::Min { path, write } => {
            reformat(path.as_ref(), *write, cli.max_depth, Format::Minimized)?;
            Ok(true)
        }
        Command::Check { path } => check(path.as_ref(), cli.max_depth),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            let _ = writeln!(io::stderr(), "error: {error}");
            ExitCode::FAILURE
        }
    }
}
