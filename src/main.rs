//! Command-line driver for the record-language frontend.
//!
//! Parses each input file and pretty-prints the resulting AST, or reports the
//! error with its source offset. A failing file does not stop the remaining
//! ones.

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Record-language parser
#[derive(Parser, Debug)]
#[command(name = "oblc")]
#[command(version = "0.1.0")]
#[command(about = "Parses Oberon-style record-language sources and prints the AST")]
struct Cli {
    /// Input source files
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Print the AST as JSON instead of a debug tree
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut failed = false;

    for input in &cli.inputs {
        if let Err(e) = process_file(input, cli.json) {
            eprintln!("{}: {:#}", input.display(), e);
            failed = true;
        }
    }

    if failed {
        process::exit(1);
    }
}

/// Parse one file and print its AST
fn process_file(input: &Path, json: bool) -> anyhow::Result<()> {
    let source = fs::read_to_string(input).context("cannot read file")?;

    let program = oberlite::parse(&source)
        .map_err(|e| anyhow::anyhow!("error at offset {}: {}", e.span().start, e))?;

    log::debug!(
        "{}: {} type defs, {} var groups, {} statements",
        input.display(),
        program.type_defs.len(),
        program.var_defs.len(),
        program.statements.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&program)?);
    } else {
        println!("{:#?}", program);
    }

    Ok(())
}
