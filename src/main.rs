mod source;
mod symbol_table;
mod tokenizer;
mod tokens;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::prelude::*;

use crate::source::SourceCode;

#[derive(Debug, Parser)]
struct Args {
    /// Assembly source file
    input: String,

    /// Show classification decisions (-v for info, -vv for everything)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Error reading {}", args.input))?;

    let tokens = tokenizer::tokenize(&SourceCode::new(text))?;

    info!("{} token(s)", tokens.len());
    for token in &tokens {
        println!("{token}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::MoreSevereEqual(Level::Warn),
        1 => LevelFilter::MoreSevereEqual(Level::Info),
        _ => LevelFilter::All,
    };
    spdlog::default_logger().set_level_filter(level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
