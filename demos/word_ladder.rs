//! Find a word ladder: a chain of one-letter changes between two words.
//!
//! Run: cargo run --bin word-ladder -- cold warm [--words words.txt]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use waypath_demos::Dictionary;

/// Shortest word ladder between two words of equal length.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(default_value = "cold")]
    from: String,

    #[arg(default_value = "warm")]
    to: String,

    /// Whitespace-separated word list; a small built-in list is used when omitted
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// List every word reachable from FROM instead of a single ladder
    #[arg(short, long)]
    reachable: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();
    let dict = match &args.words {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading word list from {}", path.display()))?;
            Dictionary::new(text.split_whitespace())
        }
        None => Dictionary::default(),
    };
    info!("{} words loaded", dict.len());

    if args.reachable {
        for (word, changes) in dict.reachable(&args.from) {
            println!("{changes:>3} {word}");
        }
        return Ok(());
    }

    if args.from.len() != args.to.len() {
        bail!("{:?} and {:?} differ in length", args.from, args.to);
    }
    let ladder = dict
        .ladder(&args.from, &args.to)
        .with_context(|| format!("no ladder from {:?} to {:?}", args.from, args.to))?;
    for (word, changes) in &ladder {
        println!("{changes:>3} {word}");
    }
    Ok(())
}
