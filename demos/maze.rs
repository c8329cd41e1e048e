//! Solve an ASCII maze with A* or Dijkstra and print the path overlay.
//!
//! Run: cargo run --bin maze -- [--algorithm dijkstra] [MAZE_FILE]
//! Set RUST_LOG=debug to see search statistics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use waypath_demos::{Algorithm, DEFAULT_MAZE, Maze};

/// Shortest path through a maze of `#` walls, `.` floor, `S` start and `G` goal.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Maze file; the built-in maze is used when omitted
    maze: Option<PathBuf>,

    /// Search algorithm: astar or dijkstra
    #[arg(short, long, default_value = "astar")]
    algorithm: Algorithm,

    /// Also summarize the distance map from the start
    #[arg(short, long)]
    distances: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let args = Args::parse();
    let text = match &args.maze {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading maze from {}", path.display()))?,
        None => DEFAULT_MAZE.to_owned(),
    };
    let maze: Maze = text.parse().context("parsing maze")?;
    info!("maze start {} goal {}", maze.start(), maze.goal());

    match maze.solve(args.algorithm) {
        Ok(path) => {
            print!("{}", maze.render(&path));
            if let Some((_, cost)) = path.last() {
                println!("cost: {cost}");
            }
        }
        Err(e) => {
            warn!("{e}");
            print!("{}", maze.render(&[]));
        }
    }

    if args.distances {
        let map = maze.distance_map();
        let farthest = map.iter().max_by_key(|s| (s.cost, s.node));
        println!("reachable cells: {}", map.len());
        if let Some(s) = farthest {
            println!("farthest cell: {} at distance {}", s.node, s.cost);
        }
    }
    Ok(())
}
