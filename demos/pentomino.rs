//! Tile a rectangle with the twelve pentominoes.
//! Usage:
//!
//! ```bash
//! cargo run --release --example pentomino -- --rows 6 --columns 10
//! cargo run --release --example pentomino -- --rows 3 --columns 20
//! ```
//!
//! Mirror images of a tiling are only reported once.

use anyhow::{ensure, Result};
use clap::Parser;
use dlx_cover::{pentomino, polyomino::Possibility, ExactCover, Limit};
use std::ops::ControlFlow;

#[derive(Parser)]
#[command(about = "Enumerate pentomino tilings of a rectangle")]
struct Cli {
    /// Number of board rows
    #[arg(short, long, default_value_t = 6)]
    rows: usize,

    /// Number of board columns
    #[arg(short, long, default_value_t = 10)]
    columns: usize,

    /// Stop after this many tilings
    #[arg(short, long)]
    limit: Option<usize>,

    /// Only print the number of tilings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ensure!(
        cli.rows > 0 && cli.columns > 0,
        "board dimensions must be positive"
    );

    let puzzle = pentomino::board(cli.rows, cli.columns);
    let mut matrix = puzzle.matrix()?;

    let mut found = 0usize;
    let mut print = |rows: &[&&Possibility]| {
        found += 1;
        if !cli.quiet {
            let placements: Vec<&Possibility> = rows.iter().map(|poss| **poss).collect();
            println!("{found}:\n{}\n", puzzle.render(&placements));
        }
        ControlFlow::Continue(())
    };

    let summary = match cli.limit {
        Some(limit) => matrix.search(&mut Limit::new(&mut print, limit)),
        None => matrix.search(&mut print),
    };
    log::debug!("Search summary: {summary:?}");

    // The summary also counts a tiling the limit refused.
    println!(
        "{found} tiling(s) of a {}x{} board",
        cli.rows, cli.columns
    );

    Ok(())
}
