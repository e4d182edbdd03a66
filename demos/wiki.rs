//! Solve an exact cover problem written as named rows of `0`/`1` columns.
//! Usage:
//!
//! ```bash
//! cargo run --example wiki
//! cargo run --example wiki -- matrix.txt
//! ```
//!
//! Without a file, the example from
//! <https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X> is solved.

use anyhow::{Context, Result};
use clap::Parser;
use dlx_cover::{text, FirstActive, MinSize, SearchSummary};
use std::{ops::ControlFlow, path::PathBuf};

const WIKI_MATRIX: &str = "
A 1001001
B 1001000
C 0001101
D 0010110
E 0110011
F 0100001
";

#[derive(Parser)]
#[command(about = "Print every exact cover of a 0/1 matrix")]
struct Cli {
    /// File with one `NAME BITS` row per line
    input: Option<PathBuf>,

    /// Branch on the leftmost column instead of the smallest one
    #[arg(long)]
    leftmost: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read [{}]", path.display()))?,
        None => WIKI_MATRIX.to_string(),
    };
    let mut matrix = text::parse(&input).context("failed to parse matrix")?;

    let mut print = |rows: &[&String]| {
        let mut names: Vec<&str> = rows.iter().map(|name| name.as_str()).collect();
        names.sort_unstable();
        println!("{}", names.join(" "));
        ControlFlow::Continue(())
    };

    let summary: SearchSummary = if cli.leftmost {
        matrix.solver_with(FirstActive).search(&mut print)
    } else {
        matrix.solver_with(MinSize).search(&mut print)
    };

    eprintln!(
        "{} solution(s), {} node(s), {} dead end(s)",
        summary.solutions, summary.nodes, summary.dead_ends
    );

    Ok(())
}
