use anyhow::{Context, Result};
use clap::Parser;
use fifteen_solver::engine::Puzzle;
use fifteen_solver::solver::solve;
use fifteen_solver::utils::puzzle_from_text;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the grid file (one row per line, whitespace-separated values).
    /// A seeded random grid is used when omitted.
    board_file: Option<PathBuf>,

    /// Height of the random grid
    #[clap(long, default_value_t = 4)]
    height: usize,

    /// Width of the random grid
    #[clap(long, default_value_t = 4)]
    width: usize,

    /// Seed for the random grid
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Print the grid after every move of the solution
    #[clap(long)]
    replay: bool,
}

fn read_board_file(path: &PathBuf) -> Result<Puzzle> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    puzzle_from_text(&content)
        .with_context(|| format!("Invalid grid in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let puzzle = match &args.board_file {
        Some(path) => {
            let puzzle = read_board_file(path)?;
            println!("Loaded grid from {}\n", path.display());
            puzzle
        }
        None => {
            let puzzle = Puzzle::new_random_with_seed(args.height, args.width, args.seed)
                .context("Failed to generate a random grid")?;
            println!(
                "Generated {}x{} grid with seed {}\n",
                args.height, args.width, args.seed
            );
            puzzle
        }
    };
    println!("Initial grid:\n{}\n", puzzle);

    let solution = solve(&puzzle).context("Failed to solve the grid")?;

    println!("Moves ({}, {} before cancelling):", solution.moves.len(), solution.raw_len);
    if solution.moves.is_empty() {
        println!("  Already solved.");
    } else {
        println!("  {}", solution.moves);
    }

    if args.replay {
        let mut replay = puzzle.clone();
        for (i, direction) in solution.moves.iter().enumerate() {
            replay.apply_move(*direction)?;
            println!("\nMove {}: {}\n{}", i + 1, direction, replay);
        }
    }

    println!("\nFinal grid:\n{}", solution.final_state);
    Ok(())
}
