use anyhow::Result;
use clap::Parser;
use fifteen_solver::engine::Puzzle;
use fifteen_solver::solver::solve;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(long, default_value_t = 4)]
    height: usize,

    #[clap(long, default_value_t = 4)]
    width: usize,

    /// Seed for the starting grid
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let mut puzzle = Puzzle::new_random_with_seed(args.height, args.width, args.seed)?;
    let mut steps = 0usize;
    println!("Welcome to the Fifteen puzzle!");

    loop {
        println!("---------------------");
        println!("Steps: {}", steps);
        println!("{}", puzzle);

        if puzzle.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Steps: {}", steps);
            println!("---------------------");
            break;
        }

        print!("Enter blank moves (u/d/l/r, e.g. 'uull'), 's' for a solution, 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            break;
        }

        let trimmed_input = input.trim();

        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        if trimmed_input == "s" {
            match solve(&puzzle) {
                Ok(solution) => println!(
                    "Solution ({} moves): {}",
                    solution.moves.len(),
                    solution.moves
                ),
                Err(e) => println!("No solution: {}", e),
            }
            continue;
        }

        // Moves are applied one at a time, so a bad move keeps the ones before it.
        let mut attempt = puzzle.clone();
        match attempt.update_puzzle(trimmed_input) {
            Ok(()) => {
                steps += trimmed_input.chars().count();
                puzzle = attempt;
            }
            Err(e) => println!("Invalid move: {}", e),
        }
    }
    Ok(())
}
