use anyhow::{Context, Result};
use clap::Parser;
use fifteen_solver::engine::Puzzle;
use fifteen_solver::solver::solve;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random grids per size
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// First seed; grid `i` uses `seed + i`
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Largest height and width to evaluate
    #[clap(short, long, default_value_t = 6)]
    max_size: usize,
}

#[derive(Default)]
struct SizeStats {
    raw_total: usize,
    reduced_total: usize,
    longest: usize,
    count: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    println!(
        "Evaluating {} grids per size, sizes 2x2 to {}x{}...",
        args.boards, args.max_size, args.max_size
    );

    let mut results: Vec<((usize, usize), SizeStats)> = Vec::new();

    for height in 2..=args.max_size {
        for width in 2..=args.max_size {
            let mut stats = SizeStats::default();
            for board_idx in 0..args.boards {
                let current_seed = args.seed + board_idx as u64;
                let puzzle = Puzzle::new_random_with_seed(height, width, current_seed)
                    .with_context(|| format!("Failed to generate {}x{} grid", height, width))?;

                let solution = match solve(&puzzle) {
                    Ok(solution) => solution,
                    Err(e) => {
                        warn!(height, width, seed = current_seed, error = %e, "solve failed");
                        continue;
                    }
                };
                if !solution.final_state.is_solved() {
                    warn!(height, width, seed = current_seed, "solution left the grid unsolved");
                    continue;
                }

                stats.raw_total += solution.raw_len;
                stats.reduced_total += solution.moves.len();
                stats.longest = stats.longest.max(solution.moves.len());
                stats.count += 1;
            }
            results.push(((height, width), stats));
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!(
        "{:<8} {:>8} {:>12} {:>12} {:>8}",
        "Size", "Solved", "Avg raw", "Avg reduced", "Longest"
    );
    for ((height, width), stats) in &results {
        if stats.count == 0 {
            println!("{:<8} no grids solved", format!("{}x{}", height, width));
            continue;
        }
        let avg_raw = stats.raw_total as f64 / stats.count as f64;
        let avg_reduced = stats.reduced_total as f64 / stats.count as f64;
        println!(
            "{:<8} {:>8} {:>12.2} {:>12.2} {:>8}",
            format!("{}x{}", height, width),
            stats.count,
            avg_raw,
            avg_reduced,
            stats.longest
        );
    }
    Ok(())
}
