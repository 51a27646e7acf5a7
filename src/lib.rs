//! # Fifteen Puzzle Solver Library
//!
//! This library solves the sliding "fifteen" puzzle on any rectangular grid of
//! at least 2x2. The solver is constructive: it places tiles one at a time in
//! a fixed order, from the bottom row up, using a small set of move templates,
//! and never searches or backtracks. The answer is a valid solution, not a
//! shortest one.
//!
//! It is used by three binaries:
//! - `fifteen_solver`: Solves a grid read from a file (or a seeded random
//!   grid) and prints the move string.
//! - `fifteen_player`: Interactive play on the command line, with the solver
//!   available as a hint.
//! - `solution_stats`: Reports average solution lengths over seeded random
//!   grids of several sizes.
//!
//! ## Modules
//! - `engine`: The grid (`Puzzle`), move execution, the position locator, and
//!   the solvability test.
//! - `moves`: Blank moves (`Direction`) and move strings (`MoveSequence`).
//! - `invariant`: The lower row and row one invariants checked between phases.
//! - `router`: Moves a single tile into its slot.
//! - `solver`: The reduction phases and `solve_puzzle`, which drives them.
//! - `utils`: Parsing grids from text.
//!
//! ## Example
//! ```
//! use fifteen_solver::engine::Puzzle;
//! use fifteen_solver::solver::solve;
//!
//! let puzzle = Puzzle::from_grid(
//!     4,
//!     4,
//!     vec![
//!         vec![15, 11, 8, 12],
//!         vec![14, 10, 9, 13],
//!         vec![2, 6, 1, 4],
//!         vec![3, 7, 5, 0],
//!     ],
//! )
//! .unwrap();
//!
//! let solution = solve(&puzzle).unwrap();
//! let mut replay = puzzle.clone();
//! replay.apply(&solution.moves).unwrap();
//! assert!(replay.is_solved());
//! ```

pub mod engine;
pub mod error;
pub mod invariant;
pub mod moves;
pub mod router;
pub mod solver;
pub mod utils;

pub use crate::error::PuzzleError;
