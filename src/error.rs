//! Error type shared by every part of the solver.
//!
//! Only `MalformedGrid` and `Unsolvable` describe bad input. The remaining
//! variants mean a move string or a phase went wrong, and they abort the
//! solve that produced them.

use crate::moves::Direction;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Custom error type.
pub enum PuzzleError {
    #[error("move off grid: blank at ({row}, {col}) cannot move {direction}")]
    OutOfBounds {
        direction: Direction,
        row: usize,
        col: usize,
    },
    #[error("invalid direction: {0:?}")]
    InvalidMove(char),
    #[error("value {0} not found")]
    ValueNotFound(u32),
    #[error("invariant violated in {phase} at ({row}, {col})")]
    InvariantViolation {
        phase: &'static str,
        row: usize,
        col: usize,
    },
    #[error("target ({row}, {col}) is not valid for this phase")]
    InvalidTarget { row: usize, col: usize },
    #[error("malformed grid: {0}")]
    MalformedGrid(String),
    #[error("puzzle is not solvable")]
    Unsolvable,
}
