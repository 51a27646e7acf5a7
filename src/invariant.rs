//! Phase invariants.
//!
//! Each reduction phase starts and ends in a state described by one of two
//! predicates. The predicates are pure reads of the grid; the `ensure_*`
//! wrappers turn a false predicate into `PuzzleError::InvariantViolation` so
//! that a routing defect stops the solve at the phase boundary where it shows.

use crate::engine::Puzzle;
use crate::error::PuzzleError;

impl Puzzle {
    /// Lower row invariant at `(target_row, target_col)`.
    ///
    /// Holds when the blank is at `(target_row, target_col)`, every row below
    /// `target_row` is solved, and the cells of `target_row` right of
    /// `target_col` are solved.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Puzzle;
    /// let mut puzzle = Puzzle::new(3, 3).unwrap();
    /// puzzle.update_puzzle("rrdd").unwrap();
    /// assert!(puzzle.lower_row_invariant(2, 2));
    /// assert!(!puzzle.lower_row_invariant(2, 1));
    /// ```
    pub fn lower_row_invariant(&self, target_row: usize, target_col: usize) -> bool {
        if target_row >= self.height() || target_col >= self.width() {
            return false;
        }
        if self.get_number(target_row, target_col) != 0 {
            return false;
        }
        let lower_rows_solved = (target_row + 1..self.height())
            .all(|r| (0..self.width()).all(|c| self.is_in_place(r, c)));
        let row_tail_solved =
            (target_col + 1..self.width()).all(|c| self.is_in_place(target_row, c));

        lower_rows_solved && row_tail_solved
    }

    /// Row one invariant at `target_col`.
    ///
    /// Holds when the blank is at `(1, target_col)`, every row from 2 down is
    /// solved, and the cells of rows 0 and 1 right of `target_col` are solved.
    pub fn row_one_invariant(&self, target_col: usize) -> bool {
        if target_col >= self.width() {
            return false;
        }
        if self.get_number(1, target_col) != 0 {
            return false;
        }
        let lower_rows_solved =
            (2..self.height()).all(|r| (0..self.width()).all(|c| self.is_in_place(r, c)));
        let top_tail_solved = (0..2)
            .all(|r| (target_col + 1..self.width()).all(|c| self.is_in_place(r, c)));

        lower_rows_solved && top_tail_solved
    }
}

pub(crate) fn ensure_lower_row(
    puzzle: &Puzzle,
    phase: &'static str,
    row: usize,
    col: usize,
) -> Result<(), PuzzleError> {
    if puzzle.lower_row_invariant(row, col) {
        Ok(())
    } else {
        Err(PuzzleError::InvariantViolation { phase, row, col })
    }
}

pub(crate) fn ensure_row_one(
    puzzle: &Puzzle,
    phase: &'static str,
    col: usize,
) -> Result<(), PuzzleError> {
    if puzzle.row_one_invariant(col) {
        Ok(())
    } else {
        Err(PuzzleError::InvariantViolation { phase, row: 1, col })
    }
}
