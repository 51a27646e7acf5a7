//! Grid state for the sliding puzzle.
//!
//! This module defines:
//! - `Puzzle`: a `height x width` grid holding every value `0..height*width`
//!   exactly once, where `0` is the blank.
//! - Move execution (`apply`, `update_puzzle`, `apply_move`), which slides the
//!   blank and fails on moves that would leave the grid.
//! - The position locator (`current_position`, `locate`).
//! - A parity based solvability test and seeded random generation.
//!
//! The solved layout has the blank in the upper left corner and value
//! `col + width * row` at `(row, col)`.
use crate::error::PuzzleError;
use crate::moves::{Direction, MoveSequence};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// A `(row, col)` cell coordinate.
pub type Position = (usize, usize);

/// Represents the puzzle as a 2D grid of tile values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Puzzle {
    height: usize,
    width: usize,
    grid: Vec<Vec<u32>>,
}

impl Puzzle {
    /// Creates a solved puzzle of the given size.
    ///
    /// # Returns
    /// * `Err(PuzzleError::MalformedGrid)` if either dimension is below 2.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Puzzle;
    /// let puzzle = Puzzle::new(3, 4).unwrap();
    /// assert_eq!(puzzle.get_number(0, 0), 0);
    /// assert_eq!(puzzle.get_number(2, 3), 11);
    /// assert!(puzzle.is_solved());
    /// ```
    pub fn new(height: usize, width: usize) -> Result<Self, PuzzleError> {
        check_dimensions(height, width)?;
        let grid = (0..height)
            .map(|row| (0..width).map(|col| solved_value(width, row, col)).collect())
            .collect();
        Ok(Puzzle {
            height,
            width,
            grid,
        })
    }

    /// Creates a puzzle from an explicit grid.
    ///
    /// The grid must have `height` rows of `width` values and hold each of
    /// `0..height*width` exactly once.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Puzzle;
    /// let puzzle = Puzzle::from_grid(2, 2, vec![vec![3, 2], vec![0, 1]]).unwrap();
    /// assert_eq!(puzzle.blank_position().unwrap(), (1, 0));
    ///
    /// assert!(Puzzle::from_grid(2, 2, vec![vec![1, 1], vec![0, 2]]).is_err());
    /// ```
    pub fn from_grid(
        height: usize,
        width: usize,
        grid: Vec<Vec<u32>>,
    ) -> Result<Self, PuzzleError> {
        check_dimensions(height, width)?;
        if grid.len() != height {
            return Err(PuzzleError::MalformedGrid(format!(
                "expected {} rows, found {}",
                height,
                grid.len()
            )));
        }
        let cells = height * width;
        let mut seen = vec![false; cells];
        for (r, row) in grid.iter().enumerate() {
            if row.len() != width {
                return Err(PuzzleError::MalformedGrid(format!(
                    "row {} has {} values (expected {})",
                    r,
                    row.len(),
                    width
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                let index = value as usize;
                if index >= cells {
                    return Err(PuzzleError::MalformedGrid(format!(
                        "value {} at ({}, {}) is out of range 0..{}",
                        value, r, c, cells
                    )));
                }
                if seen[index] {
                    return Err(PuzzleError::MalformedGrid(format!(
                        "value {} appears more than once",
                        value
                    )));
                }
                seen[index] = true;
            }
        }
        Ok(Puzzle {
            height,
            width,
            grid,
        })
    }

    /// Creates a random solvable puzzle, reproducible for a given `seed`.
    pub fn new_random_with_seed(
        height: usize,
        width: usize,
        seed: u64,
    ) -> Result<Self, PuzzleError> {
        let mut puzzle = Puzzle::new(height, width)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut flattened: Vec<u32> = (0..(height * width) as u32).collect();

        loop {
            flattened.shuffle(&mut rng);
            for (r, row) in puzzle.grid.iter_mut().enumerate() {
                row.copy_from_slice(&flattened[r * width..(r + 1) * width]);
            }
            if puzzle.is_solvable() {
                return Ok(puzzle);
            }
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` or `col` are outside the grid.
    pub fn get_number(&self, row: usize, col: usize) -> u32 {
        self.grid[row][col]
    }

    /// Overwrites the value at `(row, col)`.
    ///
    /// This bypasses all validation; a caller that breaks the one-of-each
    /// property will see `ValueNotFound` from the locator later on.
    ///
    /// # Panics
    /// Panics if `row` or `col` are outside the grid.
    pub fn set_number(&mut self, row: usize, col: usize, value: u32) {
        self.grid[row][col] = value;
    }

    /// Returns the rows of the grid.
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.grid
    }

    /// Value held at `(row, col)` once the puzzle is solved.
    pub fn solved_value(&self, row: usize, col: usize) -> u32 {
        solved_value(self.width, row, col)
    }

    /// Whether the tile at `(row, col)` is already in its solved place.
    pub fn is_in_place(&self, row: usize, col: usize) -> bool {
        self.grid[row][col] == self.solved_value(row, col)
    }

    pub fn is_solved(&self) -> bool {
        (0..self.height).all(|r| (0..self.width).all(|c| self.is_in_place(r, c)))
    }

    /// Finds the cell currently holding `value`.
    pub fn locate(&self, value: u32) -> Result<Position, PuzzleError> {
        if value as usize >= self.height * self.width {
            return Err(PuzzleError::ValueNotFound(value));
        }
        for (r, row) in self.grid.iter().enumerate() {
            if let Some(c) = row.iter().position(|&v| v == value) {
                return Ok((r, c));
            }
        }
        Err(PuzzleError::ValueNotFound(value))
    }

    /// Finds the tile that belongs at `(solved_row, solved_col)`.
    pub fn current_position(
        &self,
        solved_row: usize,
        solved_col: usize,
    ) -> Result<Position, PuzzleError> {
        self.locate(self.solved_value(solved_row, solved_col))
    }

    /// Position of the blank.
    pub fn blank_position(&self) -> Result<Position, PuzzleError> {
        self.locate(0)
    }

    /// Slides the blank one step.
    ///
    /// On failure the grid is left untouched.
    pub fn apply_move(&mut self, direction: Direction) -> Result<(), PuzzleError> {
        let blank = self.locate(0)?;
        self.step(blank, direction).map(|_| ())
    }

    /// Applies every move of `moves` in order.
    ///
    /// There is no rollback: if a move would leave the grid, the moves before
    /// it stay applied and `OutOfBounds` is returned. Clone first if the
    /// original state is still needed.
    pub fn apply(&mut self, moves: &MoveSequence) -> Result<(), PuzzleError> {
        let mut blank = self.locate(0)?;
        for &direction in moves {
            blank = self.step(blank, direction)?;
        }
        Ok(())
    }

    /// Applies a move string over `{u, d, l, r}`.
    ///
    /// Symbols are validated as they are reached, so a string such as `"ux"`
    /// moves the blank up before failing with `InvalidMove('x')`.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Puzzle;
    /// let mut puzzle = Puzzle::new(2, 2).unwrap();
    /// puzzle.update_puzzle("rd").unwrap();
    /// assert_eq!(puzzle.rows(), &[vec![1, 3], vec![2, 0]]);
    /// assert!(puzzle.update_puzzle("d").is_err());
    /// ```
    pub fn update_puzzle(&mut self, moves: &str) -> Result<(), PuzzleError> {
        let mut blank = self.locate(0)?;
        for symbol in moves.chars() {
            blank = self.step(blank, Direction::try_from(symbol)?)?;
        }
        Ok(())
    }

    fn step(
        &mut self,
        (row, col): Position,
        direction: Direction,
    ) -> Result<Position, PuzzleError> {
        let (dr, dc) = direction.offset();
        let new_row = row as isize + dr;
        let new_col = col as isize + dc;

        if new_row < 0
            || new_row >= self.height as isize
            || new_col < 0
            || new_col >= self.width as isize
        {
            return Err(PuzzleError::OutOfBounds {
                direction,
                row,
                col,
            });
        }

        let (new_row, new_col) = (new_row as usize, new_col as usize);
        self.grid[row][col] = self.grid[new_row][new_col];
        self.grid[new_row][new_col] = 0;
        Ok((new_row, new_col))
    }

    /// Checks whether the solved layout is reachable from this grid.
    ///
    /// Every move is a transposition with the blank and shifts the blank's
    /// Manhattan distance from `(0, 0)` by one, so the permutation parity of
    /// the cells must match the parity of that distance.
    ///
    /// # Examples
    /// ```
    /// use fifteen_solver::engine::Puzzle;
    /// let solvable = Puzzle::from_grid(2, 2, vec![vec![3, 2], vec![0, 1]]).unwrap();
    /// assert!(solvable.is_solvable());
    /// let unsolvable = Puzzle::from_grid(2, 2, vec![vec![3, 1], vec![0, 2]]).unwrap();
    /// assert!(!unsolvable.is_solvable());
    /// ```
    pub fn is_solvable(&self) -> bool {
        let flattened: Vec<u32> = self.grid.iter().flat_map(|row| row.iter().copied()).collect();
        let Ok((blank_row, blank_col)) = self.locate(0) else {
            return false;
        };
        count_inversions(&flattened) % 2 == (blank_row + blank_col) % 2
    }
}

fn check_dimensions(height: usize, width: usize) -> Result<(), PuzzleError> {
    if height < 2 || width < 2 {
        return Err(PuzzleError::MalformedGrid(format!(
            "puzzle must be at least 2x2, got {}x{}",
            height, width
        )));
    }
    Ok(())
}

fn solved_value(width: usize, row: usize, col: usize) -> u32 {
    (col + width * row) as u32
}

fn count_inversions(flattened: &[u32]) -> usize {
    flattened
        .iter()
        .enumerate()
        .map(|(i, &val)| flattened[i + 1..].iter().filter(|&&next| next < val).count())
        .sum()
}

impl fmt::Display for Puzzle {
    /// One line per row, values right-aligned to the widest value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = (self.height * self.width - 1).to_string().len();
        for row in &self.grid {
            let line: Vec<String> = row
                .iter()
                .map(|value| format!("{:>width$}", value, width = cell_width))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
