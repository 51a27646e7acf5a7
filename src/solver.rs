use crate::engine::{Position, Puzzle};
use crate::error::PuzzleError;
use crate::invariant::{ensure_lower_row, ensure_row_one};
use crate::moves::{Direction, MoveSequence};
use crate::router::position_tile;
use tracing::{debug, info};
use Direction::{Down, Left, Right, Up};

/// Blank at `(row, 0)`: steps into the row above and over to column one.
const LIFT_TO_SECOND_COLUMN: [Direction; 2] = [Up, Right];
/// Tile at `(row - 1, 1)` with the blank left of it: drops the tile into
/// `(row, 0)` and leaves the blank at `(row - 1, 2)`.
const COLUMN_ZERO_CORRECTION: [Direction; 10] =
    [Right, Right, Down, Left, Left, Up, Right, Down, Right, Up];
/// Width 2 form of the correction, working in rows `row - 2..=row`. Leaves
/// the blank at `(row - 1, 1)`.
const NARROW_COLUMN_ZERO_CORRECTION: [Direction; 15] = [
    Up, Right, Down, Left, Down, Right, Up, Up, Left, Down, Right, Down, Left, Up, Right,
];
/// Both tiles of column `c` routed to `(1, c - 1)` and `(1, c)` in the
/// wrong order: swaps them into rows 0 and 1 of column `c`.
const ROW_ONE_SWAP: [Direction; 17] = [
    Up, Right, Down, Left, Up, Right, Right, Down, Left, Up, Left, Down, Right, Right, Up, Left,
    Down,
];
/// Tile for `(0, c)` at `(1, c)`, tile for `(1, c)` at `(1, c - 1)`: lifts
/// both into place.
const ROW_ONE_LIFT: [Direction; 5] = [Up, Right, Right, Down, Left];
/// Blank at `(1, 1)`: moves it to the corner.
const TO_CORNER: [Direction; 2] = [Up, Left];
const CYCLE_CLOCKWISE: [Direction; 4] = [Right, Down, Left, Up];
const CYCLE_COUNTERCLOCKWISE: [Direction; 4] = [Down, Right, Up, Left];

/// Represents a solution found by the solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Moves that take the initial grid to the solved grid, with cancelling
    /// pairs removed.
    pub moves: MoveSequence,
    /// Number of moves the phases emitted before cancellation.
    pub raw_len: usize,
    /// The grid after replaying `moves`.
    pub final_state: Puzzle,
}

/// Where the tile for `(row, 0)` starts relative to that cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColumnZeroCase {
    /// Directly above: the first step drops it into place.
    Above,
    /// Anywhere else: routed to `(row - 1, 1)` and corrected.
    Routed,
}

impl ColumnZeroCase {
    fn classify(tile: Position, target_row: usize) -> Self {
        if tile == (target_row - 1, 0) {
            ColumnZeroCase::Above
        } else {
            ColumnZeroCase::Routed
        }
    }
}

/// How the two tiles of column `c` in rows 0 and 1 interfere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowOneLayout {
    /// Route the row 0 tile to `(1, c)`, then the row 1 tile beside it.
    Sequential,
    /// Routing the row 0 tile first would leave the row 1 tile where the
    /// second route has to cross column `c`, so route the row 1 tile first.
    Swapped,
}

impl RowOneLayout {
    fn classify(top: Position, bottom: Position, col: usize) -> Self {
        let left = col - 1;
        let swapped = (top == (1, left) && bottom == (0, col))
            || (top == (0, col) && bottom == (0, left))
            || (bottom == (1, left) && top != (0, col));
        if swapped {
            RowOneLayout::Swapped
        } else {
            RowOneLayout::Sequential
        }
    }
}

/// Applies `moves` to the puzzle and returns them.
fn play(puzzle: &mut Puzzle, moves: MoveSequence) -> Result<MoveSequence, PuzzleError> {
    puzzle.apply(&moves)?;
    Ok(moves)
}

/// Places the tile for `(target_row, target_col)`, with `target_row > 1` and
/// `target_col > 0`.
///
/// Requires the lower row invariant at the target and leaves it holding one
/// column to the left.
pub fn solve_interior_tile(
    puzzle: &mut Puzzle,
    target_row: usize,
    target_col: usize,
) -> Result<MoveSequence, PuzzleError> {
    if target_row < 2 || target_col == 0 {
        return Err(PuzzleError::InvalidTarget {
            row: target_row,
            col: target_col,
        });
    }
    ensure_lower_row(puzzle, "interior tile", target_row, target_col)?;

    let tile = puzzle.current_position(target_row, target_col)?;
    let moves = play(puzzle, position_tile((target_row, target_col), tile)?)?;

    ensure_lower_row(puzzle, "interior tile", target_row, target_col - 1)?;
    debug!(target_row, target_col, moves = moves.len(), "solved interior tile");
    Ok(moves)
}

/// Places the tile for `(target_row, 0)`, with `target_row > 1`.
///
/// Requires the lower row invariant at `(target_row, 0)` and leaves it
/// holding at the right end of the row above.
pub fn solve_col0_tile(
    puzzle: &mut Puzzle,
    target_row: usize,
) -> Result<MoveSequence, PuzzleError> {
    if target_row < 2 {
        return Err(PuzzleError::InvalidTarget {
            row: target_row,
            col: 0,
        });
    }
    ensure_lower_row(puzzle, "column zero", target_row, 0)?;

    let width = puzzle.width();
    let start = puzzle.current_position(target_row, 0)?;
    let mut moves = play(puzzle, MoveSequence::from(&LIFT_TO_SECOND_COLUMN[..]))?;

    let tail = match ColumnZeroCase::classify(start, target_row) {
        ColumnZeroCase::Above => {
            let mut tail = MoveSequence::new();
            tail.push_repeated(Right, width - 2);
            tail
        }
        ColumnZeroCase::Routed => {
            let tile = puzzle.current_position(target_row, 0)?;
            let mut tail = position_tile((target_row - 1, 1), tile)?;
            if width == 2 {
                tail.push_template(&NARROW_COLUMN_ZERO_CORRECTION);
            } else {
                tail.push_template(&COLUMN_ZERO_CORRECTION);
                tail.push_repeated(Right, width - 3);
            }
            tail
        }
    };
    moves.append(play(puzzle, tail)?);

    ensure_lower_row(puzzle, "column zero", target_row - 1, width - 1)?;
    debug!(target_row, moves = moves.len(), "solved column zero tile");
    Ok(moves)
}

/// Places the tiles for `(0, target_col)` and `(1, target_col)`, with
/// `target_col > 1`.
///
/// Requires the row one invariant at `target_col` and leaves it holding one
/// column to the left.
pub fn solve_row1_tile(
    puzzle: &mut Puzzle,
    target_col: usize,
) -> Result<MoveSequence, PuzzleError> {
    if target_col < 2 {
        return Err(PuzzleError::InvalidTarget {
            row: 1,
            col: target_col,
        });
    }
    ensure_row_one(puzzle, "row one", target_col)?;

    let top = puzzle.current_position(0, target_col)?;
    let bottom = puzzle.current_position(1, target_col)?;
    let layout = RowOneLayout::classify(top, bottom, target_col);

    let (first, second, closing): (Position, Position, &[Direction]) = match layout {
        RowOneLayout::Sequential => ((0, target_col), (1, target_col), &ROW_ONE_LIFT[..]),
        RowOneLayout::Swapped => ((1, target_col), (0, target_col), &ROW_ONE_SWAP[..]),
    };

    let tile = puzzle.current_position(first.0, first.1)?;
    let mut moves = play(puzzle, position_tile((1, target_col), tile)?)?;

    let tile = puzzle.current_position(second.0, second.1)?;
    let mut tail = position_tile((1, target_col - 1), tile)?;
    tail.push_template(closing);
    moves.append(play(puzzle, tail)?);

    ensure_row_one(puzzle, "row one", target_col - 1)?;
    debug!(target_col, ?layout, moves = moves.len(), "solved row one column");
    Ok(moves)
}

/// Solves the upper left 2x2 block.
///
/// Requires the row one invariant at column 1; leaves the puzzle solved.
pub fn solve_2x2(puzzle: &mut Puzzle) -> Result<MoveSequence, PuzzleError> {
    ensure_row_one(puzzle, "2x2", 1)?;

    let mut moves = play(puzzle, MoveSequence::from(&TO_CORNER[..]))?;
    let cycle: &[Direction] = match puzzle.current_position(0, 1)? {
        (0, 1) => &[],
        (1, 1) => &CYCLE_CLOCKWISE[..],
        (1, 0) => &CYCLE_COUNTERCLOCKWISE[..],
        (row, col) => {
            return Err(PuzzleError::InvariantViolation {
                phase: "2x2",
                row,
                col,
            })
        }
    };
    moves.append(play(puzzle, MoveSequence::from(cycle))?);

    if !puzzle.is_solved() {
        return Err(PuzzleError::InvariantViolation {
            phase: "2x2",
            row: 0,
            col: 0,
        });
    }
    debug!(moves = moves.len(), "solved 2x2 block");
    Ok(moves)
}

fn solve_phases(puzzle: &mut Puzzle) -> Result<MoveSequence, PuzzleError> {
    let (height, width) = (puzzle.height(), puzzle.width());
    let (blank_row, blank_col) = puzzle.blank_position()?;

    let mut start = MoveSequence::new();
    start.push_repeated(Right, width - 1 - blank_col);
    start.push_repeated(Down, height - 1 - blank_row);
    let mut moves = play(puzzle, start)?;

    for row in (2..height).rev() {
        for col in (1..width).rev() {
            moves.append(solve_interior_tile(puzzle, row, col)?);
        }
        moves.append(solve_col0_tile(puzzle, row)?);
    }
    for col in (2..width).rev() {
        moves.append(solve_row1_tile(puzzle, col)?);
    }
    moves.append(solve_2x2(puzzle)?);
    Ok(moves)
}

/// Solves the puzzle in place and returns the moves used.
///
/// The phases run bottom-up: blank to the lower right corner, rows from the
/// bottom up to row 2, then the columns of rows 0 and 1 from the right, then
/// the 2x2 corner. Cancelling move pairs are stripped from the result.
///
/// An unsolvable grid runs through every phase and fails in the last one;
/// use [`solve`] to reject it up front.
///
/// # Examples
/// ```
/// use fifteen_solver::engine::Puzzle;
/// use fifteen_solver::solver::solve_puzzle;
///
/// let mut puzzle = Puzzle::from_grid(2, 3, vec![vec![1, 4, 2], vec![3, 5, 0]]).unwrap();
/// let moves = solve_puzzle(&mut puzzle).unwrap();
/// assert!(puzzle.is_solved());
/// assert_eq!(moves.to_string(), "lul");
/// ```
pub fn solve_puzzle(puzzle: &mut Puzzle) -> Result<MoveSequence, PuzzleError> {
    Ok(solve_phases(puzzle)?.cancel_redundant())
}

/// Solves a copy of `initial` and reports the solution.
///
/// # Returns
/// * `Err(PuzzleError::Unsolvable)` if the solved layout cannot be reached.
pub fn solve(initial: &Puzzle) -> Result<Solution, PuzzleError> {
    if !initial.is_solvable() {
        return Err(PuzzleError::Unsolvable);
    }

    let mut puzzle = initial.clone();
    let raw = solve_phases(&mut puzzle)?;
    let moves = raw.cancel_redundant();
    info!(
        height = puzzle.height(),
        width = puzzle.width(),
        raw_moves = raw.len(),
        moves = moves.len(),
        "puzzle solved"
    );

    Ok(Solution {
        moves,
        raw_len: raw.len(),
        final_state: puzzle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn replay(initial: &Puzzle, moves: &MoveSequence) -> Puzzle {
        let mut puzzle = initial.clone();
        puzzle.apply(moves).unwrap();
        puzzle
    }

    fn assert_solves(initial: &Puzzle) {
        let mut puzzle = initial.clone();
        let moves = solve_puzzle(&mut puzzle)
            .unwrap_or_else(|e| panic!("failed to solve\n{}: {}", initial, e));
        assert!(puzzle.is_solved(), "grid left unsolved:\n{}", puzzle);
        assert!(
            replay(initial, &moves).is_solved(),
            "replay of {} does not solve\n{}",
            moves,
            initial
        );
    }

    /// Scrambles a solved grid with a random walk of the blank.
    fn scrambled(height: usize, width: usize, rng: &mut SmallRng) -> Puzzle {
        let mut puzzle = Puzzle::new(height, width).unwrap();
        for _ in 0..400 {
            let direction = Direction::ALL[rng.gen_range(0..4)];
            let _ = puzzle.apply_move(direction);
        }
        puzzle
    }

    #[test]
    fn test_solve_four_by_four_scenario() {
        let initial = Puzzle::from_grid(
            4,
            4,
            vec![
                vec![15, 11, 8, 12],
                vec![14, 10, 9, 13],
                vec![2, 6, 1, 4],
                vec![3, 7, 5, 0],
            ],
        )
        .unwrap();
        let mut puzzle = initial.clone();
        let moves = solve_puzzle(&mut puzzle).unwrap();

        assert!(moves.to_string().chars().all(|c| "udlr".contains(c)));
        let solved = replay(&initial, &moves);
        assert_eq!(
            solved.rows(),
            &[
                vec![0, 1, 2, 3],
                vec![4, 5, 6, 7],
                vec![8, 9, 10, 11],
                vec![12, 13, 14, 15]
            ]
        );
        assert_eq!(puzzle, solved);
    }

    #[test]
    fn test_solve_two_by_two() {
        let initial = Puzzle::from_grid(2, 2, vec![vec![3, 2], vec![0, 1]]).unwrap();
        let mut puzzle = initial.clone();
        let moves = solve_puzzle(&mut puzzle).unwrap();
        assert_eq!(puzzle.rows(), &[vec![0, 1], vec![2, 3]]);
        assert!(replay(&initial, &moves).is_solved());
    }

    #[test]
    fn test_solve_rejects_unsolvable() {
        // The three tiles of a 2x2 grid keep their cyclic order, and this
        // grid has the other one.
        let initial = Puzzle::from_grid(2, 2, vec![vec![3, 1], vec![0, 2]]).unwrap();
        assert_eq!(solve(&initial).unwrap_err(), PuzzleError::Unsolvable);

        let mut puzzle = initial.clone();
        assert!(matches!(
            solve_puzzle(&mut puzzle),
            Err(PuzzleError::InvariantViolation { phase: "2x2", .. })
        ));
    }

    #[test]
    fn test_solve_already_solved() {
        let corner = solve(&Puzzle::new(2, 2).unwrap()).unwrap();
        assert!(corner.moves.is_empty(), "got {}", corner.moves);

        // The phases still walk the blank around; the result need not be empty.
        let initial = Puzzle::new(3, 3).unwrap();
        let solution = solve(&initial).unwrap();
        assert!(solution.raw_len > 0);
        assert!(solution.final_state.is_solved());
        assert!(replay(&initial, &solution.moves).is_solved());
    }

    #[test]
    fn test_solve_leaves_input_untouched() {
        let initial = Puzzle::new_random_with_seed(3, 4, 11).unwrap();
        let copy = initial.clone();
        let solution = solve(&initial).unwrap();
        assert_eq!(initial, copy);
        assert!(solution.moves.len() <= solution.raw_len);
        assert_eq!(replay(&initial, &solution.moves), solution.final_state);
    }

    #[test]
    fn test_solve_random_grids_all_sizes() {
        let mut rng = SmallRng::seed_from_u64(514514);
        for height in 2..=6 {
            for width in 2..=6 {
                for _ in 0..20 {
                    assert_solves(&scrambled(height, width, &mut rng));
                }
            }
        }
    }

    #[test]
    fn test_solve_shuffled_grids() {
        for seed in 0..30 {
            assert_solves(&Puzzle::new_random_with_seed(4, 4, seed).unwrap());
            assert_solves(&Puzzle::new_random_with_seed(5, 3, seed).unwrap());
            assert_solves(&Puzzle::new_random_with_seed(3, 7, seed).unwrap());
        }
    }

    #[test]
    fn test_solve_width_two() {
        let mut rng = SmallRng::seed_from_u64(2);
        for height in 3..=7 {
            for _ in 0..30 {
                assert_solves(&scrambled(height, 2, &mut rng));
            }
        }
    }

    #[test]
    fn test_solution_is_reduced() {
        let initial = Puzzle::new_random_with_seed(5, 5, 3).unwrap();
        let solution = solve(&initial).unwrap();
        let text = solution.moves.to_string();
        for pair in ["ud", "du", "lr", "rl"] {
            assert!(!text.contains(pair), "{} contains {}", text, pair);
        }
        assert!(replay(&initial, &solution.moves).is_solved());
    }

    #[test]
    fn test_phase_handoff() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..20 {
            let mut puzzle = scrambled(4, 5, &mut rng);
            let (row, col) = puzzle.blank_position().unwrap();
            let mut start = MoveSequence::new();
            start.push_repeated(Right, 4 - col);
            start.push_repeated(Down, 3 - row);
            puzzle.apply(&start).unwrap();

            for row in (2..4).rev() {
                for col in (1..5).rev() {
                    solve_interior_tile(&mut puzzle, row, col).unwrap();
                    assert!(puzzle.lower_row_invariant(row, col - 1));
                }
                solve_col0_tile(&mut puzzle, row).unwrap();
                assert!(puzzle.lower_row_invariant(row - 1, 4));
            }
            for col in (2..5).rev() {
                solve_row1_tile(&mut puzzle, col).unwrap();
                assert!(puzzle.row_one_invariant(col - 1));
            }
            solve_2x2(&mut puzzle).unwrap();
            assert!(puzzle.is_solved());
        }
    }

    #[test]
    fn test_col0_tile_already_above() {
        // The tile for (2, 0) sits at (1, 0).
        let mut puzzle = Puzzle::from_grid(
            3,
            3,
            vec![vec![1, 2, 4], vec![6, 3, 5], vec![0, 7, 8]],
        )
        .unwrap();
        let moves = solve_col0_tile(&mut puzzle, 2).unwrap();
        assert_eq!(moves.to_string(), "urr");
        assert!(puzzle.lower_row_invariant(1, 2));
    }

    #[test]
    fn test_row1_tile_layouts() {
        let col = 3;
        let left = col - 1;
        for top in (0..2).flat_map(|r| (0..=col).map(move |c| (r, c))) {
            for bottom in (0..2).flat_map(|r| (0..=col).map(move |c| (r, c))) {
                if top == bottom || top == (1, col) || bottom == (1, col) {
                    continue;
                }
                // Build a 3x5 grid with the row one invariant at column 3.
                let mut cells = vec![vec![None; 5]; 3];
                for c in 0..5 {
                    cells[2][c] = Some(10 + c as u32);
                }
                cells[0][4] = Some(4);
                cells[1][4] = Some(9);
                cells[1][col] = Some(0);
                cells[top.0][top.1] = Some(col as u32);
                cells[bottom.0][bottom.1] = Some(5 + col as u32);
                let mut rest = [1, 2, 5, 6, 7].into_iter();
                let grid = cells
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|cell| cell.or_else(|| rest.next()).unwrap())
                            .collect()
                    })
                    .collect();
                let mut puzzle = Puzzle::from_grid(3, 5, grid).unwrap();

                solve_row1_tile(&mut puzzle, col).unwrap_or_else(|e| {
                    panic!("top {:?} bottom {:?} left of {}: {}", top, bottom, left, e)
                });
                assert!(puzzle.row_one_invariant(left));
            }
        }
    }

    #[test]
    fn test_phase_preconditions() {
        let mut puzzle = Puzzle::new(4, 4).unwrap();
        assert!(matches!(
            solve_interior_tile(&mut puzzle, 3, 3),
            Err(PuzzleError::InvariantViolation { .. })
        ));
        assert!(matches!(
            solve_interior_tile(&mut puzzle, 1, 3),
            Err(PuzzleError::InvalidTarget { row: 1, col: 3 })
        ));
        assert!(matches!(
            solve_col0_tile(&mut puzzle, 1),
            Err(PuzzleError::InvalidTarget { .. })
        ));
        assert!(matches!(
            solve_row1_tile(&mut puzzle, 1),
            Err(PuzzleError::InvalidTarget { .. })
        ));
        assert!(matches!(
            solve_2x2(&mut puzzle),
            Err(PuzzleError::InvariantViolation { .. })
        ));
        assert!(puzzle.is_solved(), "failed preconditions must not move tiles");
    }
}
