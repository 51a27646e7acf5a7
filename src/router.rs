//! Tile router.
//!
//! Given the slot to fill and the current position of the tile that belongs
//! there, with the blank sitting on the slot, the router emits a move sequence
//! that brings the tile into the slot and parks the blank directly left of it.
//! Only cells in the target row left of the slot and the rows above it are
//! disturbed along the way.
//!
//! Routes are a closed set of cases, picked once from the geometry by
//! [`Route::plan`] and expanded into moves by [`Route::moves`]. Each case is
//! built from the fixed templates below; the phase solvers rely on the exact
//! post-state these templates leave behind.

use crate::engine::Position;
use crate::error::PuzzleError;
use crate::moves::{Direction, MoveSequence};
use tracing::trace;
use Direction::{Down, Left, Right, Up};

/// Blank above the tile: drops the tile one row, blank ends above it again.
const DROP_ONE_ROW: [Direction; 5] = [Left, Down, Down, Right, Up];
/// Blank above the tile: parks the blank left of it.
const SEAT_LEFT: [Direction; 2] = [Left, Down];
/// Blank right of the tile: carries the blank over to its left.
const SWING_OVER: [Direction; 4] = [Up, Left, Left, Down];
/// Blank left of the tile: drops the tile one row, blank ends above it.
const STEP_UNDER: [Direction; 3] = [Down, Right, Up];
/// Blank left of the tile: puts the blank above it.
const CLIMB_OVER: [Direction; 2] = [Up, Right];

/// Side of the target column the tile starts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction the blank travels to reach the tile.
    fn toward(self) -> Direction {
        match self {
            Side::Left => Left,
            Side::Right => Right,
        }
    }

    fn away(self) -> Direction {
        self.toward().opposite()
    }
}

/// How a tile travels to its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// The tile is in the target column, `tile_row` rows above the slot.
    Above { tile_row: usize },
    /// The tile is in row 0, `distance` columns away. It is first pushed
    /// down into row 1 so the row above stays free for the sideways walk.
    TopRow { side: Side, distance: usize },
    /// The tile is in `tile_row >= 1`, `distance` columns away.
    Across {
        side: Side,
        distance: usize,
        tile_row: usize,
    },
}

impl Route {
    /// Picks the route for the tile at `tile` bound for `target`.
    ///
    /// The target must have a column to its left and a row above it, and the
    /// tile must sit in the target row or above it.
    pub fn plan(target: Position, tile: Position) -> Result<Route, PuzzleError> {
        let (target_row, target_col) = target;
        let (tile_row, tile_col) = tile;

        if target_row == 0 || target_col == 0 {
            return Err(PuzzleError::InvalidTarget {
                row: target_row,
                col: target_col,
            });
        }
        if tile_row > target_row || tile == target {
            return Err(PuzzleError::InvariantViolation {
                phase: "position tile",
                row: tile_row,
                col: tile_col,
            });
        }

        let side = if tile_col > target_col {
            Side::Right
        } else {
            Side::Left
        };
        let distance = tile_col.abs_diff(target_col);

        let route = match (distance, tile_row) {
            (0, _) => Route::Above { tile_row },
            (_, 0) => Route::TopRow { side, distance },
            _ => Route::Across {
                side,
                distance,
                tile_row,
            },
        };
        Ok(route)
    }

    /// Expands the route into moves, starting with the blank on `target`.
    pub fn moves(&self, target: Position) -> MoveSequence {
        let (target_row, _) = target;
        let mut moves = MoveSequence::new();

        let aligned_row = match *self {
            Route::Above { tile_row } => {
                moves.push_repeated(Up, target_row - tile_row);
                tile_row + 1
            }
            Route::TopRow { side, distance } => {
                moves.push_repeated(Up, target_row - 1);
                moves.push_repeated(side.toward(), distance);
                moves.push_template(&[Up, side.away(), Down]);
                shift_across(&mut moves, side, distance, 1, target_row)
            }
            Route::Across {
                side,
                distance,
                tile_row,
            } => {
                moves.push_repeated(Up, target_row - tile_row);
                moves.push_repeated(side.toward(), distance - 1);
                shift_across(&mut moves, side, distance, tile_row, target_row)
            }
        };

        moves.push_template_repeated(&DROP_ONE_ROW, target_row - aligned_row);
        moves.push_template(&SEAT_LEFT);
        moves
    }
}

/// Walks the tile `distance` columns into the target column, starting with
/// the blank beside it on the far side from the target. Leaves the blank
/// above the tile and returns the tile's row.
fn shift_across(
    moves: &mut MoveSequence,
    side: Side,
    distance: usize,
    tile_row: usize,
    target_row: usize,
) -> usize {
    let (toward, away) = (side.toward(), side.away());

    moves.push(toward);
    moves.push_template_repeated(&[Up, away, away, Down, toward], distance - 1);
    if side == Side::Right {
        moves.push_template(&SWING_OVER);
    }

    if tile_row < target_row {
        moves.push_template(&STEP_UNDER);
        tile_row + 1
    } else {
        moves.push_template(&CLIMB_OVER);
        tile_row
    }
}

/// Moves the tile at `tile` to `target`, leaving the blank left of it.
///
/// The blank must be on `target` when the moves are applied.
///
/// # Examples
/// ```
/// use fifteen_solver::router::position_tile;
/// let moves = position_tile((2, 1), (0, 1)).unwrap();
/// assert_eq!(moves.to_string(), "uulddruld");
/// ```
pub fn position_tile(target: Position, tile: Position) -> Result<MoveSequence, PuzzleError> {
    let route = Route::plan(target, tile)?;
    trace!(?target, ?tile, ?route, "routing tile");
    Ok(route.moves(target))
}
