//! Blank moves and move sequences.
//!
//! A move names the direction the blank travels: `u` swaps the blank with the
//! tile above it, and so on. Sequences are written as strings over
//! `{u, d, l, r}`, which is also their `Display` form.

use crate::error::PuzzleError;
use std::fmt;
use std::str::FromStr;

/// One elementary move of the blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in `u, d, l, r` order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column delta applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The move that undoes this one.
    ///
    /// ```
    /// use fifteen_solver::moves::Direction;
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = PuzzleError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'u' => Ok(Direction::Up),
            'd' => Ok(Direction::Down),
            'l' => Ok(Direction::Left),
            'r' => Ok(Direction::Right),
            other => Err(PuzzleError::InvalidMove(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An ordered list of blank moves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MoveSequence(Vec<Direction>);

impl MoveSequence {
    pub fn new() -> Self {
        MoveSequence(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Direction> {
        self.0.iter()
    }

    pub fn push(&mut self, direction: Direction) {
        self.0.push(direction);
    }

    /// Appends `direction` `count` times.
    pub fn push_repeated(&mut self, direction: Direction, count: usize) {
        self.0.extend(std::iter::repeat(direction).take(count));
    }

    /// Appends a fixed move template.
    pub fn push_template(&mut self, template: &[Direction]) {
        self.0.extend_from_slice(template);
    }

    /// Appends a fixed move template `count` times.
    pub fn push_template_repeated(&mut self, template: &[Direction], count: usize) {
        for _ in 0..count {
            self.push_template(template);
        }
    }

    pub fn append(&mut self, other: MoveSequence) {
        self.0.extend(other.0);
    }

    /// Strips adjacent cancelling pairs (`ud`, `du`, `lr`, `rl`) until none remain.
    ///
    /// A cancelling pair leaves the grid unchanged, so the reduced sequence has
    /// the same net effect as the original. The reduced form is unique, so a
    /// single stack pass reaches the same fixed point as repeated substring
    /// removal.
    ///
    /// ```
    /// use fifteen_solver::moves::MoveSequence;
    /// let moves: MoveSequence = "ulrdrlld".parse().unwrap();
    /// assert_eq!(moves.cancel_redundant().to_string(), "ld");
    /// ```
    pub fn cancel_redundant(&self) -> MoveSequence {
        let mut reduced: Vec<Direction> = Vec::with_capacity(self.0.len());
        for &direction in &self.0 {
            match reduced.last() {
                Some(&last) if last == direction.opposite() => {
                    reduced.pop();
                }
                _ => reduced.push(direction),
            }
        }
        MoveSequence(reduced)
    }
}

impl From<Vec<Direction>> for MoveSequence {
    fn from(moves: Vec<Direction>) -> Self {
        MoveSequence(moves)
    }
}

impl From<&[Direction]> for MoveSequence {
    fn from(moves: &[Direction]) -> Self {
        MoveSequence(moves.to_vec())
    }
}

impl FromStr for MoveSequence {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(Direction::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(MoveSequence)
    }
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for direction in &self.0 {
            write!(f, "{}", direction.to_char())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MoveSequence {
    type Item = &'a Direction;
    type IntoIter = std::slice::Iter<'a, Direction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let moves: MoveSequence = "uldr".parse().unwrap();
        assert_eq!(
            moves.as_slice(),
            &[Direction::Up, Direction::Left, Direction::Down, Direction::Right]
        );
        assert_eq!(moves.to_string(), "uldr");
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let result = "ulx".parse::<MoveSequence>();
        assert_eq!(result, Err(PuzzleError::InvalidMove('x')));
    }

    #[test]
    fn test_parse_empty() {
        let moves: MoveSequence = "".parse().unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let (dr, dc) = direction.offset();
            let (odr, odc) = direction.opposite().offset();
            assert_eq!((dr + odr, dc + odc), (0, 0));
        }
    }

    #[test]
    fn test_cancel_redundant_nested_pairs() {
        let moves: MoveSequence = "rllud".parse().unwrap();
        assert_eq!(moves.cancel_redundant().to_string(), "l");

        let moves: MoveSequence = "udlr".parse().unwrap();
        assert!(moves.cancel_redundant().is_empty());
    }

    #[test]
    fn test_cancel_redundant_reaches_fixed_point() {
        let moves: MoveSequence = "uulddrrlluurdldrrulddu".parse().unwrap();
        let reduced = moves.cancel_redundant();
        let text = reduced.to_string();
        for pair in ["ud", "du", "lr", "rl"] {
            assert!(!text.contains(pair), "{} still contains {}", text, pair);
        }
        assert_eq!(reduced.cancel_redundant(), reduced);
    }

    #[test]
    fn test_cancel_redundant_keeps_non_inverse_neighbours() {
        let moves: MoveSequence = "lddru".parse().unwrap();
        assert_eq!(moves.cancel_redundant(), moves);
    }

    #[test]
    fn test_push_helpers() {
        let mut moves = MoveSequence::new();
        moves.push_repeated(Direction::Up, 2);
        moves.push_template(&[Direction::Left, Direction::Down]);
        moves.push_template_repeated(&[Direction::Right], 3);
        moves.push(Direction::Down);
        assert_eq!(moves.to_string(), "uuldrrrd");
        assert_eq!(moves.len(), 8);
    }
}
