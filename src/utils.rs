use crate::engine::Puzzle;
use crate::error::PuzzleError;

/// Parses an array of string slices into a `Puzzle`.
///
/// Each string slice is one row of the grid, starting from row 0, holding
/// whitespace-separated integers. The height is the number of rows and the
/// width is the number of values in the first row; every value of
/// `0..height*width` must appear exactly once, `0` being the blank.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the grid.
///
/// # Returns
/// * `Ok(Puzzle)` if parsing is successful.
/// * `Err(PuzzleError::MalformedGrid)` if:
///     - A token is not a non-negative integer.
///     - The rows have different lengths, or there are fewer than 2 rows or columns.
///     - A value is out of range or repeated.
///
/// # Examples
/// ```
/// use fifteen_solver::utils::puzzle_from_str_array;
///
/// let puzzle = puzzle_from_str_array(&["3 2", "0 1"]).unwrap();
/// assert_eq!(puzzle.height(), 2);
/// assert_eq!(puzzle.get_number(0, 0), 3);
///
/// assert!(puzzle_from_str_array(&["3 2", "0 x"]).is_err());
/// assert!(puzzle_from_str_array(&["3 2 1", "0 1"]).is_err());
/// ```
pub fn puzzle_from_str_array(s: &[&str]) -> Result<Puzzle, PuzzleError> {
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(s.len());

    for (r, row_str) in s.iter().enumerate() {
        let row = row_str
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| {
                    PuzzleError::MalformedGrid(format!(
                        "unrecognized value '{}' in row {}",
                        token, r
                    ))
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;
        grid.push(row);
    }

    let height = grid.len();
    let width = grid.first().map_or(0, Vec::len);
    Puzzle::from_grid(height, width, grid)
}

/// Parses a whole grid file: one row per line, blank lines ignored.
///
/// This is the same layout `Puzzle` prints with `Display`.
pub fn puzzle_from_text(text: &str) -> Result<Puzzle, PuzzleError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    puzzle_from_str_array(&lines)
}
