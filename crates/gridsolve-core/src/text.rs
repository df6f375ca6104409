//! Line-oriented text format for puzzle files.
//!
//! A puzzle file holds one line per grid row and one character per cell,
//! with [`EMPTY_CELL`] marking an unknown cell. There are no separators
//! between columns. The format carries cell strings only; interpreting them
//! against an alphabet is left to [`Grid::from_cells`](crate::Grid::from_cells),
//! which treats the sentinel like any other character outside the alphabet.
//!
//! # Examples
//!
//! ```
//! use gridsolve_core::text;
//!
//! let cells = text::parse_grid_text("1.\r\n.2\r\n");
//! assert_eq!(cells, [["1", "."], [".", "2"]]);
//!
//! let written = text::format_grid_text(&cells);
//! assert_eq!(text::parse_grid_text(&written), cells);
//! ```

/// Character written for a cell that does not hold exactly one symbol.
pub const EMPTY_CELL: char = '.';

/// Line terminator written after every row.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Line terminator written after every row.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Splits puzzle text into rows of one-character cell strings.
///
/// Lines may end with `\n`, `\r\n`, or `\r`; blank lines are skipped. Rows
/// shorter than the longest row are padded with [`EMPTY_CELL`].
#[must_use]
pub fn parse_grid_text(data: &str) -> Vec<Vec<String>> {
    let lines: Vec<&str> = data
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect();
    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    lines
        .into_iter()
        .map(|line| {
            let mut row: Vec<String> = line.chars().map(String::from).collect();
            row.resize(width, EMPTY_CELL.to_string());
            row
        })
        .collect()
}

/// Writes rows of cell strings as puzzle text.
///
/// A cell whose text is exactly one character is written as is; any other
/// cell (blank, or listing several candidates) becomes [`EMPTY_CELL`].
#[must_use]
pub fn format_grid_text<R, S>(cells: &[R]) -> String
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for row in cells {
        for cell in row.as_ref() {
            let mut chars = cell.as_ref().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => out.push(c),
                _ => out.push(EMPTY_CELL),
            }
        }
        out.push_str(LINE_ENDING);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_short_rows() {
        let cells = parse_grid_text("123\n4\n\n56\n");
        assert_eq!(cells, [["1", "2", "3"], ["4", ".", "."], ["5", "6", "."]]);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_grid_text("").is_empty());
        assert!(parse_grid_text("\r\n\r\n").is_empty());
    }

    #[test]
    fn test_format_replaces_non_single_cells() {
        let cells = [["1", "", "23"], ["A", ".", "x"]];
        let text = format_grid_text(&cells);
        assert_eq!(text, format!("1..{LINE_ENDING}A.x{LINE_ENDING}"));
    }

    #[test]
    fn test_round_trip_solved_grid() {
        let cells: Vec<Vec<String>> = ["1234", "3412", "2143", "4321"]
            .iter()
            .map(|row| row.chars().map(String::from).collect())
            .collect();
        assert_eq!(parse_grid_text(&format_grid_text(&cells)), cells);
    }
}
