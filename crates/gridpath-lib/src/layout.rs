//! Plain-text grid layouts.
//!
//! One line per row and one character per cell:
//!
//! | char | state     |
//! |------|-----------|
//! | `.`  | unvisited |
//! | `#`  | wall      |
//! | `S`  | start     |
//! | `F`  | finish    |
//! | `v`  | visited   |
//! | `@`  | current   |
//!
//! ```
//! # use gridpath_lib::{Layout, Position};
//! let layout: Layout = "S.#\n..#\n..F\n".parse().unwrap();
//! assert_eq!(layout.side_length(), 3);
//! assert_eq!(layout.finish(), Some(Position::new(2, 2)));
//! ```

use std::path::Path;
use std::str::FromStr;

use crate::cell::{CellState, Position};
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Parsed square layout, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    side_length: usize,
    states: Vec<CellState>,
}

impl Layout {
    /// Parse layout text. Trailing blank lines and trailing whitespace are
    /// ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let side_length = lines.len();
        if side_length == 0 {
            return Err(Error::InvalidSideLength { side_length });
        }

        let mut states = Vec::new();
        let mut start = None;
        let mut finish = None;

        for (row, line) in lines.iter().enumerate() {
            let columns = line.chars().count();
            if columns != side_length {
                return Err(Error::LayoutNotSquare {
                    rows: side_length,
                    columns,
                });
            }

            for (col, symbol) in line.chars().enumerate() {
                let state = CellState::from_symbol(symbol).ok_or_else(|| Error::LayoutParse {
                    line: row + 1,
                    column: col + 1,
                    message: format!("unknown cell symbol '{symbol}'"),
                })?;

                let position = Position::new(row, col);
                let marker = match state {
                    CellState::Start => Some(&mut start),
                    CellState::Finish => Some(&mut finish),
                    _ => None,
                };
                if let Some(slot) = marker {
                    if slot.replace(position).is_some() {
                        return Err(Error::DuplicateMarker { state, position });
                    }
                }

                states.push(state);
            }
        }

        Ok(Self {
            side_length,
            states,
        })
    }

    /// Read and parse a layout file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::LayoutRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// State at `position`, if it lies within the layout.
    pub fn state_at(&self, position: Position) -> Option<CellState> {
        if position.row >= self.side_length || position.col >= self.side_length {
            return None;
        }
        self.states
            .get(position.row * self.side_length + position.col)
            .copied()
    }

    /// Every cell with its state, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        let side = self.side_length;
        self.states
            .iter()
            .enumerate()
            .map(move |(index, &state)| (Position::new(index / side, index % side), state))
    }

    pub fn start(&self) -> Option<Position> {
        self.find(CellState::Start)
    }

    pub fn finish(&self) -> Option<Position> {
        self.find(CellState::Finish)
    }

    fn find(&self, state: CellState) -> Option<Position> {
        self.iter()
            .find(|&(_, candidate)| candidate == state)
            .map(|(position, _)| position)
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Grid {
    /// Dump the grid in the layout text format, one `\n`-terminated line per row.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.side_length() * (self.side_length() + 1));
        for row in self.rows() {
            out.extend(row.iter().map(|cell| cell.state().symbol()));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markers_and_walls() {
        let layout = Layout::parse("S#.\n.#.\n..F").unwrap();
        assert_eq!(layout.start(), Some(Position::new(0, 0)));
        assert_eq!(layout.finish(), Some(Position::new(2, 2)));
        assert_eq!(layout.state_at(Position::new(1, 1)), Some(CellState::Wall));
        assert_eq!(layout.state_at(Position::new(3, 0)), None);
    }

    #[test]
    fn unknown_symbol_reports_line_and_column() {
        let err = Layout::parse("...\n.x.\n...").unwrap_err();
        match err {
            Error::LayoutParse { line, column, .. } => {
                assert_eq!((line, column), (2, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_square_input() {
        let err = Layout::parse("...\n..\n...").unwrap_err();
        assert!(matches!(
            err,
            Error::LayoutNotSquare {
                rows: 3,
                columns: 2
            }
        ));
    }

    #[test]
    fn rejects_second_start() {
        let err = Layout::parse("S.\n.S").unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateMarker {
                state: CellState::Start,
                ..
            }
        ));
    }

    #[test]
    fn empty_input_has_no_side_length() {
        assert!(matches!(
            Layout::parse("\n\n"),
            Err(Error::InvalidSideLength { side_length: 0 })
        ));
    }

    #[test]
    fn grid_dump_uses_layout_symbols() {
        let mut grid = Grid::new(2).unwrap();
        grid.set_state(Position::new(0, 0), CellState::Start, 1)
            .unwrap();
        grid.set_state(Position::new(1, 0), CellState::Wall, 1).unwrap();
        assert_eq!(grid.to_layout(), "S.\n#.\n");
    }
}
