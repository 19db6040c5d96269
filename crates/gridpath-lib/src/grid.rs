use serde::Serialize;

use crate::cell::{Cell, CellState, Position};
use crate::config::GridConfig;
use crate::error::{Error, Result};

/// Orthogonal neighbour offsets in expansion order: +row, -row, +col, -col.
/// Downstream tie-breaking depends on this order staying fixed.
const NEIGHBOUR_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Square grid that exclusively owns its cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    side_length: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build an N×N grid of unvisited cells.
    pub fn new(side_length: usize) -> Result<Self> {
        if side_length == 0 {
            return Err(Error::InvalidSideLength { side_length });
        }

        let cells = (0..side_length)
            .flat_map(|row| (0..side_length).map(move |col| Cell::new(Position::new(row, col))))
            .collect();

        Ok(Self { side_length, cells })
    }

    /// Build a grid from a validated configuration.
    pub fn from_config(config: &GridConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.side_length)
    }

    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Both axes share the `[0, N)` bound.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.side_length && position.col < self.side_length
    }

    fn index(&self, position: Position) -> usize {
        position.row * self.side_length + position.col
    }

    /// Borrow the cell at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the grid. Use [`Grid::try_cell`] for
    /// untrusted coordinates.
    pub fn cell(&self, position: Position) -> &Cell {
        assert!(
            self.contains(position),
            "position {position} outside {n}x{n} grid",
            n = self.side_length
        );
        &self.cells[self.index(position)]
    }

    /// Checked variant of [`Grid::cell`].
    pub fn try_cell(&self, position: Position) -> Result<&Cell> {
        self.check_bounds(position)?;
        Ok(&self.cells[self.index(position)])
    }

    pub(crate) fn cell_mut(&mut self, position: Position) -> Result<&mut Cell> {
        self.check_bounds(position)?;
        let index = self.index(position);
        Ok(&mut self.cells[index])
    }

    fn check_bounds(&self, position: Position) -> Result<()> {
        if self.contains(position) {
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                position,
                side_length: self.side_length,
            })
        }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.side_length)
    }

    /// Positions of every cell currently in `state`.
    pub fn positions_in(&self, state: CellState) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(move |cell| cell.state() == state)
            .map(Cell::position)
    }

    /// In-bounds, non-wall orthogonal neighbours of `position`, ordered
    /// +row, -row, +col, -col.
    pub fn neighbours(&self, position: Position) -> Vec<Position> {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| {
                let row = position.row.checked_add_signed(d_row)?;
                let col = position.col.checked_add_signed(d_col)?;
                Some(Position::new(row, col))
            })
            .filter(|&next| self.contains(next))
            .filter(|&next| self.cell(next).state() != CellState::Wall)
            .collect()
    }

    /// Apply the state-transition rule to the cell at `position`.
    ///
    /// Returns [`Error::InvalidTransition`] without touching the cell when it
    /// is `Start` or `Finish`.
    pub fn set_state(&mut self, position: Position, state: CellState, now: u64) -> Result<()> {
        self.cell_mut(position)?.transition(state, now)
    }

    pub(crate) fn set_score(&mut self, position: Position, score: u32) -> Result<()> {
        self.cell_mut(position)?.set_score(Some(score));
        Ok(())
    }

    /// Forget every score computed so far.
    pub fn clear_scores(&mut self) {
        for cell in &mut self.cells {
            cell.set_score(None);
        }
    }
}
