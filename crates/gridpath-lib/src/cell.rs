use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Grid coordinate. Rows grow downward, columns grow to the right.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(&self, other: &Position) -> u32 {
        let distance = self
            .row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col));
        u32::try_from(distance).unwrap_or(u32::MAX)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Mutually exclusive state tag carried by every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Unvisited,
    Visited,
    Wall,
    Start,
    Finish,
    Current,
}

impl CellState {
    /// All states, in declaration order.
    pub const ALL: [CellState; 6] = [
        CellState::Unvisited,
        CellState::Visited,
        CellState::Wall,
        CellState::Start,
        CellState::Finish,
        CellState::Current,
    ];

    /// `Start` and `Finish` never change once assigned.
    pub fn is_fixed(self) -> bool {
        matches!(self, CellState::Start | CellState::Finish)
    }

    /// Single-character symbol used by the text layout format.
    pub fn symbol(self) -> char {
        match self {
            CellState::Unvisited => '.',
            CellState::Visited => 'v',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::Finish => 'F',
            CellState::Current => '@',
        }
    }

    /// Inverse of [`CellState::symbol`].
    pub fn from_symbol(symbol: char) -> Option<Self> {
        CellState::ALL
            .into_iter()
            .find(|state| state.symbol() == symbol)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            CellState::Unvisited => "unvisited",
            CellState::Visited => "visited",
            CellState::Wall => "wall",
            CellState::Start => "start",
            CellState::Finish => "finish",
            CellState::Current => "current",
        };
        f.write_str(value)
    }
}

/// One grid position with its state, optional f-score and last change time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    position: Position,
    state: CellState,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<u32>,
    last_updated: u64,
}

impl Cell {
    /// Fresh unvisited cell with no score.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            state: CellState::Unvisited,
            score: None,
            last_updated: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// f-score from the most recent evaluation, `None` if never evaluated.
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Timestamp of the last successful state change.
    pub fn last_updated(&self) -> u64 {
        self.last_updated
    }

    pub(crate) fn set_score(&mut self, score: Option<u32>) {
        self.score = score;
    }

    /// Move to `state` at time `now`. Fixed cells reject the change and
    /// keep both their state and timestamp.
    pub fn transition(&mut self, state: CellState, now: u64) -> Result<()> {
        if self.state.is_fixed() {
            return Err(Error::InvalidTransition {
                position: self.position,
                state: self.state,
            });
        }
        self.state = state;
        self.last_updated = now;
        Ok(())
    }
}
