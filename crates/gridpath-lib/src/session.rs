//! Caller-owned search session.
//!
//! A [`Session`] holds the grid and the search state across steps and
//! implements the editing flow of the demonstrator: the first placement
//! becomes the start cell, the second the finish cell, and every later one a
//! wall. Stepping is only possible once both endpoints exist, and editing is
//! locked from the first step until [`Session::reset`].

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::cell::{CellState, Position};
use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::layout::Layout;
use crate::search::{self, SearchState, StepOutcome};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Endpoints and walls may be edited; no step has run yet.
    Editing,
    /// At least one step has run and the finish has not been reached.
    Searching,
    /// The last step selected the finish cell.
    Found,
    /// The frontier ran dry before reaching the finish cell.
    Exhausted,
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, SessionStatus::Found | SessionStatus::Exhausted)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SessionStatus::Editing => "editing",
            SessionStatus::Searching => "searching",
            SessionStatus::Found => "found",
            SessionStatus::Exhausted => "exhausted",
        };
        f.write_str(value)
    }
}

/// What an edit request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "state")]
pub enum EditOutcome {
    /// The cell took the given state.
    Placed(CellState),
    /// The cell was reset to unvisited.
    Cleared,
    /// The cell changed too recently; nothing happened.
    Debounced,
}

/// Grid plus search state, carried between user actions.
#[derive(Debug, Clone)]
pub struct Session {
    config: GridConfig,
    grid: Grid,
    start: Option<Position>,
    finish: Option<Position>,
    search: Option<SearchState>,
    status: SessionStatus,
}

impl Session {
    /// Empty session on a fresh grid.
    pub fn new(config: GridConfig) -> Result<Self> {
        let grid = Grid::from_config(&config)?;
        Ok(Self {
            config,
            grid,
            start: None,
            finish: None,
            search: None,
            status: SessionStatus::Editing,
        })
    }

    /// Session seeded from a layout. The layout's size overrides
    /// `config.side_length`; visited and current markers load as unvisited.
    pub fn from_layout(layout: &Layout, config: GridConfig) -> Result<Self> {
        let config = config.with_side_length(layout.side_length());
        let mut session = Self::new(config)?;

        for (position, state) in layout.iter() {
            match state {
                CellState::Unvisited | CellState::Visited | CellState::Current => {}
                CellState::Wall | CellState::Start | CellState::Finish => {
                    session.grid.set_state(position, state, 0)?;
                }
            }
        }

        session.start = layout.start();
        session.finish = layout.finish();
        session.search = session.fresh_search();
        Ok(session)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn finish(&self) -> Option<Position> {
        self.finish
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn search(&self) -> Option<&SearchState> {
        self.search.as_ref()
    }

    /// Active cell of the search; the start cell before the first step.
    pub fn current(&self) -> Option<Position> {
        self.search.as_ref().map(|search| search.current)
    }

    pub fn steps_taken(&self) -> usize {
        self.search.as_ref().map_or(0, SearchState::steps)
    }

    pub fn visited_len(&self) -> usize {
        self.search.as_ref().map_or(0, |search| search.visited.len())
    }

    pub fn frontier_len(&self) -> usize {
        self.search.as_ref().map_or(0, |search| search.frontier.len())
    }

    /// Whether `position` is waiting in the frontier.
    pub fn is_queued(&self, position: Position) -> bool {
        self.search
            .as_ref()
            .is_some_and(|search| search.frontier.contains_position(position))
    }

    /// Primary edit: start, then finish, then walls.
    pub fn place(&mut self, position: Position, now: u64) -> Result<EditOutcome> {
        self.ensure_editable()?;
        if self.debounced(position, now)? {
            return Ok(EditOutcome::Debounced);
        }

        let target = match (self.start, self.finish) {
            (None, _) => CellState::Start,
            (Some(_), None) => CellState::Finish,
            (Some(_), Some(_)) => CellState::Wall,
        };
        self.grid.set_state(position, target, now)?;

        match target {
            CellState::Start => self.start = Some(position),
            CellState::Finish => self.finish = Some(position),
            _ => {}
        }
        if target.is_fixed() {
            self.search = self.fresh_search();
        }

        debug!(%position, state = %target, "placed cell");
        Ok(EditOutcome::Placed(target))
    }

    /// Secondary edit: return a cell to unvisited.
    pub fn clear(&mut self, position: Position, now: u64) -> Result<EditOutcome> {
        self.ensure_editable()?;
        if self.debounced(position, now)? {
            return Ok(EditOutcome::Debounced);
        }

        self.grid.set_state(position, CellState::Unvisited, now)?;
        debug!(%position, "cleared cell");
        Ok(EditOutcome::Cleared)
    }

    /// Run exactly one search step.
    ///
    /// Fails with [`Error::InvalidState`] before both endpoints exist or
    /// after the search finished, and with [`Error::ExhaustedFrontier`] when
    /// the finish cell is unreachable.
    pub fn advance(&mut self, now: u64) -> Result<StepOutcome> {
        match self.status {
            SessionStatus::Found => {
                return Err(invalid_state("the finish cell has already been reached"));
            }
            SessionStatus::Exhausted => {
                return Err(invalid_state(
                    "the frontier is exhausted; reset the session to search again",
                ));
            }
            SessionStatus::Editing | SessionStatus::Searching => {}
        }

        let (Some(finish), Some(state)) = (self.finish, self.search.as_mut()) else {
            return Err(invalid_state(
                "start and finish must both be placed before stepping",
            ));
        };

        self.status = SessionStatus::Searching;
        match search::step(&mut self.grid, state, finish, now) {
            Ok(outcome) => {
                if outcome.reached_finish {
                    self.status = SessionStatus::Found;
                    info!(steps = state.steps(), %finish, "finish found");
                }
                Ok(outcome)
            }
            Err(Error::ExhaustedFrontier) => {
                self.status = SessionStatus::Exhausted;
                info!(visited = state.visited.len(), "no path to finish");
                Err(Error::ExhaustedFrontier)
            }
            Err(err) => Err(err),
        }
    }

    /// Discard search progress, keeping walls and endpoints.
    pub fn reset(&mut self, now: u64) -> Result<()> {
        let stale: Vec<Position> = self
            .grid
            .cells()
            .filter(|cell| matches!(cell.state(), CellState::Visited | CellState::Current))
            .map(|cell| cell.position())
            .collect();
        for position in stale {
            self.grid.set_state(position, CellState::Unvisited, now)?;
        }

        self.grid.clear_scores();
        self.search = self.fresh_search();
        self.status = SessionStatus::Editing;
        debug!("session reset");
        Ok(())
    }

    /// Serializable view of the session for machine-readable output.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            side_length: self.grid.side_length(),
            start: self.start,
            finish: self.finish,
            current: self.current(),
            steps: self.steps_taken(),
            visited: self.visited_len(),
            frontier: self
                .search
                .as_ref()
                .map(|search| search.frontier.entries())
                .unwrap_or_default(),
            rows: self.grid.to_layout().lines().map(str::to_string).collect(),
            scores: self
                .grid
                .cells()
                .filter_map(|cell| cell.score().map(|score| (cell.position(), score)))
                .collect(),
        }
    }

    fn fresh_search(&self) -> Option<SearchState> {
        match (self.start, self.finish) {
            (Some(start), Some(_)) => Some(SearchState::new(start)),
            _ => None,
        }
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.status == SessionStatus::Editing {
            Ok(())
        } else {
            Err(invalid_state(format!(
                "cannot edit the grid while the session is {}; reset first",
                self.status
            )))
        }
    }

    fn debounced(&self, position: Position, now: u64) -> Result<bool> {
        let last = self.grid.try_cell(position)?.last_updated();
        Ok(self.config.cooldown_ms > 0
            && last > 0
            && now.saturating_sub(last) <= self.config.cooldown_ms)
    }
}

/// Machine-readable session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub side_length: usize,
    pub start: Option<Position>,
    pub finish: Option<Position>,
    pub current: Option<Position>,
    pub steps: usize,
    pub visited: usize,
    pub frontier: Vec<(u32, Position)>,
    pub rows: Vec<String>,
    pub scores: Vec<(Position, u32)>,
}

fn invalid_state(reason: impl Into<String>) -> Error {
    Error::InvalidState {
        reason: reason.into(),
    }
}
