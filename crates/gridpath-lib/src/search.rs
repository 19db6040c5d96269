//! Incremental best-first search over a [`Grid`].
//!
//! The engine never loops on its own: [`step`] performs exactly one
//! expand-and-select cycle and hands the new current cell back to the caller,
//! which decides whether to keep going.
//!
//! Scoring uses a constant step cost `g = 1` rather than the accumulated cost
//! from the start cell, so `f = 1 + manhattan(cell, finish)`. The ordering is
//! therefore that of greedy best-first search with a constant offset.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cell::{CellState, Position};
use crate::error::{Error, Result};
use crate::frontier::Frontier;
use crate::grid::Grid;

/// Cost charged for moving from the current cell to any neighbour.
pub const STEP_COST: u32 = 1;

/// Heuristic distance between two cells.
pub fn manhattan(from: Position, to: Position) -> u32 {
    from.manhattan(&to)
}

/// Algorithm state carried between steps by the caller.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub visited: HashSet<Position>,
    pub frontier: Frontier,
    pub current: Position,
    steps: usize,
}

impl SearchState {
    /// Fresh state with nothing visited and an empty frontier, positioned on `start`.
    pub fn new(start: Position) -> Self {
        Self {
            visited: HashSet::new(),
            frontier: Frontier::new(),
            current: start,
            steps: 0,
        }
    }

    /// Number of steps that selected a new current cell.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// Neighbour evaluated during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredNeighbour {
    pub position: Position,
    pub score: u32,
    /// `false` when the same `(score, position)` pair was already queued.
    pub queued: bool,
}

/// Result of a single expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// Cell that was expanded.
    pub expanded: Position,
    /// Cell selected as the new current node.
    pub next_current: Position,
    /// Score the new current node was queued with.
    pub next_score: u32,
    pub scored: Vec<ScoredNeighbour>,
    pub reached_finish: bool,
}

/// Advance the search by one expansion.
///
/// Marks `search.current` visited, scores its unvisited neighbours, queues
/// them, pops the best frontier entry and makes it the new current cell.
/// Cell state changes go through the grid's transition rule, so a `Start`
/// or `Finish` cell silently keeps its state.
///
/// Returns [`Error::ExhaustedFrontier`] when nothing is left to pop. The
/// visited set and scores updated before the pop are kept in that case.
pub fn step(
    grid: &mut Grid,
    search: &mut SearchState,
    finish: Position,
    now: u64,
) -> Result<StepOutcome> {
    let current = search.current;
    search.visited.insert(current);

    let mut scored = Vec::new();
    for neighbour in grid.neighbours(current) {
        if search.visited.contains(&neighbour) {
            continue;
        }

        let score = STEP_COST.saturating_add(manhattan(neighbour, finish));
        grid.set_score(neighbour, score)?;
        let queued = search.frontier.push(score, neighbour);
        trace!(%neighbour, score, queued, "scored neighbour");

        scored.push(ScoredNeighbour {
            position: neighbour,
            score,
            queued,
        });
    }

    let Some((next_score, next_current)) = search.frontier.pop() else {
        debug!(%current, visited = search.visited.len(), "frontier exhausted");
        return Err(Error::ExhaustedFrontier);
    };

    transition_unless_fixed(grid, current, CellState::Visited, now)?;
    transition_unless_fixed(grid, next_current, CellState::Current, now)?;

    search.current = next_current;
    search.steps += 1;

    debug!(
        expanded = %current,
        next = %next_current,
        score = next_score,
        frontier = search.frontier.len(),
        "search step"
    );

    Ok(StepOutcome {
        expanded: current,
        next_current,
        next_score,
        scored,
        reached_finish: next_current == finish,
    })
}

fn transition_unless_fixed(
    grid: &mut Grid,
    position: Position,
    state: CellState,
    now: u64,
) -> Result<()> {
    match grid.set_state(position, state, now) {
        Err(Error::InvalidTransition { state: fixed, .. }) => {
            trace!(%position, %fixed, target = %state, "transition skipped");
            Ok(())
        }
        other => other,
    }
}
