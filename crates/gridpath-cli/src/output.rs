//! Output formatting for grids and search steps.
//!
//! Text rendering draws one row per line, each cell as its layout symbol
//! followed by its score when it has one. Unscored cells carry no label.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use gridpath_lib::{CellState, Session, SessionStatus, StepOutcome};

use crate::terminal::ColorPalette;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable grid drawings.
    #[default]
    Text,
    /// One JSON document per event.
    Json,
}

/// Symbol for cells waiting in the frontier.
pub const QUEUED_SYMBOL: char = '+';

/// Draw the session grid with axis labels.
pub fn render_grid(session: &Session, palette: &ColorPalette) -> String {
    let grid = session.grid();
    let score_width = grid
        .cells()
        .filter_map(|cell| cell.score())
        .map(|score| score.to_string().len())
        .max()
        .unwrap_or(0);
    let cell_width = 1 + score_width;
    let label_width = (grid.side_length() - 1).to_string().len();

    let mut out = String::new();
    let _ = write!(out, "{}{:label_width$} ", palette.gray, "");
    for col in 0..grid.side_length() {
        let _ = write!(out, " {col:<cell_width$}");
    }
    let _ = writeln!(out, "{}", palette.reset);

    for (row, cells) in grid.rows().enumerate() {
        let _ = write!(out, "{}{row:>label_width$}{} ", palette.gray, palette.reset);
        for cell in cells {
            let queued = session.is_queued(cell.position());
            let symbol = match cell.state() {
                CellState::Unvisited if queued => QUEUED_SYMBOL,
                state => state.symbol(),
            };
            let score = cell.score().map(|s| s.to_string()).unwrap_or_default();
            let label = format!("{symbol}{score}");
            let _ = write!(
                out,
                " {}{label:<cell_width$}{}",
                palette.for_cell(cell.state(), queued),
                palette.reset
            );
        }
        out.push('\n');
    }
    out
}

/// One-line summary of the session's progress.
pub fn status_line(session: &Session) -> String {
    let current = session
        .current()
        .map(|position| position.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "status: {} | steps: {} | current: {} | visited: {} | frontier: {}",
        session.status(),
        session.steps_taken(),
        current,
        session.visited_len(),
        session.frontier_len()
    )
}

/// Describe a single step for text output.
pub fn format_step(index: usize, outcome: &StepOutcome) -> String {
    let scored = outcome
        .scored
        .iter()
        .map(|s| {
            let marker = if s.queued { "" } else { " (already queued)" };
            format!("{}={}{}", s.position, s.score, marker)
        })
        .collect::<Vec<_>>()
        .join(", ");
    let scored = if scored.is_empty() {
        "none".to_string()
    } else {
        scored
    };

    format!(
        "step {index}: expanded {} -> next {} (f={}); scored: {scored}",
        outcome.expanded, outcome.next_current, outcome.next_score
    )
}

/// Closing message for a finished session, if any.
pub fn outcome_message(session: &Session, palette: &ColorPalette) -> Option<String> {
    match session.status() {
        SessionStatus::Found => Some(format!(
            "{}Finish found!{} ({} steps)",
            palette.success,
            palette.reset,
            session.steps_taken()
        )),
        SessionStatus::Exhausted => Some(format!(
            "{}No path: frontier exhausted{} after {} steps",
            palette.failure,
            palette.reset,
            session.steps_taken()
        )),
        SessionStatus::Editing | SessionStatus::Searching => None,
    }
}

/// Write `value` as a single JSON line.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
