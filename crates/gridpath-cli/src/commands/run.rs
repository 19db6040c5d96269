//! Run command handler: step a search until it finishes or hits a limit.

use std::io::Write;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use gridpath_lib::{Error as SearchError, Session, SessionSnapshot, StepOutcome};

use crate::output::{
    format_step, outcome_message, render_grid, status_line, write_json, OutputFormat,
};
use crate::terminal::ColorPalette;

/// Arguments for the run command.
#[derive(Debug, Clone)]
pub struct RunCommandArgs {
    /// Upper bound on the number of steps taken.
    pub max_steps: usize,
    /// Skip the per-step lines and only print the final grid.
    pub quiet: bool,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    steps: &'a [StepOutcome],
    session: SessionSnapshot,
}

/// Step `session` one expansion at a time, printing as it goes.
///
/// Fails when the frontier is exhausted so the process exits non-zero on
/// "no path".
pub fn handle_run<W: Write>(
    session: &mut Session,
    args: &RunCommandArgs,
    format: OutputFormat,
    palette: &ColorPalette,
    out: &mut W,
) -> Result<()> {
    let mut outcomes = Vec::new();
    let mut exhausted = false;

    for index in 1..=args.max_steps {
        match session.advance(index as u64) {
            Ok(outcome) => {
                if format == OutputFormat::Text && !args.quiet {
                    writeln!(out, "{}", format_step(index, &outcome))?;
                }
                let done = outcome.reached_finish;
                outcomes.push(outcome);
                if done {
                    break;
                }
            }
            Err(SearchError::ExhaustedFrontier) => {
                exhausted = true;
                break;
            }
            Err(err) => {
                return Err(err).context("search could not advance");
            }
        }
    }

    info!(
        steps = outcomes.len(),
        status = %session.status(),
        "run finished"
    );

    match format {
        OutputFormat::Text => {
            write!(out, "{}", render_grid(session, palette))?;
            writeln!(out, "{}", status_line(session))?;
            match outcome_message(session, palette) {
                Some(message) => writeln!(out, "{message}")?,
                None => writeln!(
                    out,
                    "Stopped after {} steps without reaching the finish",
                    outcomes.len()
                )?,
            }
        }
        OutputFormat::Json => write_json(
            out,
            &RunReport {
                steps: &outcomes,
                session: session.snapshot(),
            },
        )?,
    }

    if exhausted {
        let describe = |p: Option<gridpath_lib::Position>| {
            p.map(|p| p.to_string()).unwrap_or_else(|| "?".to_string())
        };
        bail!(
            "no path from {} to {}",
            describe(session.start()),
            describe(session.finish())
        );
    }

    Ok(())
}
